//! Topology graph: components plus port-to-port bindings.
//!
//! This module implements the interconnect graph the assembler builds. It
//! provides:
//! 1. **Ownership:** The graph owns every component and every edge.
//! 2. **Edge creation:** `connect` is the single path by which edges are made,
//!    so the requestor-to-responder invariant is enforced in one place.
//! 3. **Validation:** `validate` checks, once at finalize time, that every
//!    required port is bound and that every memory-side chain terminates
//!    without re-entering a component. Partially-wired states during assembly
//!    are expected and are not errors.

use super::component::{Component, ComponentId, ComponentKind};
use super::port::{PortId, PortRole, PortSide};
use crate::common::error::{BindError, TopologyError};

/// An undirected binding between a requestor port and a responder port.
///
/// Edges are only constructible from a free (or vector) requestor-side port
/// and a responder-side port with an available peer slot; once formed they
/// are immutable for the life of the topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// The consumer-side endpoint.
    pub requestor: PortId,
    /// The provider-side endpoint.
    pub responder: PortId,
}

/// The set of components plus the set of port bindings between them.
#[derive(Debug, Default)]
pub struct TopologyGraph {
    components: Vec<Component>,
    edges: Vec<Edge>,
}

impl TopologyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a component of the given kind, with its kind-fixed port signature.
    ///
    /// # Arguments
    ///
    /// * `kind` - Component kind; determines the port signature.
    /// * `name` - Name used in reports and diagnostics.
    ///
    /// # Returns
    ///
    /// The new component's identifier.
    pub fn add_component(&mut self, kind: ComponentKind, name: impl Into<String>) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(Component::new(id, kind, name));
        id
    }

    /// Returns the component with the given identifier.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.0]
    }

    /// Returns all components in creation order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns all edges in creation order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Resolves ports by role on both components and binds them with an edge.
    ///
    /// This is the only way edges enter the graph. The first argument pair
    /// must name a requestor-side port and the second a responder-side port.
    ///
    /// # Arguments
    ///
    /// * `a` / `role_a` - Component and role of the requestor-side port.
    /// * `b` / `role_b` - Component and role of the responder-side port.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success. Fails with [`BindError::UnknownRole`] if either
    /// kind lacks the role, [`BindError::SideMismatch`] unless the pair is
    /// (requestor, responder), [`BindError::AlreadyBound`] if this exact pair
    /// is already connected, and [`BindError::ArityExceeded`] if either port
    /// has no free peer slot.
    pub fn connect(
        &mut self,
        a: ComponentId,
        role_a: PortRole,
        b: ComponentId,
        role_b: PortRole,
    ) -> Result<(), BindError> {
        let pa = self.component(a).port_by_role(role_a)?;
        let pb = self.component(b).port_by_role(role_b)?;

        let side_a = self.port_at(pa).side;
        let side_b = self.port_at(pb).side;
        if side_a != PortSide::Requestor || side_b != PortSide::Responder {
            return Err(BindError::SideMismatch {
                a: self.port_name(pa),
                a_side: side_a,
                b: self.port_name(pb),
                b_side: side_b,
            });
        }

        if self
            .edges
            .iter()
            .any(|e| e.requestor == pa && e.responder == pb)
        {
            return Err(BindError::AlreadyBound {
                a: self.port_name(pa),
                b: self.port_name(pb),
            });
        }

        for pid in [pa, pb] {
            let max = self.port_at(pid).arity.max_peers();
            if self.bound_count(pid) >= max {
                return Err(BindError::ArityExceeded {
                    port: self.port_name(pid),
                    max,
                });
            }
        }

        self.edges.push(Edge {
            requestor: pa,
            responder: pb,
        });
        Ok(())
    }

    /// Returns how many edges are bound to the given port.
    pub fn bound_count(&self, pid: PortId) -> usize {
        self.edges
            .iter()
            .filter(|e| e.requestor == pid || e.responder == pid)
            .count()
    }

    /// Returns whether the named port has at least one bound edge.
    ///
    /// # Returns
    ///
    /// `Ok(true)`/`Ok(false)`, or [`BindError::UnknownRole`] if the component
    /// kind lacks the role.
    pub fn is_bound(&self, id: ComponentId, role: PortRole) -> Result<bool, BindError> {
        let pid = self.component(id).port_by_role(role)?;
        Ok(self.bound_count(pid) > 0)
    }

    /// Validates structural well-formedness of the finished graph.
    ///
    /// Two checks run, in order:
    /// 1. **Dangling ports:** every non-optional port on every component must
    ///    have at least one bound edge.
    /// 2. **Chain termination:** from each originating requestor port (CPU
    ///    fetch/data/interrupt ports, accelerator DMA), the walk follows each
    ///    edge to its responder, then continues through the role the kind
    ///    forwards that traffic out of. A chain that re-enters a port already
    ///    on it can never terminate and is a [`TopologyError::Cycle`].
    ///    Components with no forwarding for the entry role (the memory
    ///    controller, the CPU's interrupt sinks) terminate the chain.
    ///
    /// # Returns
    ///
    /// `Ok(())` iff every chain terminates and no required port dangles.
    pub fn validate(&self) -> Result<(), TopologyError> {
        for comp in &self.components {
            for (index, port) in comp.ports.iter().enumerate() {
                let pid = PortId {
                    component: comp.id,
                    index,
                };
                if !port.optional && self.bound_count(pid) == 0 {
                    return Err(TopologyError::DanglingPort {
                        component: comp.name.clone(),
                        port: port.role.to_string(),
                    });
                }
            }
        }

        for comp in &self.components {
            for role in comp.kind.originating_roles() {
                // Originating roles are part of the kind signature, so
                // resolution cannot fail here.
                if let Ok(pid) = comp.port_by_role(*role) {
                    let mut path = vec![pid];
                    let mut chain = vec![comp.port_name(pid.index)];
                    self.walk(pid, &mut path, &mut chain)?;
                }
            }
        }

        Ok(())
    }

    /// Follows every edge out of `from` and recurses through forwarding.
    fn walk(
        &self,
        from: PortId,
        path: &mut Vec<PortId>,
        chain: &mut Vec<String>,
    ) -> Result<(), TopologyError> {
        for edge in self.edges.iter().filter(|e| e.requestor == from) {
            let entry = edge.responder;
            let target = self.component(entry.component);

            if path.contains(&entry) {
                chain.push(target.name.clone());
                return Err(TopologyError::Cycle {
                    component: target.name.clone(),
                    chain: chain.join(" -> "),
                });
            }

            path.push(entry);
            chain.push(target.name.clone());

            if let Some(next_role) = target.kind.forwards(self.port_at(entry).role) {
                let next = target.port_by_role(next_role).map_err(|_| {
                    // A kind whose forwarding map names a role outside its own
                    // signature is a programming error in the kind tables;
                    // surface it as a dangling continuation.
                    TopologyError::DanglingPort {
                        component: target.name.clone(),
                        port: next_role.to_string(),
                    }
                })?;
                path.push(next);
                self.walk(next, path, chain)?;
                let _ = path.pop();
            }

            let _ = path.pop();
            let _ = chain.pop();
        }
        Ok(())
    }

    fn port_at(&self, pid: PortId) -> &super::port::Port {
        self.component(pid.component).port(pid.index)
    }

    fn port_name(&self, pid: PortId) -> String {
        self.component(pid.component).port_name(pid.index)
    }
}
