//! Components and their fixed, kind-specific port signatures.
//!
//! This module defines the nodes of the topology graph. It provides:
//! 1. **Kinds:** The six component kinds the assembler knows how to wire.
//! 2. **Signatures:** The fixed ordered port sequence each kind exposes.
//! 3. **Routing shape:** Per-kind request forwarding — which responder role a
//!    request enters by and which requestor role it continues out of — used by
//!    the finalize-time chain walk.

use std::fmt;

use super::port::{Port, PortArity, PortId, PortRole, PortSide};
use crate::common::error::BindError;

/// Identifies one component inside a [`TopologyGraph`].
///
/// [`TopologyGraph`]: super::graph::TopologyGraph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ComponentId(pub usize);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kinds of component the assembler can create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// A CPU core, including its interrupt-controller sub-resource.
    Cpu,
    /// A private first-level cache (instruction or data).
    L1Cache,
    /// A shared second-level cache.
    L2Cache,
    /// A crossbar/bus: fans many requestors into provider ports.
    Bus,
    /// A memory-mapped accelerator with a CPU-facing path and a DMA path.
    AcceleratorDevice,
    /// The terminal memory controller backing DRAM.
    MemoryController,
}

impl ComponentKind {
    /// Returns the fixed port signature for this kind.
    ///
    /// The sequence order is stable; [`PortId::index`] values index into it.
    pub fn signature(self) -> Vec<Port> {
        use PortArity::{Single, Vector};
        use PortRole as R;
        use PortSide::{Requestor, Responder};

        match self {
            Self::Cpu => vec![
                Port::new(R::ICache, Requestor, Single),
                Port::new(R::DCache, Requestor, Single),
                Port::new(R::IntRequestor, Requestor, Single),
                Port::new(R::IntPio, Responder, Single),
                Port::new(R::IntResponder, Responder, Single),
            ],
            Self::L1Cache | Self::L2Cache => vec![
                Port::new(R::CpuSide, Responder, Single),
                Port::new(R::MemSide, Requestor, Single),
            ],
            Self::Bus => vec![
                Port::new(R::CpuSidePorts, Responder, Vector),
                Port::new(R::MemSidePorts, Requestor, Vector),
            ],
            Self::AcceleratorDevice => vec![
                Port::new(R::CpuSide, Responder, Single),
                Port::new(R::MemSide, Requestor, Single),
                Port::new(R::Dma, Requestor, Single),
            ],
            Self::MemoryController => vec![Port::new(R::CpuSide, Responder, Single)],
        }
    }

    /// Returns the requestor role a request entering by `via` continues out of.
    ///
    /// `None` means the component terminates requests arriving on `via`: the
    /// memory controller sinks everything, and the CPU's interrupt responder
    /// ports absorb interrupt traffic rather than forwarding it.
    pub fn forwards(self, via: PortRole) -> Option<PortRole> {
        match (self, via) {
            (Self::L1Cache | Self::L2Cache | Self::AcceleratorDevice, PortRole::CpuSide) => {
                Some(PortRole::MemSide)
            }
            (Self::Bus, PortRole::CpuSidePorts) => Some(PortRole::MemSidePorts),
            _ => None,
        }
    }

    /// Returns the requestor roles on which chains originate at this kind.
    ///
    /// These are the ports no upstream component forwards into; the finalize
    /// walk starts one chain per originating port.
    pub fn originating_roles(self) -> &'static [PortRole] {
        match self {
            Self::Cpu => &[PortRole::ICache, PortRole::DCache, PortRole::IntRequestor],
            Self::AcceleratorDevice => &[PortRole::Dma],
            _ => &[],
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Cpu => "cpu",
            Self::L1Cache => "l1-cache",
            Self::L2Cache => "l2-cache",
            Self::Bus => "bus",
            Self::AcceleratorDevice => "accelerator-device",
            Self::MemoryController => "memory-controller",
        };
        write!(f, "{name}")
    }
}

/// A named node in the topology graph with a fixed set of typed ports.
#[derive(Clone, Debug)]
pub struct Component {
    /// Identifier within the owning graph.
    pub id: ComponentId,
    /// Kind, which determines the port signature.
    pub kind: ComponentKind,
    /// Human-readable name used in reports and diagnostics.
    pub name: String,
    /// Ordered port sequence, fixed by the kind.
    pub ports: Vec<Port>,
}

impl Component {
    /// Creates a component of the given kind with its kind-fixed signature.
    pub(crate) fn new(id: ComponentId, kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            ports: kind.signature(),
        }
    }

    /// Resolves a port by role.
    ///
    /// # Arguments
    ///
    /// * `role` - The role to look up.
    ///
    /// # Returns
    ///
    /// The port's identifier, or [`BindError::UnknownRole`] if this kind does
    /// not expose the role.
    pub fn port_by_role(&self, role: PortRole) -> Result<PortId, BindError> {
        self.ports
            .iter()
            .position(|p| p.role == role)
            .map(|index| PortId {
                component: self.id,
                index,
            })
            .ok_or_else(|| BindError::UnknownRole {
                component: self.name.clone(),
                kind: self.kind.to_string(),
                role,
            })
    }

    /// Returns the port at the given signature index.
    pub fn port(&self, index: usize) -> &Port {
        &self.ports[index]
    }

    /// Renders a `component.role` port name for diagnostics.
    pub(crate) fn port_name(&self, index: usize) -> String {
        format!("{}.{}", self.name, self.ports[index].role)
    }
}
