//! Interconnect model: ports, components, and the topology graph.
//!
//! This module groups the structural half of the assembler:
//! 1. **Ports:** Typed endpoints with orientation and arity.
//! 2. **Components:** Named nodes with fixed kind-specific port signatures.
//! 3. **Graph:** Ownership of components and edges, plus finalize-time
//!    validation.

/// Components, kinds, signatures, and request forwarding.
pub mod component;
/// Topology graph, edges, connection, and validation.
pub mod graph;
/// Port sides, arities, roles, and identifiers.
pub mod port;

pub use component::{Component, ComponentId, ComponentKind};
pub use graph::{Edge, TopologyGraph};
pub use port::{Port, PortArity, PortId, PortRole, PortSide};
