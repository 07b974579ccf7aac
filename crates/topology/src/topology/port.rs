//! Port primitives: sides, arities, roles, and identifiers.
//!
//! A port is a typed connection point a component exposes for wiring into the
//! topology graph. This module provides:
//! 1. **Orientation:** `PortSide` — requestor (CPU/consumer-facing) vs
//!    responder (memory/provider-facing).
//! 2. **Arity:** `PortArity` — single-peer ports vs bus-style vector ports.
//! 3. **Roles:** `PortRole` — the fixed per-kind names ports are resolved by.

use std::fmt;

use super::component::ComponentId;

/// The orientation of a port.
///
/// Edges always join one requestor to one responder. A requestor port sits on
/// the consumer (CPU) side of a link and issues accesses downstream; a
/// responder port sits on the provider (memory) side and accepts them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortSide {
    /// Consumer-facing: issues requests toward memory.
    Requestor,
    /// Provider-facing: accepts requests.
    Responder,
}

impl fmt::Display for PortSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requestor => write!(f, "requestor"),
            Self::Responder => write!(f, "responder"),
        }
    }
}

/// How many peers a port may bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortArity {
    /// At most one bound edge; immutable once bound.
    Single,
    /// Bus-style vector port: many bound edges, one per attached peer.
    Vector,
}

impl PortArity {
    /// Returns the peer limit for this arity.
    pub fn max_peers(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Vector => usize::MAX,
        }
    }
}

/// The fixed role names by which ports are resolved on a component.
///
/// Each [`ComponentKind`] exposes a fixed signature of roles; requesting a
/// role the kind lacks is a [`BindError::UnknownRole`].
///
/// [`ComponentKind`]: super::component::ComponentKind
/// [`BindError::UnknownRole`]: crate::common::error::BindError::UnknownRole
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortRole {
    /// CPU instruction-fetch port (requestor).
    ICache,
    /// CPU data port (requestor).
    DCache,
    /// CPU interrupt-controller request port (requestor).
    IntRequestor,
    /// CPU interrupt-controller programmed-I/O port (responder, terminal).
    IntPio,
    /// CPU interrupt-controller response port (responder, terminal).
    IntResponder,
    /// Consumer-facing port of a cache, device, or controller (responder).
    CpuSide,
    /// Provider-facing port of a cache or device (requestor).
    MemSide,
    /// Consumer-facing vector port of a bus (responder).
    CpuSidePorts,
    /// Provider-facing vector port of a bus (requestor).
    MemSidePorts,
    /// Accelerator DMA port (requestor, independent of the CPU-facing path).
    Dma,
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ICache => "icache_port",
            Self::DCache => "dcache_port",
            Self::IntRequestor => "int_requestor",
            Self::IntPio => "int_pio",
            Self::IntResponder => "int_responder",
            Self::CpuSide => "cpu_side",
            Self::MemSide => "mem_side",
            Self::CpuSidePorts => "cpu_side_ports",
            Self::MemSidePorts => "mem_side_ports",
            Self::Dma => "dma",
        };
        write!(f, "{name}")
    }
}

/// Identifies one port: the owning component plus its index in the
/// component's ordered port sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortId {
    /// The owning component.
    pub component: ComponentId,
    /// Index into [`Component::ports`].
    ///
    /// [`Component::ports`]: super::component::Component::ports
    pub index: usize,
}

/// A typed endpoint belonging to a component.
///
/// Ports carry no binding state of their own; edges live in the owning
/// [`TopologyGraph`], which enforces arity and immutability. A vector port is
/// a single `Port` value that admits many edges, rather than a subclassed
/// bus-specific port per fan-in count.
///
/// [`TopologyGraph`]: super::graph::TopologyGraph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Port {
    /// Role this port is resolved by.
    pub role: PortRole,
    /// Requestor or responder orientation.
    pub side: PortSide,
    /// Peer limit.
    pub arity: PortArity,
    /// Whether validation may leave this port unbound.
    pub optional: bool,
}

impl Port {
    /// Creates a required port.
    pub fn new(role: PortRole, side: PortSide, arity: PortArity) -> Self {
        Self {
            role,
            side,
            arity,
            optional: false,
        }
    }

    /// Creates a port that validation may leave dangling.
    pub fn optional(role: PortRole, side: PortSide, arity: PortArity) -> Self {
        Self {
            role,
            side,
            arity,
            optional: true,
        }
    }
}
