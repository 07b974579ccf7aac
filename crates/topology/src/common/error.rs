//! Error taxonomy for assembly, addressing, and topology validation.
//!
//! This module defines every failure the assembler can report. It provides:
//! 1. **Address errors:** Overlapping, out-of-range, overflowing, or unmapped windows.
//! 2. **Bind errors:** Port resolution and edge-creation failures.
//! 3. **Topology errors:** Structural problems found at finalize time.
//! 4. **Assembly errors:** Any of the above tagged with the step that produced it.
//!
//! Every failure is deterministic: it stems from a malformed [`SystemSpec`]
//! or component signature, so nothing is retried. Each variant carries the
//! offending range or port pair so the spec can be fixed from the message
//! alone, without re-running the whole chain under a debugger.
//!
//! [`SystemSpec`]: crate::config::SystemSpec

use std::path::PathBuf;

use super::addr::AddrRange;
use crate::topology::component::ComponentId;
use crate::topology::port::{PortRole, PortSide};

/// Failures raised by the address map.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// A new window intersects one that is already registered.
    #[error("window {new} overlaps registered window {existing} (owner {owner})")]
    Overlap {
        /// The window being registered.
        new: AddrRange,
        /// The already-registered window it collides with.
        existing: AddrRange,
        /// Component that owns the existing window.
        owner: ComponentId,
    },

    /// A window falls outside the globally configured physical range.
    #[error("window {window} falls outside the physical address space {space}")]
    OutOfRange {
        /// The rejected window.
        window: AddrRange,
        /// The global physical range it must fit inside.
        space: AddrRange,
    },

    /// `base + size` does not fit in 64 bits.
    #[error("address range overflows: base {base:#x} + size {size:#x}")]
    Overflow {
        /// Range base address.
        base: u64,
        /// Range size in bytes.
        size: u64,
    },

    /// An address query hit no registered window.
    ///
    /// Callers must treat this as "this address must not be routed": real
    /// hardware requires every address a load/store path touches to be
    /// classified cacheable or not.
    #[error("address {addr:#x} is not covered by any registered window")]
    Unmapped {
        /// The unclassifiable address.
        addr: u64,
    },
}

/// Failures raised while resolving ports and creating edges.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The component kind does not expose the requested role.
    #[error("component `{component}` ({kind}) exposes no `{role}` port")]
    UnknownRole {
        /// Component name.
        component: String,
        /// Kind of the component, for the message.
        kind: String,
        /// The role that was requested.
        role: PortRole,
    },

    /// An edge must join a requestor-side port to a responder-side port.
    #[error(
        "cannot bind `{a}` ({a_side}) to `{b}` ({b_side}): edges join a requestor to a responder"
    )]
    SideMismatch {
        /// Requestor-position port name (`component.role`).
        a: String,
        /// Its side.
        a_side: PortSide,
        /// Responder-position port name.
        b: String,
        /// Its side.
        b_side: PortSide,
    },

    /// This exact port pair is already connected.
    #[error("ports `{a}` and `{b}` are already bound")]
    AlreadyBound {
        /// Requestor port name.
        a: String,
        /// Responder port name.
        b: String,
    },

    /// The port has no free peer slot left.
    #[error("port `{port}` already has its maximum of {max} peer(s)")]
    ArityExceeded {
        /// The saturated port's name.
        port: String,
        /// Its peer limit.
        max: usize,
    },
}

/// Structural failures found by [`TopologyGraph::validate`].
///
/// [`TopologyGraph::validate`]: crate::topology::graph::TopologyGraph::validate
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// A memory-side chain re-entered a component already on it.
    #[error("memory-side chain loops back into `{component}` (chain: {chain})")]
    Cycle {
        /// The component the chain re-entered.
        component: String,
        /// The chain walked so far, rendered as `a -> b -> c`.
        chain: String,
    },

    /// A required port was left unbound.
    #[error("port `{port}` on component `{component}` is unbound")]
    DanglingPort {
        /// The component owning the dangling port.
        component: String,
        /// The dangling port's role name.
        port: String,
    },
}

/// Failures raised by [`SystemSpec::validate`].
///
/// The spec is plain typed data; these are the degenerate-value checks that
/// replace the free-form keyword-argument construction of the source
/// configuration language.
///
/// [`SystemSpec::validate`]: crate::config::SystemSpec::validate
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Clock frequency must be non-zero.
    #[error("clock frequency must be non-zero")]
    ZeroClock,

    /// Clock frequency too large to express in Hz.
    #[error("clock frequency of {mhz} MHz overflows when scaled to Hz")]
    ClockTooFast {
        /// The rejected frequency in MHz.
        mhz: u64,
    },

    /// Total memory size must be non-zero.
    #[error("total memory size must be non-zero")]
    ZeroMemory,

    /// A device window was given a zero size.
    #[error("accelerator {which} window has zero size")]
    EmptyWindow {
        /// Which window (`"control"` or `"data"`).
        which: &'static str,
    },

    /// The accelerator's maximum request size must be non-zero.
    #[error("accelerator maximum request size must be non-zero")]
    ZeroRequestSize,

    /// The accelerator's in-flight request budget must be non-zero.
    #[error("accelerator in-flight request count must be non-zero")]
    ZeroInFlight,

    /// Physical address width outside the supported span.
    #[error("physical address width of {bits} bits is unsupported (expected 32..=64)")]
    BadPhysBits {
        /// The rejected width.
        bits: u32,
    },

    /// A workload was requested with an empty path.
    #[error("workload binary path is empty")]
    EmptyWorkloadPath,
}

/// Failures raised while binding the workload binary.
#[derive(Debug, thiserror::Error)]
pub enum WorkloadError {
    /// The binary could not be read from disk.
    #[error("cannot read workload binary `{path}`: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The binary is not a parseable ELF object.
    #[error("workload binary `{path}` is not a valid ELF object: {detail}")]
    NotElf {
        /// Path of the rejected file.
        path: PathBuf,
        /// Parser detail message.
        detail: String,
    },
}

/// Any single-step failure, for aggregation into an [`AssemblyError`].
#[derive(Debug, thiserror::Error)]
pub enum AssemblyFault {
    /// Address map registration or query failed.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// Port resolution or edge creation failed.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// Finalize-time structural validation failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// The system spec itself is degenerate.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// The workload binary could not be bound.
    #[error(transparent)]
    Workload(#[from] WorkloadError),
}

/// An assembly failure, tagged with the step at which it occurred.
///
/// [`SystemAssembler::assemble`] is the sole aggregation point: every internal
/// failure surfaces here, and this is the only error the front end needs to
/// handle.
///
/// [`SystemAssembler::assemble`]: crate::assembler::SystemAssembler::assemble
#[derive(Debug, thiserror::Error)]
#[error("assembly step {step} ({name}) failed: {fault}")]
pub struct AssemblyError {
    /// Index of the failing step (see [`SystemAssembler`] step order).
    ///
    /// [`SystemAssembler`]: crate::assembler::SystemAssembler
    pub step: usize,
    /// Short name of the failing step (e.g. `"accelerator"`).
    pub name: &'static str,
    /// The underlying failure.
    pub fault: AssemblyFault,
}

impl AssemblyError {
    /// Wraps a step result, tagging any failure with the step index and name.
    pub(crate) fn at<T, E>(step: usize, name: &'static str, res: Result<T, E>) -> Result<T, Self>
    where
        E: Into<AssemblyFault>,
    {
        res.map_err(|e| Self {
            step,
            name,
            fault: e.into(),
        })
    }
}
