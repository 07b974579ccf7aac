//! Simulated-hardware system topology assembler and address map validator.
//!
//! This crate builds and validates the model of a single simulated compute
//! system before any simulation runs:
//! 1. **Address space:** A global physical range with registered,
//!    non-overlapping windows, each tagged cacheable or not.
//! 2. **Topology:** Components with fixed typed port signatures, wired into a
//!    graph whose edges always join a requestor to a responder.
//! 3. **Validation:** Arity, side, overlap, dangling-port, and chain-
//!    termination checks, so only structurally sound systems reach the
//!    external runtime.
//! 4. **Assembly:** A one-shot, fail-fast builder from a typed [`SystemSpec`]
//!    to an immutable [`System`] handle.
//!
//! What the system *does* once it runs — instruction execution, coherence,
//! timing, the event loop — belongs to the external runtime behind
//! [`runtime::Runtime`].

/// Global physical address space and registered windows.
pub mod addrspace;
/// System assembly and the finished `System` handle.
pub mod assembler;
/// Common types (addresses, ranges, the error taxonomy).
pub mod common;
/// The typed system specification.
pub mod config;
/// External runtime boundary.
pub mod runtime;
/// Ports, components, and the topology graph.
pub mod topology;
/// Workload binary binding.
pub mod workload;

/// Address map type; construct via [`assembler::SystemAssembler`] or directly.
pub use crate::addrspace::{AddressSpace, AddressWindow};
/// Finished system handle and its builder.
pub use crate::assembler::{System, SystemAssembler, SystemHandles};
/// Top-level error type returned by assembly.
pub use crate::common::error::AssemblyError;
/// System description; use `SystemSpec::default()` or deserialize from JSON.
pub use crate::config::SystemSpec;
/// Interconnect graph type.
pub use crate::topology::TopologyGraph;
