//! Common types shared across the assembler.
//!
//! This module collects the building blocks used by every other module:
//! 1. **Addresses:** Strongly typed physical addresses and half-open ranges.
//! 2. **Errors:** The full failure taxonomy for addressing, binding, topology
//!    validation, and assembly.

/// Physical address and address range types.
pub mod addr;
/// Error taxonomy (address, bind, topology, spec, workload, assembly).
pub mod error;

pub use addr::{AddrRange, PhysAddr};
pub use error::{
    AddressError, AssemblyError, AssemblyFault, BindError, SpecError, TopologyError, WorkloadError,
};
