//! Boundary to the external simulation runtime.
//!
//! The assembler's product is a description, not a running machine. The only
//! capability required of the runtime consuming it is: accept a validated
//! topology plus address map, begin execution of the bound workload, and
//! report a terminal cause and a monotonic tick count when it stops. The
//! instruction set, coherence protocol, timing models, and event loop all
//! live on the far side of this trait.

use crate::assembler::System;

/// The terminal outcome of a simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExitEvent {
    /// Why the run stopped (e.g. `"exiting with last active thread context"`).
    pub cause: String,
    /// Monotonic tick count at which it stopped.
    pub tick: u64,
}

/// An external runtime capable of instantiating an assembled system.
pub trait Runtime {
    /// Instantiates the system and runs the bound workload to completion.
    fn instantiate(&mut self, system: &System) -> ExitEvent;
}
