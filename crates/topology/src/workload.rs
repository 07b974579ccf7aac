//! Workload binding: the binary attached to the CPU's execution context.
//!
//! This module performs the assembler's last step. It provides:
//! 1. **Probing:** Reads the workload binary and checks it is a parseable ELF
//!    object, recovering its entry point.
//! 2. **Process shape:** A single process/thread context whose argv begins
//!    with the binary path itself.
//!
//! Loading the binary into simulated memory is the external runtime's job;
//! the assembler only proves the binding is usable and records it.

use std::fs;
use std::path::{Path, PathBuf};

use object::Object;
use tracing::debug;

use crate::common::error::WorkloadError;

/// A validated workload binding for the single CPU execution context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workload {
    /// Path of the bound binary.
    pub path: PathBuf,
    /// Command line; begins with the executable, like argv.
    pub argv: Vec<String>,
    /// ELF entry point address.
    pub entry: u64,
}

impl Workload {
    /// Probes and binds the binary at the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the workload binary.
    ///
    /// # Returns
    ///
    /// The binding, or [`WorkloadError::Io`] if the file cannot be read and
    /// [`WorkloadError::NotElf`] if it is not a valid ELF object.
    pub fn bind(path: &Path) -> Result<Self, WorkloadError> {
        let data = fs::read(path).map_err(|source| WorkloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file = object::File::parse(&*data).map_err(|e| WorkloadError::NotElf {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let entry = file.entry();
        debug!(path = %path.display(), entry = format_args!("{entry:#x}"), "bound workload");

        Ok(Self {
            path: path.to_path_buf(),
            argv: vec![path.display().to_string()],
            entry,
        })
    }
}
