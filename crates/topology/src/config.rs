//! System specification consumed by the assembler.
//!
//! This module defines the fully typed description of the system to build. It
//! provides:
//! 1. **Defaults:** Baseline hardware constants (clock, memory, accelerator
//!    windows) as documented constants.
//! 2. **Structure:** The flat `SystemSpec` value, deserializable from JSON.
//! 3. **Validation:** Degenerate-value checks, so assembly starts from a
//!    well-formed spec or not at all.
//!
//! Everything that the source configuration style supplied as free-form
//! keyword arguments or ambient singletons (clock domain, voltage domain) is
//! an explicit field here. Supply a spec as JSON or use
//! `SystemSpec::default()`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::common::addr::AddrRange;
use crate::common::error::{AddressError, SpecError};

/// Default specification constants.
mod defaults {
    /// CPU clock frequency in MHz (2 GHz).
    pub const CLOCK_MHZ: u64 = 2000;

    /// Supply voltage in millivolts.
    pub const VOLTAGE_MV: u64 = 1000;

    /// Physical address width in bits (1 TiB of addressable space).
    pub const PHYS_ADDR_BITS: u32 = 40;

    /// Total DRAM size in bytes (1 GiB).
    ///
    /// DRAM occupies `[0, MEMORY_SIZE)` and must stay clear of the
    /// accelerator windows above it; windows are strictly disjoint.
    pub const MEMORY_SIZE: u64 = 0x4000_0000;

    /// Accelerator control window base address.
    pub const ACCEL_CTRL_BASE: u64 = 0x4000_0000;

    /// Accelerator control window size (one 4 KiB page of registers).
    pub const ACCEL_CTRL_SIZE: u64 = 0x1000;

    /// Accelerator data window base address (directly above the control window).
    pub const ACCEL_DATA_BASE: u64 = 0x4000_1000;

    /// Accelerator data window size (up to the 2 GiB boundary).
    pub const ACCEL_DATA_SIZE: u64 = 0x8000_0000 - ACCEL_DATA_BASE;

    /// Largest single accelerator request, in bytes.
    pub const ACCEL_MAX_REQ_BYTES: u64 = 0x40;

    /// Maximum in-flight accelerator requests.
    pub const ACCEL_MAX_INFLIGHT: u32 = 64;
}

/// Fully typed description of the system to assemble.
///
/// # Examples
///
/// ```
/// use socforge_core::config::SystemSpec;
///
/// let spec = SystemSpec::default();
/// assert_eq!(spec.clock_mhz, 2000);
/// spec.validate().unwrap();
/// ```
///
/// Deserializing from JSON, with defaults filling unnamed fields:
///
/// ```
/// use socforge_core::config::SystemSpec;
///
/// let json = r#"{
///     "memory_size": 1073741824,
///     "accel_ctrl_base": 1073741824,
///     "workload": "bench/hello"
/// }"#;
/// let spec: SystemSpec = serde_json::from_str(json).unwrap();
/// assert_eq!(spec.memory_size, 0x4000_0000);
/// assert_eq!(spec.accel_max_inflight, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSpec {
    /// CPU clock frequency in MHz.
    #[serde(default = "SystemSpec::default_clock_mhz")]
    pub clock_mhz: u64,

    /// Supply voltage in millivolts.
    #[serde(default = "SystemSpec::default_voltage_mv")]
    pub voltage_mv: u64,

    /// Physical address width in bits; all windows must fit below `2^bits`.
    #[serde(default = "SystemSpec::default_phys_addr_bits")]
    pub phys_addr_bits: u32,

    /// Total DRAM size in bytes; DRAM is claimed at `[0, memory_size)`.
    #[serde(default = "SystemSpec::default_memory_size")]
    pub memory_size: u64,

    /// Accelerator control window base address.
    #[serde(default = "SystemSpec::default_accel_ctrl_base")]
    pub accel_ctrl_base: u64,

    /// Accelerator control window size in bytes.
    #[serde(default = "SystemSpec::default_accel_ctrl_size")]
    pub accel_ctrl_size: u64,

    /// Accelerator data window base address.
    #[serde(default = "SystemSpec::default_accel_data_base")]
    pub accel_data_base: u64,

    /// Accelerator data window size in bytes.
    #[serde(default = "SystemSpec::default_accel_data_size")]
    pub accel_data_size: u64,

    /// Largest single accelerator request, in bytes.
    #[serde(default = "SystemSpec::default_accel_max_req_bytes")]
    pub accel_max_req_bytes: u64,

    /// Maximum number of in-flight accelerator requests.
    #[serde(default = "SystemSpec::default_accel_max_inflight")]
    pub accel_max_inflight: u32,

    /// Workload binary to bind to the CPU's execution context, if any.
    #[serde(default)]
    pub workload: Option<PathBuf>,
}

impl SystemSpec {
    fn default_clock_mhz() -> u64 {
        defaults::CLOCK_MHZ
    }

    fn default_voltage_mv() -> u64 {
        defaults::VOLTAGE_MV
    }

    fn default_phys_addr_bits() -> u32 {
        defaults::PHYS_ADDR_BITS
    }

    fn default_memory_size() -> u64 {
        defaults::MEMORY_SIZE
    }

    fn default_accel_ctrl_base() -> u64 {
        defaults::ACCEL_CTRL_BASE
    }

    fn default_accel_ctrl_size() -> u64 {
        defaults::ACCEL_CTRL_SIZE
    }

    fn default_accel_data_base() -> u64 {
        defaults::ACCEL_DATA_BASE
    }

    fn default_accel_data_size() -> u64 {
        defaults::ACCEL_DATA_SIZE
    }

    fn default_accel_max_req_bytes() -> u64 {
        defaults::ACCEL_MAX_REQ_BYTES
    }

    fn default_accel_max_inflight() -> u32 {
        defaults::ACCEL_MAX_INFLIGHT
    }

    /// Checks the spec for degenerate values.
    ///
    /// # Returns
    ///
    /// `Ok(())` if every field is usable, otherwise the first [`SpecError`]
    /// encountered, in field order.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.clock_mhz == 0 {
            return Err(SpecError::ZeroClock);
        }
        if self.clock_mhz > u64::MAX / 1_000_000 {
            return Err(SpecError::ClockTooFast {
                mhz: self.clock_mhz,
            });
        }
        if !(32..=64).contains(&self.phys_addr_bits) {
            return Err(SpecError::BadPhysBits {
                bits: self.phys_addr_bits,
            });
        }
        if self.memory_size == 0 {
            return Err(SpecError::ZeroMemory);
        }
        if self.accel_ctrl_size == 0 {
            return Err(SpecError::EmptyWindow { which: "control" });
        }
        if self.accel_data_size == 0 {
            return Err(SpecError::EmptyWindow { which: "data" });
        }
        if self.accel_max_req_bytes == 0 {
            return Err(SpecError::ZeroRequestSize);
        }
        if self.accel_max_inflight == 0 {
            return Err(SpecError::ZeroInFlight);
        }
        if let Some(path) = &self.workload {
            if path.as_os_str().is_empty() {
                return Err(SpecError::EmptyWorkloadPath);
            }
        }
        Ok(())
    }

    /// Returns the global physical range `[0, 2^phys_addr_bits)`.
    pub fn phys_range(&self) -> Result<AddrRange, AddressError> {
        let size = if self.phys_addr_bits >= 64 {
            u64::MAX
        } else {
            1u64 << self.phys_addr_bits
        };
        AddrRange::new(0, size)
    }

    /// Returns the accelerator control window range.
    pub fn ctrl_window(&self) -> Result<AddrRange, AddressError> {
        AddrRange::new(self.accel_ctrl_base, self.accel_ctrl_size)
    }

    /// Returns the accelerator data window range.
    pub fn data_window(&self) -> Result<AddrRange, AddressError> {
        AddrRange::new(self.accel_data_base, self.accel_data_size)
    }

    /// Returns the DRAM range `[0, memory_size)`.
    pub fn dram_range(&self) -> Result<AddrRange, AddressError> {
        AddrRange::new(0, self.memory_size)
    }

    /// Returns the clock frequency in Hz.
    ///
    /// Saturates at `u64::MAX`; [`validate`](Self::validate) rejects specs
    /// that would reach saturation.
    pub fn clock_hz(&self) -> u64 {
        self.clock_mhz.saturating_mul(1_000_000)
    }
}

impl Default for SystemSpec {
    fn default() -> Self {
        Self {
            clock_mhz: defaults::CLOCK_MHZ,
            voltage_mv: defaults::VOLTAGE_MV,
            phys_addr_bits: defaults::PHYS_ADDR_BITS,
            memory_size: defaults::MEMORY_SIZE,
            accel_ctrl_base: defaults::ACCEL_CTRL_BASE,
            accel_ctrl_size: defaults::ACCEL_CTRL_SIZE,
            accel_data_base: defaults::ACCEL_DATA_BASE,
            accel_data_size: defaults::ACCEL_DATA_SIZE,
            accel_max_req_bytes: defaults::ACCEL_MAX_REQ_BYTES,
            accel_max_inflight: defaults::ACCEL_MAX_INFLIGHT,
            workload: None,
        }
    }
}
