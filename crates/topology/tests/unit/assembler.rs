//! End-to-end assembly tests.
//!
//! Drives `SystemAssembler::assemble` with whole specs and checks the
//! resulting system model, plus the step tagging of every failure class.

use std::io::Write;
use std::path::PathBuf;

use socforge_core::common::addr::PhysAddr;
use socforge_core::common::error::{
    AddressError, AssemblyFault, SpecError, WorkloadError,
};
use socforge_core::config::SystemSpec;
use socforge_core::{SystemAssembler, System};

fn assemble_default() -> System {
    SystemAssembler::assemble(SystemSpec::default()).unwrap()
}

/// Smallest parseable ELF64 little-endian executable: a bare 64-byte header
/// with no program or section tables and the given entry point.
fn minimal_elf(entry: u64) -> Vec<u8> {
    let mut elf = vec![0u8; 64];
    elf[..4].copy_from_slice(b"\x7fELF");
    elf[4] = 2; // ELFCLASS64
    elf[5] = 1; // little-endian
    elf[6] = 1; // EV_CURRENT
    elf[16..18].copy_from_slice(&2u16.to_le_bytes()); // ET_EXEC
    elf[18..20].copy_from_slice(&0xF3u16.to_le_bytes()); // EM_RISCV
    elf[20..24].copy_from_slice(&1u32.to_le_bytes());
    elf[24..32].copy_from_slice(&entry.to_le_bytes());
    elf[52..54].copy_from_slice(&64u16.to_le_bytes()); // e_ehsize
    elf
}

// ══════════════════════════════════════════════════════════
// 1. The reference system assembles
// ══════════════════════════════════════════════════════════

#[test]
fn default_spec_assembles() {
    let system = assemble_default();
    assert_eq!(system.topology().components().len(), 8);
    // 3 L1-path + 3 bus fan-in + 1 L2 + 4 crossbar (incl. interrupts) + 1 DRAM
    assert_eq!(system.topology().edges().len(), 12);
    assert_eq!(system.address_space().windows().len(), 3);
    assert!(system.workload().is_none());
}

#[test]
fn handles_name_the_standard_components() {
    let system = assemble_default();
    let topo = system.topology();
    let h = system.handles();
    assert_eq!(topo.component(h.cpu).name, "cpu");
    assert_eq!(topo.component(h.l1i).name, "l1i");
    assert_eq!(topo.component(h.l1d).name, "l1d");
    assert_eq!(topo.component(h.accelerator).name, "accel");
    assert_eq!(topo.component(h.l2_bus).name, "l2bus");
    assert_eq!(topo.component(h.l2_cache).name, "l2");
    assert_eq!(topo.component(h.mem_bus).name, "membus");
    assert_eq!(topo.component(h.mem_ctrl).name, "mem_ctrl");
}

#[test]
fn address_map_classifies_dram_and_device_windows() {
    let system = assemble_default();
    let space = system.address_space();

    // DRAM below the device carve-out is cacheable.
    assert_eq!(space.cacheable_at(PhysAddr::new(0)).unwrap(), true);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x3FFF_FFFF)).unwrap(), true);

    // Both accelerator windows are uncacheable.
    assert_eq!(space.cacheable_at(PhysAddr::new(0x4000_0000)).unwrap(), false);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x4000_1000)).unwrap(), false);
    assert_eq!(space.cacheable_at(PhysAddr::new(0x7FFF_FFFF)).unwrap(), false);

    // Above the data window nothing is mapped.
    assert!(matches!(
        space.cacheable_at(PhysAddr::new(0x8000_0000)),
        Err(AddressError::Unmapped { addr: 0x8000_0000 })
    ));
}

#[test]
fn device_windows_owned_by_accelerator_dram_by_controller() {
    let system = assemble_default();
    let h = system.handles();
    let space = system.address_space();
    assert_eq!(space.window_at(PhysAddr::new(0)).unwrap().owner, h.mem_ctrl);
    assert_eq!(
        space.window_at(PhysAddr::new(0x4000_0000)).unwrap().owner,
        h.accelerator
    );
    assert_eq!(
        space.window_at(PhysAddr::new(0x5000_0000)).unwrap().owner,
        h.accelerator
    );
}

// ══════════════════════════════════════════════════════════
// 2. Step-tagged failures
// ══════════════════════════════════════════════════════════

#[test]
fn degenerate_spec_fails_at_step_zero() {
    let spec = SystemSpec {
        clock_mhz: 0,
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 0);
    assert_eq!(err.name, "spec");
    assert!(matches!(err.fault, AssemblyFault::Spec(SpecError::ZeroClock)));
}

/// Growing DRAM to 2 GiB pushes its claim into the accelerator's control
/// window, which was registered first; the collision surfaces when the
/// memory controller registers DRAM.
#[test]
fn dram_reaching_into_device_windows_fails_at_memory_controller() {
    let spec = SystemSpec {
        memory_size: 0x8000_0000,
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 7);
    assert_eq!(err.name, "memory-controller");
    match err.fault {
        AssemblyFault::Address(AddressError::Overlap { new, existing, .. }) => {
            assert_eq!(new.to_string(), "[0x0, 0x80000000)");
            assert_eq!(existing.to_string(), "[0x40000000, 0x40001000)");
        }
        other => panic!("expected Overlap, got {other:?}"),
    }
}

#[test]
fn colliding_device_windows_fail_at_accelerator_step() {
    let spec = SystemSpec {
        accel_data_base: 0x4000_0800, // starts inside the control window
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 2);
    assert_eq!(err.name, "accelerator");
    assert!(matches!(
        err.fault,
        AssemblyFault::Address(AddressError::Overlap { .. })
    ));
}

#[test]
fn device_window_past_physical_width_fails_at_accelerator_step() {
    let spec = SystemSpec {
        phys_addr_bits: 32,
        accel_data_base: 0xF000_0000,
        accel_data_size: 0x2000_0000, // ends beyond the 4 GiB limit
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 2);
    assert!(matches!(
        err.fault,
        AssemblyFault::Address(AddressError::OutOfRange { .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Workload binding
// ══════════════════════════════════════════════════════════

#[test]
fn missing_workload_binary_fails_at_workload_step() {
    let spec = SystemSpec {
        workload: Some(PathBuf::from("/nonexistent/bench/onnx")),
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 9);
    assert_eq!(err.name, "workload");
    assert!(matches!(
        err.fault,
        AssemblyFault::Workload(WorkloadError::Io { .. })
    ));
}

#[test]
fn non_elf_workload_binary_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"#!/bin/sh\necho not a binary\n").unwrap();

    let spec = SystemSpec {
        workload: Some(file.path().to_path_buf()),
        ..SystemSpec::default()
    };
    let err = SystemAssembler::assemble(spec).unwrap_err();
    assert_eq!(err.step, 9);
    assert!(matches!(
        err.fault,
        AssemblyFault::Workload(WorkloadError::NotElf { .. })
    ));
}

#[test]
fn elf_workload_binds_with_entry_and_argv() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&minimal_elf(0x1_0174)).unwrap();

    let spec = SystemSpec {
        workload: Some(file.path().to_path_buf()),
        ..SystemSpec::default()
    };
    let system = SystemAssembler::assemble(spec).unwrap();
    let workload = system.workload().unwrap();
    assert_eq!(workload.entry, 0x1_0174);
    assert_eq!(workload.argv, vec![file.path().display().to_string()]);
    assert_eq!(workload.path, file.path());
}

// ══════════════════════════════════════════════════════════
// 4. The assembled model is self-consistent
// ══════════════════════════════════════════════════════════

#[test]
fn spec_is_carried_through_unchanged() {
    let spec = SystemSpec {
        clock_mhz: 1700,
        ..SystemSpec::default()
    };
    let system = SystemAssembler::assemble(spec.clone()).unwrap();
    assert_eq!(*system.spec(), spec);
}

#[test]
fn every_window_owner_is_a_known_component() {
    let system = assemble_default();
    let count = system.topology().components().len();
    for window in system.address_space().windows() {
        assert!(window.owner.0 < count);
    }
}
