//! System assembly: component creation, window registration, and wiring.
//!
//! This module builds the complete system model from a [`SystemSpec`]. It
//! performs, in fixed order:
//! 1. **CPU:** Core plus its interrupt-controller ports, and the global
//!    address space sized to the configured physical width.
//! 2. **Accelerator:** Device creation and its two non-cacheable windows.
//! 3. **L1 caches:** Instruction cache on the fetch path; the accelerator
//!    interposed between the CPU's data port and the L1 data cache.
//! 4. **L1-to-L2 bus:** Both L1 memory sides plus the accelerator's DMA port.
//! 5. **L2 cache** behind the bus.
//! 6. **System crossbar**, including the CPU interrupt-controller wiring.
//! 7. **Memory controller** with the cacheable DRAM window.
//! 8. **Finalize:** topology validation.
//! 9. **Workload:** binary binding for the single execution context.
//!
//! Later steps reference ports created by earlier ones, so the order is part
//! of the contract. Every failure aborts assembly immediately, tagged with
//! the step at which it occurred; no partial system is ever handed out.

use tracing::{debug, info};

use crate::addrspace::{AddressSpace, AddressWindow};
use crate::common::error::AssemblyError;
use crate::config::SystemSpec;
use crate::topology::component::{ComponentId, ComponentKind};
use crate::topology::graph::TopologyGraph;
use crate::topology::port::PortRole;
use crate::workload::Workload;

/// Identifiers of the components a finished system always contains.
#[derive(Clone, Copy, Debug)]
pub struct SystemHandles {
    /// The CPU core.
    pub cpu: ComponentId,
    /// L1 instruction cache.
    pub l1i: ComponentId,
    /// L1 data cache.
    pub l1d: ComponentId,
    /// The memory-mapped accelerator device.
    pub accelerator: ComponentId,
    /// L1-to-L2 bus.
    pub l2_bus: ComponentId,
    /// Shared L2 cache.
    pub l2_cache: ComponentId,
    /// System-wide crossbar.
    pub mem_bus: ComponentId,
    /// DRAM memory controller.
    pub mem_ctrl: ComponentId,
}

/// An assembled, validated, immutable system model.
///
/// Produced only by [`SystemAssembler::assemble`]; nothing mutates the
/// topology or address map afterwards. The external runtime instantiates
/// this description and owns everything that happens once it runs.
#[derive(Debug)]
pub struct System {
    spec: SystemSpec,
    address_space: AddressSpace,
    topology: TopologyGraph,
    handles: SystemHandles,
    workload: Option<Workload>,
}

impl System {
    /// Returns the spec the system was assembled from.
    pub fn spec(&self) -> &SystemSpec {
        &self.spec
    }

    /// Returns the validated address map.
    pub fn address_space(&self) -> &AddressSpace {
        &self.address_space
    }

    /// Returns the validated interconnect graph.
    pub fn topology(&self) -> &TopologyGraph {
        &self.topology
    }

    /// Returns the identifiers of the standard components.
    pub fn handles(&self) -> SystemHandles {
        self.handles
    }

    /// Returns the bound workload, if the spec named one.
    pub fn workload(&self) -> Option<&Workload> {
        self.workload.as_ref()
    }
}

/// One-shot builder that turns a [`SystemSpec`] into a [`System`].
#[derive(Debug)]
pub struct SystemAssembler;

impl SystemAssembler {
    /// Assembles and validates a complete system from the given spec.
    ///
    /// Single-threaded and synchronous: each step depends on handles created
    /// by the previous one, and the address space and graph are exclusively
    /// owned by this one invocation. The build is deterministic — a failure
    /// stems from the spec, so retrying without changing it is pointless.
    ///
    /// # Arguments
    ///
    /// * `spec` - The fully typed system description.
    ///
    /// # Returns
    ///
    /// The finished system, or an [`AssemblyError`] naming the failing step
    /// and the range or port pair in conflict.
    pub fn assemble(spec: SystemSpec) -> Result<System, AssemblyError> {
        AssemblyError::at(0, "spec", spec.validate())?;

        let mut graph = TopologyGraph::new();

        // Step 1: CPU, its interrupt-controller sub-resource (part of the
        // kind signature), and the global physical range.
        debug!(step = 1, "creating cpu and address space");
        let phys = AssemblyError::at(1, "cpu", spec.phys_range())?;
        let mut space = AddressSpace::new(phys);
        let cpu = graph.add_component(ComponentKind::Cpu, "cpu");

        // Step 2: accelerator device and its two non-cacheable windows.
        // Registration order makes a control/data collision surface here.
        debug!(step = 2, "creating accelerator device");
        let accelerator = graph.add_component(ComponentKind::AcceleratorDevice, "accel");
        let ctrl = AssemblyError::at(2, "accelerator", spec.ctrl_window())?;
        let data = AssemblyError::at(2, "accelerator", spec.data_window())?;
        AssemblyError::at(
            2,
            "accelerator",
            space.register_window(AddressWindow {
                range: ctrl,
                cacheable: false,
                owner: accelerator,
            }),
        )?;
        AssemblyError::at(
            2,
            "accelerator",
            space.register_window(AddressWindow {
                range: data,
                cacheable: false,
                owner: accelerator,
            }),
        )?;

        // Step 3: L1 caches; the accelerator sits in line between the CPU's
        // data port and its own L1D.
        debug!(step = 3, "creating and wiring l1 caches");
        let l1i = graph.add_component(ComponentKind::L1Cache, "l1i");
        let l1d = graph.add_component(ComponentKind::L1Cache, "l1d");
        AssemblyError::at(
            3,
            "l1-caches",
            graph
                .connect(cpu, PortRole::ICache, l1i, PortRole::CpuSide)
                .and_then(|()| graph.connect(cpu, PortRole::DCache, accelerator, PortRole::CpuSide))
                .and_then(|()| {
                    graph.connect(accelerator, PortRole::MemSide, l1d, PortRole::CpuSide)
                }),
        )?;

        // Step 4: L1-to-L2 bus; the accelerator's DMA port joins it as a
        // second, independent memory path.
        debug!(step = 4, "creating and wiring l1-to-l2 bus");
        let l2_bus = graph.add_component(ComponentKind::Bus, "l2bus");
        AssemblyError::at(
            4,
            "l2-bus",
            graph
                .connect(l1i, PortRole::MemSide, l2_bus, PortRole::CpuSidePorts)
                .and_then(|()| graph.connect(l1d, PortRole::MemSide, l2_bus, PortRole::CpuSidePorts))
                .and_then(|()| {
                    graph.connect(accelerator, PortRole::Dma, l2_bus, PortRole::CpuSidePorts)
                }),
        )?;

        // Step 5: L2 cache behind the bus.
        debug!(step = 5, "creating and wiring l2 cache");
        let l2_cache = graph.add_component(ComponentKind::L2Cache, "l2");
        AssemblyError::at(
            5,
            "l2-cache",
            graph.connect(l2_bus, PortRole::MemSidePorts, l2_cache, PortRole::CpuSide),
        )?;

        // Step 6: system crossbar, plus the CPU interrupt-controller wiring
        // the core requires.
        debug!(step = 6, "creating and wiring system crossbar");
        let mem_bus = graph.add_component(ComponentKind::Bus, "membus");
        AssemblyError::at(
            6,
            "system-bus",
            graph
                .connect(l2_cache, PortRole::MemSide, mem_bus, PortRole::CpuSidePorts)
                .and_then(|()| {
                    graph.connect(cpu, PortRole::IntRequestor, mem_bus, PortRole::CpuSidePorts)
                })
                .and_then(|()| {
                    graph.connect(mem_bus, PortRole::MemSidePorts, cpu, PortRole::IntPio)
                })
                .and_then(|()| {
                    graph.connect(mem_bus, PortRole::MemSidePorts, cpu, PortRole::IntResponder)
                }),
        )?;

        // Step 7: memory controller with DRAM backing sized to the spec.
        // The cacheable DRAM claim collides here if it reaches into the
        // device windows registered in step 2.
        debug!(step = 7, "creating memory controller and dram window");
        let mem_ctrl = graph.add_component(ComponentKind::MemoryController, "mem_ctrl");
        AssemblyError::at(
            7,
            "memory-controller",
            graph.connect(mem_bus, PortRole::MemSidePorts, mem_ctrl, PortRole::CpuSide),
        )?;
        let dram = AssemblyError::at(7, "memory-controller", spec.dram_range())?;
        AssemblyError::at(
            7,
            "memory-controller",
            space.register_window(AddressWindow {
                range: dram,
                cacheable: true,
                owner: mem_ctrl,
            }),
        )?;

        // Step 8: finalize.
        debug!(step = 8, "validating topology");
        AssemblyError::at(8, "validate", graph.validate())?;

        // Step 9: workload binding for the single process context.
        let workload = match &spec.workload {
            Some(path) => Some(AssemblyError::at(9, "workload", Workload::bind(path))?),
            None => None,
        };

        info!(
            components = graph.components().len(),
            edges = graph.edges().len(),
            windows = space.windows().len(),
            "system assembled"
        );

        Ok(System {
            spec,
            address_space: space,
            topology: graph,
            handles: SystemHandles {
                cpu,
                l1i,
                l1d,
                accelerator,
                l2_bus,
                l2_cache,
                mem_bus,
                mem_ctrl,
            },
            workload,
        })
    }
}
