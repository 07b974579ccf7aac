//! System topology assembler CLI.
//!
//! This binary is the front end for the assembler. It performs:
//! 1. **Check:** Load a `SystemSpec` (JSON file or built-in defaults),
//!    assemble and validate it, and print the topology and address-map
//!    report — or the step-tagged failure.
//! 2. **Spec:** Print the built-in default spec as JSON, as a starting point
//!    for editing.

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, Subcommand};

use socforge_core::topology::port::PortId;
use socforge_core::{System, SystemAssembler, SystemSpec};

#[derive(Parser, Debug)]
#[command(
    name = "socforge",
    author,
    version,
    about = "Simulated-hardware system topology assembler and address map validator",
    long_about = "Assemble a CPU/cache/accelerator/DRAM system model from a spec and validate its \
                  interconnect graph and physical address map.\n\nExamples:\n  socforge check\n  \
                  socforge check --spec system.json\n  socforge spec > system.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble a system from a spec and report the validated model.
    Check {
        /// Spec file (JSON). Built-in defaults are used when omitted.
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Workload binary to bind; overrides the spec's `workload` field.
        #[arg(short, long)]
        workload: Option<PathBuf>,
    },

    /// Print the built-in default spec as JSON.
    Spec,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check { spec, workload } => cmd_check(spec, workload),
        Commands::Spec => cmd_spec(),
    }
}

/// Loads the spec, runs assembly, and prints the report or the failure.
fn cmd_check(spec_path: Option<PathBuf>, workload: Option<PathBuf>) {
    let mut spec = match spec_path {
        Some(path) => load_spec(&path),
        None => SystemSpec::default(),
    };
    if workload.is_some() {
        spec.workload = workload;
    }

    match SystemAssembler::assemble(spec) {
        Ok(system) => print_report(&system),
        Err(e) => {
            eprintln!("[!] {e}");
            process::exit(1);
        }
    }
}

/// Prints the built-in default spec as pretty JSON.
fn cmd_spec() {
    match serde_json::to_string_pretty(&SystemSpec::default()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("[!] cannot serialize default spec: {e}");
            process::exit(1);
        }
    }
}

/// Reads and parses a JSON spec file; exits with a message on failure.
fn load_spec(path: &PathBuf) -> SystemSpec {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("[!] cannot read spec file '{}': {e}", path.display());
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("[!] cannot parse spec file '{}': {e}", path.display());
        process::exit(1);
    })
}

/// Prints the address map, component wiring, and workload of a valid system.
fn print_report(system: &System) {
    let spec = system.spec();
    println!("system: OK");
    println!(
        "  clock {} MHz, {} mV, {}-bit physical addresses",
        spec.clock_mhz, spec.voltage_mv, spec.phys_addr_bits
    );

    println!("address map:");
    for window in system.address_space().windows() {
        let owner = system.topology().component(window.owner);
        println!(
            "  {:<28} {:<14} {}",
            window.range.to_string(),
            if window.cacheable {
                "cacheable"
            } else {
                "non-cacheable"
            },
            owner.name
        );
    }

    println!("topology:");
    for comp in system.topology().components() {
        println!("  {} ({})", comp.name, comp.kind);
        for (index, port) in comp.ports.iter().enumerate() {
            let pid = PortId {
                component: comp.id,
                index,
            };
            let peers = system.topology().bound_count(pid);
            let status = match (peers, port.optional) {
                (0, true) => "unbound (optional)".to_string(),
                (0, false) => "unbound".to_string(),
                (1, _) => "bound".to_string(),
                (n, _) => format!("bound x{n}"),
            };
            println!(
                "    {:<16} {:<10} {status}",
                port.role.to_string(),
                port.side.to_string()
            );
        }
    }

    match system.workload() {
        Some(w) => println!("workload: {} (entry {:#x})", w.path.display(), w.entry),
        None => println!("workload: none bound"),
    }
}
