//! Tomasulo out-of-order core simulator CLI.
//!
//! This binary runs one instruction trace through the simulator. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then flag overrides.
//! 2. **Simulation:** Reads the trace from a file or stdin and steps until drained.
//! 3. **Reporting:** Prints the statistics banner (or JSON), and optionally the
//!    per-instruction timing table and a per-cycle event log.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tomasim_core::Simulator;
use tomasim_core::common::SimError;
use tomasim_core::config::Config;
use tomasim_core::sim::{InstructionSource, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo out-of-order core simulator",
    long_about = "Run an instruction trace through a Tomasulo core with a unified reservation station, three functional-unit classes, and a configurable number of result buses.\n\nTrace lines: <hex address> <op code> <dest> <src1> <src2>, with -1 for an absent register.\n\nExamples:\n  tomasim -i traces/gcc.trace\n  tomasim -r 4 -j 2 -k 2 -l 2 -f 8 < traces/gcc.trace\n  tomasim -c core.json --print-trace --debug-log cycles.log -i traces/gcc.trace"
)]
struct Cli {
    /// Number of result buses (R).
    #[arg(short = 'r', long)]
    result_buses: Option<usize>,

    /// Number of k0 functional units.
    #[arg(short = 'j', long = "k0")]
    k0: Option<usize>,

    /// Number of k1 functional units.
    #[arg(short = 'k', long = "k1")]
    k1: Option<usize>,

    /// Number of k2 functional units.
    #[arg(short = 'l', long = "k2")]
    k2: Option<usize>,

    /// Instructions fetched per cycle (F).
    #[arg(short = 'f', long)]
    fetch_width: Option<usize>,

    /// Trace file; stdin when omitted.
    #[arg(short = 'i', long)]
    trace: Option<PathBuf>,

    /// JSON configuration file; flags override its values.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Write the per-cycle event log to this file.
    #[arg(long)]
    debug_log: Option<PathBuf>,

    /// Print the per-instruction timing table after the run.
    #[arg(long)]
    print_trace: bool,

    /// Emit the statistics report as JSON instead of the banner.
    #[arg(long)]
    json: bool,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = build_config(&cli).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if let Err(e) = run(&cli, &config) {
        eprintln!("\n[!] {e}");
        process::exit(1);
    }
}

/// Layers the JSON file (if any) and the command-line overrides over the
/// defaults, then validates the result.
fn build_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let core = &mut config.core;
    let overrides = [
        (&mut core.result_buses, cli.result_buses),
        (&mut core.k0_units, cli.k0),
        (&mut core.k1_units, cli.k1),
        (&mut core.k2_units, cli.k2),
        (&mut core.fetch_width, cli.fetch_width),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }
    if cli.debug_log.is_some() {
        config.general.debug_log.clone_from(&cli.debug_log);
    }
    config.general.record_trace |= cli.print_trace;

    config.validate()?;
    Ok(config)
}

/// Runs the simulation and prints the requested reports.
fn run(cli: &Cli, config: &Config) -> Result<(), Box<dyn Error>> {
    let source: Box<dyn InstructionSource> = match &cli.trace {
        Some(path) => Box::new(TraceReader::open(path)?),
        None => Box::new(TraceReader::new(io::stdin().lock())),
    };

    if !cli.json {
        println!(
            "Processor settings: R={} k0={} k1={} k2={} F={}",
            config.core.result_buses,
            config.core.k0_units,
            config.core.k1_units,
            config.core.k2_units,
            config.core.fetch_width
        );
    }

    let mut sim = Simulator::new(config, source)?;
    if let Some(path) = &config.general.debug_log {
        let file = File::create(path).map_err(SimError::EventLog)?;
        sim = sim.with_event_log(BufWriter::new(file))?;
    }

    let stats = sim.run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.print_trace
        && let Some(trace) = sim.trace()
    {
        trace.write_table(&mut out)?;
    }
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &stats.report())?;
        writeln!(out)?;
    } else {
        drop(out);
        stats.print();
    }
    Ok(())
}
