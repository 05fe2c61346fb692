//! Tomasulo out-of-order core simulator library.
//!
//! This crate implements a cycle-accurate model of a Tomasulo-style core:
//! 1. **Core:** Fetch, an unbounded dispatch queue, a unified reservation station with
//!    register renaming, three classes of functional units, and a common data bus.
//! 2. **ISA:** Trace records, fetch-order tags, and the op-code to unit-class routing.
//! 3. **Simulation:** Instruction sources, the simulator facade, timing tables, and the event log.
//! 4. **Configuration and Statistics:** JSON configuration and run-level metrics.
//!
//! ```
//! use tomasim_core::isa::TraceRecord;
//! use tomasim_core::sim::VecSource;
//! use tomasim_core::{Config, Simulator};
//!
//! let source = VecSource::new([TraceRecord::new(0, None, [None, None])]);
//! let mut sim = Simulator::new(&Config::default(), source)?;
//! let stats = sim.run()?;
//! assert_eq!(stats.instructions_retired, 1);
//! assert_eq!(stats.cycles, 5);
//! # Ok::<(), tomasim_core::common::SimError>(())
//! ```

/// Common types and constants (registers, structural sizes, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Out-of-order core (pipeline and functional units).
pub mod core;
/// Instruction model (trace records, tags, operation classes).
pub mod isa;
/// Instruction sources, simulator facade, and recorders.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main simulator type; owns the pipeline and its recorders.
pub use crate::sim::Simulator;
/// Run statistics.
pub use crate::stats::{SimStats, StatsReport};
