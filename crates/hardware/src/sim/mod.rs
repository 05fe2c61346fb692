//! Simulation front end.
//!
//! Ties a validated configuration and an instruction source to the pipeline,
//! and collects statistics, per-instruction timing, and the event log.

/// Top-level simulator facade.
pub mod simulator;

/// Instruction sources and the text trace parser.
pub mod source;

/// Per-instruction timing table and per-cycle event log.
pub mod trace;

pub use simulator::Simulator;
pub use source::{InstructionSource, TraceReader, VecSource};
pub use trace::{EventLog, InstTrace, StageTimes};
