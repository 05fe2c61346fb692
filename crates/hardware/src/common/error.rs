//! Error definitions.
//!
//! The simulator is a closed, deterministic model, so the only recoverable
//! failures are at its edges:
//! 1. **Configuration:** A structural parameter is zero, or a config file cannot be loaded.
//! 2. **Trace Input:** The instruction source cannot be read or contains a malformed record.
//! 3. **Simulation:** Either of the above surfacing mid-run, or the event log failing to write.
//!
//! Violations of pipeline invariants are simulator bugs and are checked with
//! `debug_assert!` at the point they would occur.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable configuration. Always reported before the first cycle.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A structural capacity or latency was zero.
    #[error("configuration parameter `{name}` must be a positive integer")]
    ZeroParameter {
        /// Dotted path of the offending field, e.g. `core.k0_units`.
        name: &'static str,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The configuration JSON did not match the expected schema.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure while pulling records from an instruction source.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line did not contain exactly five fields.
    #[error("trace line {line}: expected 5 fields, found {found}")]
    FieldCount {
        /// 1-based line number.
        line: usize,
        /// Number of whitespace-separated fields present.
        found: usize,
    },

    /// A field could not be parsed as a number.
    #[error("trace line {line}: invalid {field} '{value}'")]
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// Which field was malformed.
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// A register number was at or above the architectural register count.
    #[error("trace line {line}: register {reg} out of range (0..{limit})")]
    RegisterOutOfRange {
        /// 1-based line number.
        line: usize,
        /// Register number as written in the trace.
        reg: i64,
        /// Number of architectural registers.
        limit: usize,
    },
}

/// Top-level error returned by the simulator facade.
#[derive(Debug, Error)]
pub enum SimError {
    /// Setup rejected the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The instruction source failed during fetch.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The per-cycle event log could not be written.
    #[error("failed to write event log: {0}")]
    EventLog(#[source] io::Error),
}
