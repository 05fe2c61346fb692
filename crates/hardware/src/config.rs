//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! core. It provides:
//! 1. **Defaults:** The reference machine (`k0=1, k1=2, k2=3, R=8, f=4`, unit latency 1).
//! 2. **Structures:** General (observability) and core (structural) settings.
//! 3. **Validation:** Setup-time rejection of non-positive structural parameters.
//!
//! Configuration is supplied as JSON (every field optional) or built with
//! `Config::default()` and overridden field by field, as the CLI does.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::RS_SLOTS_PER_UNIT;
use crate::common::error::ConfigError;
use crate::isa::OpClass;

/// Default configuration constants for the simulator.
mod defaults {
    /// Result buses on the common data bus (`R`).
    pub const RESULT_BUSES: usize = 8;

    /// Functional units serving class K0.
    pub const K0_UNITS: usize = 1;

    /// Functional units serving class K1.
    pub const K1_UNITS: usize = 2;

    /// Functional units serving class K2.
    pub const K2_UNITS: usize = 3;

    /// Instructions fetched per cycle.
    pub const FETCH_WIDTH: usize = 4;

    /// Execution latency of every functional unit, in cycles.
    pub const LATENCY: u64 = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::Config;
///
/// let json = r#"{
///     "general": { "record_trace": true },
///     "core": {
///         "result_buses": 2,
///         "k0_units": 1,
///         "k1_units": 1,
///         "k2_units": 1,
///         "fetch_width": 8,
///         "latency": { "k2": 3 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.record_trace);
/// assert_eq!(config.core.result_buses, 2);
/// assert_eq!(config.core.latency.k0, 1);
/// assert_eq!(config.core.latency.k2, 3);
/// assert_eq!(config.core.rs_capacity(), 6);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Observability settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Structural parameters of the core.
    #[serde(default)]
    pub core: CoreConfig,
}

impl Config {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks that every structural parameter is positive.
    ///
    /// Called by setup before any state is built; a failure here is fatal for
    /// the run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.core.validate()
    }
}

/// Observability settings. None of these affect simulated timing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Record per-instruction stage timestamps.
    #[serde(default)]
    pub record_trace: bool,

    /// Write the per-cycle event log to this file.
    #[serde(default)]
    pub debug_log: Option<PathBuf>,
}

/// Structural parameters of the core.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Result buses on the common data bus (`R`).
    #[serde(default = "CoreConfig::default_result_buses")]
    pub result_buses: usize,

    /// Functional units of class K0.
    #[serde(default = "CoreConfig::default_k0_units")]
    pub k0_units: usize,

    /// Functional units of class K1.
    #[serde(default = "CoreConfig::default_k1_units")]
    pub k1_units: usize,

    /// Functional units of class K2.
    #[serde(default = "CoreConfig::default_k2_units")]
    pub k2_units: usize,

    /// Instructions fetched per cycle (`f`).
    #[serde(default = "CoreConfig::default_fetch_width")]
    pub fetch_width: usize,

    /// Per-class execution latency.
    #[serde(default)]
    pub latency: LatencyConfig,
}

impl CoreConfig {
    /// Returns the default result bus count.
    fn default_result_buses() -> usize {
        defaults::RESULT_BUSES
    }

    /// Returns the default K0 unit count.
    fn default_k0_units() -> usize {
        defaults::K0_UNITS
    }

    /// Returns the default K1 unit count.
    fn default_k1_units() -> usize {
        defaults::K1_UNITS
    }

    /// Returns the default K2 unit count.
    fn default_k2_units() -> usize {
        defaults::K2_UNITS
    }

    /// Returns the default fetch width.
    fn default_fetch_width() -> usize {
        defaults::FETCH_WIDTH
    }

    /// Number of functional units serving `class`.
    pub const fn units(&self, class: OpClass) -> usize {
        match class {
            OpClass::K0 => self.k0_units,
            OpClass::K1 => self.k1_units,
            OpClass::K2 => self.k2_units,
        }
    }

    /// Total functional units across all classes.
    pub const fn total_units(&self) -> usize {
        self.k0_units + self.k1_units + self.k2_units
    }

    /// Reservation-station capacity: a fixed multiple of the unit count.
    pub const fn rs_capacity(&self) -> usize {
        RS_SLOTS_PER_UNIT * self.total_units()
    }

    /// Checks that every count and latency is positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("core.result_buses", self.result_buses),
            ("core.k0_units", self.k0_units),
            ("core.k1_units", self.k1_units),
            ("core.k2_units", self.k2_units),
            ("core.fetch_width", self.fetch_width),
        ];
        if let Some(&(name, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroParameter { name });
        }
        self.latency.validate()
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            result_buses: defaults::RESULT_BUSES,
            k0_units: defaults::K0_UNITS,
            k1_units: defaults::K1_UNITS,
            k2_units: defaults::K2_UNITS,
            fetch_width: defaults::FETCH_WIDTH,
            latency: LatencyConfig::default(),
        }
    }
}

/// Execution latency of each functional-unit class, in cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatencyConfig {
    /// Latency of K0 units.
    #[serde(default = "LatencyConfig::default_latency")]
    pub k0: u64,
    /// Latency of K1 units.
    #[serde(default = "LatencyConfig::default_latency")]
    pub k1: u64,
    /// Latency of K2 units.
    #[serde(default = "LatencyConfig::default_latency")]
    pub k2: u64,
}

impl LatencyConfig {
    /// Returns the default unit latency.
    fn default_latency() -> u64 {
        defaults::LATENCY
    }

    /// Latency of units serving `class`.
    pub const fn of(&self, class: OpClass) -> u64 {
        match class {
            OpClass::K0 => self.k0,
            OpClass::K1 => self.k1,
            OpClass::K2 => self.k2,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let latencies = [
            ("core.latency.k0", self.k0),
            ("core.latency.k1", self.k1),
            ("core.latency.k2", self.k2),
        ];
        match latencies.iter().find(|(_, value)| *value == 0) {
            Some(&(name, _)) => Err(ConfigError::ZeroParameter { name }),
            None => Ok(()),
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            k0: defaults::LATENCY,
            k1: defaults::LATENCY,
            k2: defaults::LATENCY,
        }
    }
}
