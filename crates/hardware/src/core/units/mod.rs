//! Execution units.
//!
//! Units carry no operation semantics; they model occupancy and latency only.

/// Functional units and per-class groups.
pub mod fu;

pub use fu::{FunctionalGroup, FunctionalUnit};
