//! Core processor implementation.
//!
//! This module contains the out-of-order core: the Tomasulo pipeline and the
//! functional units it issues to.

/// Tomasulo pipeline (stages, reservation station, producer table, driver).
pub mod pipeline;

/// Functional units and per-class unit groups.
pub mod units;

pub use self::pipeline::Pipeline;
