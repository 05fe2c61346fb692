//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every pipeline stage:
//! 1. **Constants:** Structural sizes (register count, slots per unit, class count).
//! 2. **Error Handling:** Configuration, trace, and simulation error types.
//! 3. **Registers:** A strong type for architectural register identifiers.

/// Structural constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, trace parsing, and simulation.
pub mod error;

/// Architectural register identifiers.
pub mod reg;

pub use constants::{NUM_ARCH_REGISTERS, NUM_OP_CLASSES, RS_SLOTS_PER_UNIT};
pub use error::{ConfigError, SimError, TraceError};
pub use reg::ArchReg;
