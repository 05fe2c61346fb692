//! Tomasulo pipeline.
//!
//! This module contains the out-of-order core. It includes:
//! 1. **Engine:** The two-phase cycle driver tying the stages together.
//! 2. **Latches:** Handles passed between stages past the reservation station.
//! 3. **Reservation Station:** In-flight instruction slots and selection.
//! 4. **Scoreboard:** The register producer table used for renaming.
//! 5. **Stages:** Fetch, Dispatch, Schedule, Execute, and the result bus.

/// Two-phase pipeline driver.
pub mod engine;

/// Inter-stage handles.
pub mod latches;

/// Reservation station slots, selection, and wakeup.
pub mod reservation_station;

/// Register producer table.
pub mod scoreboard;

/// Pipeline stage implementations.
pub mod stages;

pub use engine::Pipeline;
