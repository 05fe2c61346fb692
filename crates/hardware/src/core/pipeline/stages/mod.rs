//! Pipeline stage implementations.
//!
//! Every stage is split into two phases driven by the pipeline each cycle:
//! `tick` latches what the upstream stage offered last cycle, and
//! `update_output` computes this cycle's offer to the downstream stage.
//! 1. **Fetch:** Reads records from the instruction source and tags them.
//! 2. **Dispatch:** Unbounded FIFO feeding the reservation station.
//! 3. **Schedule:** Reservation station allocation and oldest-first selection.
//! 4. **Execute:** Functional-unit groups and result-bus arbitration.
//! 5. **Writeback:** Common data bus broadcast and retirement.

/// Dispatch queue stage.
pub mod dispatch;

/// Execute stage.
pub mod execute;

/// Fetch stage.
pub mod fetch;

/// Schedule stage.
pub mod schedule;

/// Common data bus stage.
pub mod writeback;

pub use dispatch::DispatchQueue;
pub use execute::Execute;
pub use fetch::Fetch;
pub use schedule::Schedule;
pub use writeback::CommonDataBus;
