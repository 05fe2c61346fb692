//! Pipeline driver.
//!
//! Owns the five stages and advances them one cycle at a time in two phases:
//! 1. **`tick`:** Every stage latches what its upstream stage offered in the
//!    previous cycle. Latching reads only the previous cycle's offers, so the
//!    order of these calls does not matter.
//! 2. **`update_output`:** Stages compute this cycle's offers in dependency
//!    order: fetch, dispatch (needs free slots), execute (frees units),
//!    broadcast (frees slots, wakes operands), then selection (needs idle
//!    units and woken operands).

use tracing::{debug, trace};

use crate::common::TraceError;
use crate::config::CoreConfig;
use crate::core::pipeline::stages::{CommonDataBus, DispatchQueue, Execute, Fetch, Schedule};
use crate::sim::source::InstructionSource;

/// The complete Tomasulo pipeline.
#[derive(Debug)]
pub struct Pipeline {
    cycle: u64,
    fetch: Fetch,
    dispatch: DispatchQueue,
    schedule: Schedule,
    execute: Execute,
    cdb: CommonDataBus,
}

impl Pipeline {
    /// Builds the stages and runs the initial output phase.
    ///
    /// The configuration is assumed to be validated.
    pub fn new(config: &CoreConfig, source: Box<dyn InstructionSource>) -> Self {
        debug!(
            rs_slots = config.rs_capacity(),
            result_buses = config.result_buses,
            fetch_width = config.fetch_width,
            "building pipeline"
        );
        let mut pipeline = Self {
            cycle: 0,
            fetch: Fetch::new(source, config.fetch_width),
            dispatch: DispatchQueue::new(),
            schedule: Schedule::new(config.rs_capacity()),
            execute: Execute::new(config),
            cdb: CommonDataBus::new(config.result_buses),
        };
        pipeline.update_output();
        pipeline
    }

    /// Advances the cycle counter and latches every stage.
    ///
    /// The source is read first. If it fails, no other stage has latched and
    /// the cycle counter is unchanged, so the tick can be retried.
    pub fn tick(&mut self) -> Result<(), TraceError> {
        self.fetch.tick()?;
        self.cycle += 1;
        self.cdb.tick(&self.execute.take_writeback());
        self.execute.tick(self.cycle, self.schedule.selections());
        self.schedule.tick(self.dispatch.take_offer());
        self.dispatch.tick(self.fetch.take_offer());
        Ok(())
    }

    /// Computes every stage's output for the current cycle.
    pub fn update_output(&mut self) {
        self.fetch.update_output();
        self.dispatch.update_output(self.schedule.free_slots());
        self.execute.update_output(self.cdb.available_buses());
        let (station, producers) = self.schedule.parts_mut();
        self.cdb.update_output(station, producers);
        let available = self.execute.free_units();
        let _ = self.schedule.update_output(available);

        trace!(
            cycle = self.cycle,
            dispatch_queue = self.dispatch.len(),
            rs_busy = self.schedule.station().busy_slots(),
            selected = self.schedule.selected_tags().len(),
            retired = self.cdb.retired_tags().len(),
            "cycle complete"
        );
        #[cfg(debug_assertions)]
        self.check_invariants();
    }

    /// One full cycle: [`tick`](Self::tick) then [`update_output`](Self::update_output).
    pub fn step(&mut self) -> Result<(), TraceError> {
        self.tick()?;
        self.update_output();
        Ok(())
    }

    /// True once the source is exhausted and no instruction remains anywhere.
    pub fn is_drained(&self) -> bool {
        self.fetch.is_exhausted()
            && self.fetch.is_empty()
            && self.dispatch.is_empty()
            && self.schedule.station().is_empty()
            && self.schedule.selections().is_empty()
            && self.execute.is_idle()
            && self.execute.writeback().is_empty()
            && self.cdb.is_idle()
    }

    /// Current cycle; 0 before the first tick.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Instructions retired so far.
    pub const fn retired(&self) -> u64 {
        self.cdb.retired()
    }

    /// The fetch stage.
    pub const fn fetch(&self) -> &Fetch {
        &self.fetch
    }

    /// The dispatch queue.
    pub const fn dispatch(&self) -> &DispatchQueue {
        &self.dispatch
    }

    /// The schedule stage, with the reservation station and producer table.
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The execute stage.
    pub const fn execute(&self) -> &Execute {
        &self.execute
    }

    /// The common data bus.
    pub const fn cdb(&self) -> &CommonDataBus {
        &self.cdb
    }

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        use crate::common::ArchReg;
        use crate::common::constants::NUM_ARCH_REGISTERS;
        use crate::core::pipeline::reservation_station::RsSlot;

        let station = self.schedule.station();
        for (index, entry) in station.entries().iter().enumerate() {
            for operand in entry.operands.iter().flatten() {
                debug_assert!(
                    !entry.busy || station.entry(*operand).busy,
                    "rs{index} waits on free slot {operand}"
                );
            }
            if !entry.busy {
                debug_assert!(
                    !self.schedule.producers().references(RsSlot(index)),
                    "producer table names free slot rs{index}"
                );
            }
        }
        for index in 0..NUM_ARCH_REGISTERS {
            if let Some(reg) = ArchReg::new(index)
                && let Some(slot) = self.schedule.producers().producer(reg)
            {
                debug_assert!(station.entry(slot).busy, "{reg} maps to free {slot}");
            }
        }
    }
}
