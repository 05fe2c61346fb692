//! Common Data Bus Stage.
//!
//! The bus latches the results Execute granted last cycle, one per channel.
//! Its output phase broadcasts each: every waiting operand on that slot
//! becomes ready, the slot is freed, and the destination register forgets the
//! slot unless a younger writer has claimed it since.
//! Instructions are dropped here; this is the end of their lifetime.

use tracing::debug;

use crate::core::pipeline::latches::Completion;
use crate::core::pipeline::reservation_station::ReservationStation;
use crate::core::pipeline::scoreboard::ProducerTable;
use crate::isa::Tag;

/// The common data bus.
#[derive(Clone, Debug)]
pub struct CommonDataBus {
    channels: Vec<Option<Completion>>,
    retired_tags: Vec<Tag>,
    retired: u64,
}

impl CommonDataBus {
    /// Creates a bus with `result_buses` channels.
    pub fn new(result_buses: usize) -> Self {
        Self {
            channels: vec![None; result_buses],
            retired_tags: Vec::new(),
            retired: 0,
        }
    }

    /// Channels available to Execute each cycle.
    ///
    /// Every channel is drained in the same cycle it is filled, so the full
    /// width is always available.
    pub fn available_buses(&self) -> usize {
        self.channels.len()
    }

    /// Latches granted results onto channels.
    pub fn tick(&mut self, granted: &[Completion]) {
        debug_assert!(granted.len() <= self.channels.len(), "more results than buses");
        for (channel, done) in self.channels.iter_mut().zip(granted) {
            *channel = Some(*done);
        }
    }

    /// Broadcasts and retires every latched result, in channel order.
    pub fn update_output(
        &mut self,
        station: &mut ReservationStation,
        producers: &mut ProducerTable,
    ) {
        self.retired_tags.clear();
        for channel in &mut self.channels {
            let Some(done) = channel.take() else {
                continue;
            };
            let inst = station.retire(done.slot);
            debug_assert_eq!(inst.as_ref().map(|i| i.tag), Some(done.tag));
            let dest = inst.and_then(|i| i.dest);
            if let Some(reg) = dest {
                producers.clear_if_match(reg, done.slot);
            }
            debug!(tag = %done.tag, slot = %done.slot, ?dest, "retired");
            self.retired_tags.push(done.tag);
            self.retired += 1;
        }
    }

    /// True when no channel holds a result.
    pub fn is_idle(&self) -> bool {
        self.channels.iter().all(Option::is_none)
    }

    /// Tags retired by the last [`update_output`](Self::update_output).
    pub fn retired_tags(&self) -> &[Tag] {
        &self.retired_tags
    }

    /// Total instructions retired.
    pub const fn retired(&self) -> u64 {
        self.retired
    }
}
