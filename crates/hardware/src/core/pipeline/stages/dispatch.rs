//! Dispatch Queue Stage.
//!
//! An unbounded FIFO between fetch and the reservation station. Each cycle it
//! appends fetch's offer and then offers as many head entries as the
//! reservation station has free slots. Occupancy after enqueue is sampled
//! every cycle for the average and peak queue statistics.

use std::collections::VecDeque;
use std::mem;

use crate::isa::{Instruction, Tag};

/// The dispatch queue.
#[derive(Debug, Default)]
pub struct DispatchQueue {
    queue: VecDeque<Instruction>,
    offer: Vec<Instruction>,
    enqueued_tags: Vec<Tag>,
    offered_tags: Vec<Tag>,
    occupancy_total: u64,
    peak: usize,
}

impl DispatchQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends fetch's offer and samples occupancy.
    pub fn tick(&mut self, incoming: Vec<Instruction>) {
        self.enqueued_tags.clear();
        for inst in incoming {
            self.enqueued_tags.push(inst.tag);
            self.queue.push_back(inst);
        }
        self.occupancy_total += self.queue.len() as u64;
        self.peak = self.peak.max(self.queue.len());
    }

    /// Offers up to `free_slots` instructions from the head, in order.
    pub fn update_output(&mut self, free_slots: usize) {
        self.offer.clear();
        self.offered_tags.clear();
        let count = free_slots.min(self.queue.len());
        for inst in self.queue.drain(..count) {
            self.offered_tags.push(inst.tag);
            self.offer.push(inst);
        }
    }

    /// Hands the current offer to the reservation station.
    pub fn take_offer(&mut self) -> Vec<Instruction> {
        mem::take(&mut self.offer)
    }

    /// Instructions currently on offer.
    pub fn offer(&self) -> &[Instruction] {
        &self.offer
    }

    /// Tags appended by the last [`tick`](Self::tick).
    pub fn enqueued_tags(&self) -> &[Tag] {
        &self.enqueued_tags
    }

    /// Tags offered by the last [`update_output`](Self::update_output).
    pub fn offered_tags(&self) -> &[Tag] {
        &self.offered_tags
    }

    /// Instructions waiting in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when the queue and offer are both empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty() && self.offer.is_empty()
    }

    /// Sum over all cycles of the post-enqueue occupancy.
    pub const fn occupancy_total(&self) -> u64 {
        self.occupancy_total
    }

    /// Largest post-enqueue occupancy seen.
    pub const fn peak(&self) -> usize {
        self.peak
    }
}
