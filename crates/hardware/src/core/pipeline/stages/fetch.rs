//! Instruction Fetch Stage.
//!
//! Pulls up to `fetch_width` records per cycle from the instruction source,
//! stamps each with the next fetch tag, and offers the batch to dispatch.
//! Fetch never stalls: the dispatch queue downstream is unbounded.

use std::collections::VecDeque;
use std::{fmt, mem};

use tracing::{debug, trace};

use crate::common::TraceError;
use crate::isa::{Instruction, Tag};
use crate::sim::source::InstructionSource;

/// The fetch stage and its instruction source.
pub struct Fetch {
    source: Box<dyn InstructionSource>,
    width: usize,
    next_tag: u64,
    exhausted: bool,
    latched: VecDeque<Instruction>,
    offer: Vec<Instruction>,
    offered_tags: Vec<Tag>,
}

impl fmt::Debug for Fetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetch")
            .field("width", &self.width)
            .field("next_tag", &self.next_tag)
            .field("exhausted", &self.exhausted)
            .field("latched", &self.latched.len())
            .field("offer", &self.offer.len())
            .finish_non_exhaustive()
    }
}

impl Fetch {
    /// Creates a fetch stage reading `width` records per cycle from `source`.
    pub fn new(source: Box<dyn InstructionSource>, width: usize) -> Self {
        Self {
            source,
            width,
            next_tag: 0,
            exhausted: false,
            latched: VecDeque::with_capacity(width),
            offer: Vec::with_capacity(width),
            offered_tags: Vec::with_capacity(width),
        }
    }

    /// Reads up to `width` records from the source.
    ///
    /// Once the source reports end of stream it is never polled again.
    pub fn tick(&mut self) -> Result<(), TraceError> {
        for _ in 0..self.width {
            if self.exhausted {
                break;
            }
            match self.source.next_instruction()? {
                Some(record) => {
                    let tag = Tag(self.next_tag);
                    self.next_tag += 1;
                    trace!(%tag, op = record.op_code, "fetched");
                    self.latched.push_back(Instruction::from_record(record, tag));
                }
                None => {
                    debug!(fetched = self.next_tag, "instruction source exhausted");
                    self.exhausted = true;
                }
            }
        }
        Ok(())
    }

    /// Offers this cycle's fetched instructions to dispatch.
    pub fn update_output(&mut self) {
        self.offer.clear();
        self.offered_tags.clear();
        for _ in 0..self.width {
            let Some(inst) = self.latched.pop_front() else {
                break;
            };
            self.offered_tags.push(inst.tag);
            self.offer.push(inst);
        }
    }

    /// Hands the current offer to dispatch, leaving it empty.
    pub fn take_offer(&mut self) -> Vec<Instruction> {
        mem::take(&mut self.offer)
    }

    /// Instructions currently on offer.
    pub fn offer(&self) -> &[Instruction] {
        &self.offer
    }

    /// Tags offered by the last [`update_output`](Self::update_output).
    pub fn offered_tags(&self) -> &[Tag] {
        &self.offered_tags
    }

    /// True once the source has reported end of stream.
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// True when nothing is latched or on offer.
    pub fn is_empty(&self) -> bool {
        self.latched.is_empty() && self.offer.is_empty()
    }

    /// Number of instructions fetched so far.
    pub const fn fetched(&self) -> u64 {
        self.next_tag
    }
}
