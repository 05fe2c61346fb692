//! Reservation station.
//!
//! A fixed-capacity table of in-flight instruction slots, and the
//! authoritative owner of every instruction between dispatch and retirement.
//! It provides:
//! 1. **Allocation:** First free slot (lowest index), operand binding through the producer table.
//! 2. **Selection:** Oldest-first choice of ready entries per class, bounded by idle units.
//! 3. **Wakeup and Retirement:** Clearing operand references to a retiring slot, then freeing it.
//!
//! Operand dependencies are [`RsSlot`] indices, not pointers. A slot is only
//! freed after every reference to it has been cleared, so a recycled slot can
//! never be mistaken for its previous occupant.

use std::fmt;

use tracing::trace;

use crate::core::pipeline::latches::{IssueEntry, Selections};
use crate::core::pipeline::scoreboard::ProducerTable;
use crate::isa::{Instruction, OpClass, Tag};

/// Stable index of a reservation-station slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RsSlot(pub usize);

impl fmt::Display for RsSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rs{}", self.0)
    }
}

/// One reservation-station slot.
#[derive(Debug)]
pub struct RsEntry {
    /// Slot is occupied, from allocation until retirement.
    pub busy: bool,
    /// Operation class of the held instruction.
    pub op: OpClass,
    /// Already selected for execution during this occupancy.
    pub executed: bool,
    /// Outstanding producer of each source operand; `None` when ready.
    pub operands: [Option<RsSlot>; 2],
    /// The owned instruction, present while `busy`.
    pub inst: Option<Instruction>,
}

impl RsEntry {
    const fn vacant() -> Self {
        Self {
            busy: false,
            op: OpClass::K0,
            executed: false,
            operands: [None, None],
            inst: None,
        }
    }

    /// Both operands available.
    #[inline]
    pub fn operands_ready(&self) -> bool {
        self.operands.iter().all(Option::is_none)
    }

    /// Occupied, not yet selected, and both operands available.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.busy && !self.executed && self.operands_ready()
    }

    /// Tag of the held instruction.
    pub fn tag(&self) -> Option<Tag> {
        self.inst.as_ref().map(|inst| inst.tag)
    }
}

/// Fixed-capacity reservation station.
#[derive(Debug)]
pub struct ReservationStation {
    entries: Vec<RsEntry>,
    selections: Selections,
}

impl ReservationStation {
    /// Creates a station with `capacity` vacant slots.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, RsEntry::vacant);
        Self {
            entries,
            selections: Selections::default(),
        }
    }

    /// Total slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Slots not currently busy.
    pub fn free_slots(&self) -> usize {
        self.entries.iter().filter(|e| !e.busy).count()
    }

    /// Slots currently busy.
    pub fn busy_slots(&self) -> usize {
        self.capacity() - self.free_slots()
    }

    /// True when every slot is busy.
    pub fn is_full(&self) -> bool {
        self.entries.iter().all(|e| e.busy)
    }

    /// True when no slot is busy.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| !e.busy)
    }

    /// Read access to a slot.
    pub fn entry(&self, slot: RsSlot) -> &RsEntry {
        &self.entries[slot.0]
    }

    /// All slots in index order.
    pub fn entries(&self) -> &[RsEntry] {
        &self.entries
    }

    /// The lowest-index free slot.
    pub fn first_free(&self) -> Option<RsSlot> {
        self.entries.iter().position(|e| !e.busy).map(RsSlot)
    }

    /// True when any busy entry still waits on `slot`.
    pub fn is_referenced(&self, slot: RsSlot) -> bool {
        self.entries
            .iter()
            .any(|e| e.busy && e.operands.contains(&Some(slot)))
    }

    /// Allocates the first free slot for `inst` and renames its registers.
    ///
    /// Each source operand binds to the register's pending producer, if any.
    /// The destination register is then claimed for the new slot even when an
    /// older producer is still outstanding. Sources are read before the
    /// destination is claimed, so an instruction never depends on itself.
    ///
    /// A full station hands the instruction back unchanged. Dispatch never
    /// offers more than [`free_slots`](Self::free_slots), so this does not
    /// happen in a running pipeline.
    pub fn insert(
        &mut self,
        inst: Instruction,
        producers: &mut ProducerTable,
    ) -> Result<RsSlot, Instruction> {
        let Some(slot) = self.first_free() else {
            return Err(inst);
        };
        debug_assert!(
            !self.is_referenced(slot),
            "{slot} reallocated while still referenced"
        );

        let operands = inst.src.map(|src| src.and_then(|reg| producers.producer(reg)));
        if let Some(dest) = inst.dest {
            producers.set_producer(dest, slot);
        }

        self.entries[slot.0] = RsEntry {
            busy: true,
            op: inst.op,
            executed: false,
            operands,
            inst: Some(inst),
        };
        Ok(slot)
    }

    /// Selects ready entries for execution, oldest first within each class.
    ///
    /// `available[c]` bounds how many entries of class `c` may be selected,
    /// i.e. the number of idle units in that group. Selected entries are
    /// marked `executed` so they are never selected twice.
    pub fn select(&mut self, available: [usize; 3]) -> &Selections {
        self.selections.clear();

        let mut ready: [Vec<(Tag, RsSlot)>; 3] = Default::default();
        for (index, entry) in self.entries.iter().enumerate() {
            if !entry.is_ready() {
                continue;
            }
            if let Some(tag) = entry.tag() {
                ready[entry.op.index()].push((tag, RsSlot(index)));
            }
        }

        for class in OpClass::ALL {
            let candidates = &mut ready[class.index()];
            candidates.sort_unstable();
            let limit = available[class.index()];
            for &(tag, slot) in candidates.iter().take(limit) {
                let entry = &mut self.entries[slot.0];
                debug_assert!(entry.is_ready(), "{slot} selected while not ready");
                entry.executed = true;
                self.selections.push(class, IssueEntry { slot, tag });
            }
            if candidates.len() > limit {
                trace!(
                    class = %class,
                    waiting = candidates.len() - limit,
                    "ready entries held back for lack of units"
                );
            }
        }

        &self.selections
    }

    /// Entries selected by the most recent [`select`](Self::select).
    #[inline]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Clears every operand reference to `slot` across the whole table.
    ///
    /// Returns the number of operands woken.
    pub fn wake_dependents(&mut self, slot: RsSlot) -> usize {
        let mut woken = 0;
        for entry in &mut self.entries {
            for operand in &mut entry.operands {
                if *operand == Some(slot) {
                    *operand = None;
                    woken += 1;
                }
            }
        }
        woken
    }

    /// Retires `slot`: wakes its dependents, frees the slot, and hands back
    /// the instruction it owned.
    pub fn retire(&mut self, slot: RsSlot) -> Option<Instruction> {
        let woken = self.wake_dependents(slot);
        let entry = &mut self.entries[slot.0];
        debug_assert!(entry.busy, "retiring free slot {slot}");
        debug_assert!(entry.executed, "retiring {slot} before it executed");
        entry.busy = false;
        let inst = entry.inst.take();
        trace!(%slot, woken, "slot freed");
        inst
    }
}
