//! Inter-stage latch payloads.
//!
//! Instructions themselves move by ownership (fetch queue → dispatch queue →
//! reservation station). Past the station only small `Copy` handles travel:
//! 1. **`IssueEntry`:** A slot selected for execution, Schedule → Execute.
//! 2. **`Completion`:** A finished result, Execute → Common Data Bus.
//! 3. **`Selections`:** The three per-class issue lists produced each cycle.

use crate::common::constants::NUM_OP_CLASSES;
use crate::core::pipeline::reservation_station::RsSlot;
use crate::isa::{OpClass, Tag};

/// A reservation-station entry picked for execution this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssueEntry {
    /// Slot holding the instruction.
    pub slot: RsSlot,
    /// Tag of the instruction in that slot.
    pub tag: Tag,
}

/// A result waiting for, or travelling on, a result bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Producing slot; dependents hold references to it.
    pub slot: RsSlot,
    /// Tag of the producing instruction.
    pub tag: Tag,
    /// Cycle at which the functional unit finished.
    pub completed_at: u64,
}

impl Completion {
    /// Broadcast priority: earlier completion first, then lower tag.
    #[inline]
    pub const fn age_key(&self) -> (u64, Tag) {
        (self.completed_at, self.tag)
    }
}

/// Per-class lists of entries selected for execution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    lists: [Vec<IssueEntry>; NUM_OP_CLASSES],
}

impl Selections {
    /// Entries selected for `class`, oldest first.
    #[inline]
    pub fn get(&self, class: OpClass) -> &[IssueEntry] {
        &self.lists[class.index()]
    }

    /// Appends an entry to `class`'s list.
    pub fn push(&mut self, class: OpClass, entry: IssueEntry) {
        self.lists[class.index()].push(entry);
    }

    /// Empties all three lists.
    pub fn clear(&mut self) {
        for list in &mut self.lists {
            list.clear();
        }
    }

    /// Total entries across all classes.
    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// True when no class has a selection.
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Iterates every selection with its class, class by class.
    pub fn iter(&self) -> impl Iterator<Item = (OpClass, &IssueEntry)> + '_ {
        OpClass::ALL
            .into_iter()
            .flat_map(move |class| self.get(class).iter().map(move |entry| (class, entry)))
    }
}
