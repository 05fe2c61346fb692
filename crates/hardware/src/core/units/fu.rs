//! Functional units and per-class unit groups.
//!
//! A unit accepts one selected entry, holds it for its configured latency,
//! and then keeps presenting the finished result until Execute hands it to a
//! result bus and resets the unit. A unit that finished but lost bus
//! arbitration stays busy, so a congested bus back-pressures selection.

use crate::core::pipeline::latches::{Completion, IssueEntry};
use crate::isa::OpClass;

/// A single pipelined-by-one functional unit.
#[derive(Clone, Debug)]
pub struct FunctionalUnit {
    latency: u64,
    cycle: u64,
    current: Option<IssueEntry>,
    issued_at: u64,
    completes_at: u64,
}

impl FunctionalUnit {
    /// Creates an idle unit. A latency of 0 is treated as 1.
    pub const fn new(latency: u64) -> Self {
        Self {
            latency: if latency == 0 { 1 } else { latency },
            cycle: 0,
            current: None,
            issued_at: 0,
            completes_at: 0,
        }
    }

    /// Advances the unit to `cycle`, optionally accepting a new entry.
    ///
    /// A unit given an entry must be idle.
    pub fn tick(&mut self, cycle: u64, entry: Option<IssueEntry>) {
        self.cycle = cycle;
        if let Some(entry) = entry {
            debug_assert!(self.current.is_none(), "issue to busy unit");
            self.current = Some(entry);
            self.issued_at = cycle;
            self.completes_at = cycle.saturating_add(self.latency - 1);
        }
    }

    /// True when the unit holds no entry.
    #[inline]
    pub const fn is_available(&self) -> bool {
        self.current.is_none()
    }

    /// Cycle at which the held entry was latched.
    pub fn issued_at(&self) -> Option<u64> {
        self.current.map(|_| self.issued_at)
    }

    /// The finished result, once the latency has elapsed.
    pub fn completion(&self) -> Option<Completion> {
        let entry = self.current?;
        (self.cycle >= self.completes_at).then_some(Completion {
            slot: entry.slot,
            tag: entry.tag,
            completed_at: self.completes_at,
        })
    }

    /// True when the held entry finished in the current cycle.
    pub fn finished_now(&self) -> bool {
        self.current.is_some() && self.cycle == self.completes_at
    }

    /// Frees the unit, returning whatever it held.
    pub fn reset(&mut self) -> Option<IssueEntry> {
        self.current.take()
    }

    /// Configured latency in cycles.
    pub const fn latency(&self) -> u64 {
        self.latency
    }
}

/// All units serving one [`OpClass`].
#[derive(Clone, Debug)]
pub struct FunctionalGroup {
    class: OpClass,
    units: Vec<FunctionalUnit>,
}

impl FunctionalGroup {
    /// Creates `count` idle units with the given latency.
    pub fn new(class: OpClass, count: usize, latency: u64) -> Self {
        Self {
            class,
            units: vec![FunctionalUnit::new(latency); count],
        }
    }

    /// Class served by this group.
    pub const fn class(&self) -> OpClass {
        self.class
    }

    /// Advances every unit to `cycle` and places `entries` on idle units in
    /// index order.
    ///
    /// Selection never exceeds [`free_units`](Self::free_units), so every
    /// entry finds a unit.
    pub fn tick(&mut self, cycle: u64, entries: &[IssueEntry]) {
        let mut pending = entries.iter().copied();
        for unit in &mut self.units {
            let entry = if unit.is_available() {
                pending.next()
            } else {
                None
            };
            unit.tick(cycle, entry);
        }
        debug_assert!(
            pending.next().is_none(),
            "{} selections exceed idle units",
            self.class
        );
    }

    /// Number of idle units.
    pub fn free_units(&self) -> usize {
        self.units.iter().filter(|u| u.is_available()).count()
    }

    /// Number of units holding an entry.
    pub fn busy_units(&self) -> usize {
        self.units.len() - self.free_units()
    }

    /// True when no unit holds an entry.
    pub fn is_idle(&self) -> bool {
        self.units.iter().all(FunctionalUnit::is_available)
    }

    /// Finished results with the index of the unit holding each.
    pub fn completed(&self) -> Vec<(usize, Completion)> {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(index, unit)| unit.completion().map(|c| (index, c)))
            .collect()
    }

    /// Frees unit `index`.
    pub fn release(&mut self, index: usize) -> Option<IssueEntry> {
        self.units[index].reset()
    }

    /// Read access to the units.
    pub fn units(&self) -> &[FunctionalUnit] {
        &self.units
    }
}
