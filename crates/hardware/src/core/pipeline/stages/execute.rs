//! Execute Stage.
//!
//! Holds one [`FunctionalGroup`] per operation class. The tick phase places
//! last cycle's selections on idle units. The output phase gathers every
//! finished result, orders them by (completion cycle, tag), grants the
//! oldest ones a result bus, and frees the units that were granted.

use std::mem;

use tracing::trace;

use crate::config::CoreConfig;
use crate::core::pipeline::latches::{Completion, Selections};
use crate::core::units::fu::FunctionalGroup;
use crate::isa::{OpClass, Tag};

/// The execute stage.
#[derive(Clone, Debug)]
pub struct Execute {
    groups: [FunctionalGroup; 3],
    writeback: Vec<Completion>,
    latched_tags: Vec<Tag>,
    finished_tags: Vec<Tag>,
}

impl Execute {
    /// Builds the three unit groups from the core configuration.
    pub fn new(config: &CoreConfig) -> Self {
        let groups = OpClass::ALL.map(|class| {
            FunctionalGroup::new(class, config.units(class), config.latency.of(class))
        });
        Self {
            groups,
            writeback: Vec::new(),
            latched_tags: Vec::new(),
            finished_tags: Vec::new(),
        }
    }

    /// Advances every unit to `cycle` and latches `selections` onto idle units.
    pub fn tick(&mut self, cycle: u64, selections: &Selections) {
        self.latched_tags.clear();
        for group in &mut self.groups {
            let entries = selections.get(group.class());
            self.latched_tags.extend(entries.iter().map(|e| e.tag));
            group.tick(cycle, entries);
        }
    }

    /// Grants up to `bus_count` finished results a bus, oldest first, and
    /// frees their units.
    pub fn update_output(&mut self, bus_count: usize) {
        self.writeback.clear();
        self.finished_tags.clear();

        let mut candidates: Vec<(usize, usize, Completion)> = Vec::new();
        for (g, group) in self.groups.iter().enumerate() {
            self.finished_tags.extend(
                group
                    .units()
                    .iter()
                    .filter(|unit| unit.finished_now())
                    .filter_map(|unit| unit.completion().map(|c| c.tag)),
            );
            candidates.extend(group.completed().into_iter().map(|(u, c)| (g, u, c)));
        }
        candidates.sort_by_key(|&(_, _, c)| c.age_key());

        let stalled = candidates.len().saturating_sub(bus_count);
        for (g, unit, done) in candidates.into_iter().take(bus_count) {
            let released = self.groups[g].release(unit);
            debug_assert_eq!(released.map(|e| e.tag), Some(done.tag));
            self.writeback.push(done);
        }
        if stalled > 0 {
            trace!(stalled, "finished results waiting for a result bus");
        }
    }

    /// Results granted a bus by the last [`update_output`](Self::update_output).
    pub fn writeback(&self) -> &[Completion] {
        &self.writeback
    }

    /// Hands the granted results to the bus.
    pub fn take_writeback(&mut self) -> Vec<Completion> {
        mem::take(&mut self.writeback)
    }

    /// Idle units per class.
    pub fn free_units(&self) -> [usize; 3] {
        self.groups.each_ref().map(FunctionalGroup::free_units)
    }

    /// True when every unit is idle.
    pub fn is_idle(&self) -> bool {
        self.groups.iter().all(FunctionalGroup::is_idle)
    }

    /// Tags latched onto units by the last [`tick`](Self::tick).
    pub fn latched_tags(&self) -> &[Tag] {
        &self.latched_tags
    }

    /// Tags whose latency elapsed in the current cycle.
    pub fn finished_tags(&self) -> &[Tag] {
        &self.finished_tags
    }

    /// Read access to a class's units.
    pub fn group(&self, class: OpClass) -> &FunctionalGroup {
        &self.groups[class.index()]
    }
}
