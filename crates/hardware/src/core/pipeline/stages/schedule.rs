//! Schedule Stage.
//!
//! Owns the reservation station and the register producer table. The tick
//! phase allocates a slot for every instruction dispatch offered last cycle
//! and binds its operands; the output phase selects ready entries, oldest
//! first, up to the number of idle units in each class.

use tracing::{debug, error};

use crate::core::pipeline::latches::Selections;
use crate::core::pipeline::reservation_station::ReservationStation;
use crate::core::pipeline::scoreboard::ProducerTable;
use crate::isa::{Instruction, Tag};

/// The schedule stage.
#[derive(Debug)]
pub struct Schedule {
    station: ReservationStation,
    producers: ProducerTable,
    inserted_tags: Vec<Tag>,
    selected_tags: Vec<Tag>,
    fired: u64,
}

impl Schedule {
    /// Creates a stage with a station of `capacity` slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            station: ReservationStation::new(capacity),
            producers: ProducerTable::new(),
            inserted_tags: Vec::new(),
            selected_tags: Vec::new(),
            fired: 0,
        }
    }

    /// Inserts dispatch's offer into the station, in order.
    ///
    /// Dispatch never offers more than the station's free slots.
    pub fn tick(&mut self, incoming: Vec<Instruction>) {
        self.inserted_tags.clear();
        debug_assert!(
            incoming.len() <= self.station.free_slots(),
            "dispatch overran the reservation station"
        );
        for inst in incoming {
            let tag = inst.tag;
            match self.station.insert(inst, &mut self.producers) {
                Ok(slot) => {
                    debug!(%tag, %slot, "entered reservation station");
                    self.inserted_tags.push(tag);
                }
                Err(dropped) => {
                    error!(tag = %dropped.tag, "reservation station full, instruction lost");
                }
            }
        }
    }

    /// Selects ready entries given the idle unit count of each class.
    pub fn update_output(&mut self, available: [usize; 3]) -> &Selections {
        self.selected_tags.clear();
        let selections = self.station.select(available);
        self.selected_tags
            .extend(selections.iter().map(|(_, entry)| entry.tag));
        self.fired += selections.len() as u64;
        self.station.selections()
    }

    /// Entries selected by the last [`update_output`](Self::update_output).
    pub fn selections(&self) -> &Selections {
        self.station.selections()
    }

    /// Tags inserted by the last [`tick`](Self::tick).
    pub fn inserted_tags(&self) -> &[Tag] {
        &self.inserted_tags
    }

    /// Tags selected by the last [`update_output`](Self::update_output).
    pub fn selected_tags(&self) -> &[Tag] {
        &self.selected_tags
    }

    /// Total entries selected over the run.
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Free reservation-station slots.
    pub fn free_slots(&self) -> usize {
        self.station.free_slots()
    }

    /// Read access to the station.
    pub const fn station(&self) -> &ReservationStation {
        &self.station
    }

    /// Read access to the producer table.
    pub const fn producers(&self) -> &ProducerTable {
        &self.producers
    }

    /// The station and producer table together, for retirement.
    pub fn parts_mut(&mut self) -> (&mut ReservationStation, &mut ProducerTable) {
        (&mut self.station, &mut self.producers)
    }
}
