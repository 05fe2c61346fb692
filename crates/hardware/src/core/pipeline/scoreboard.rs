//! Register producer table.
//!
//! Maps each architectural register to the reservation-station slot that will
//! produce its next value, or `None` if no in-flight instruction writes it.
//! Allocation consults the table to bind source operands and then claims the
//! destination register (last writer wins). Retirement clears the mapping, but
//! only where it still names the retiring slot.

use crate::common::constants::NUM_ARCH_REGISTERS;
use crate::common::reg::ArchReg;
use crate::core::pipeline::reservation_station::RsSlot;

/// Register → pending producer slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProducerTable {
    producers: [Option<RsSlot>; NUM_ARCH_REGISTERS],
}

impl Default for ProducerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProducerTable {
    /// Create a table with every register ready (no pending producers).
    pub const fn new() -> Self {
        Self {
            producers: [None; NUM_ARCH_REGISTERS],
        }
    }

    /// Record `slot` as the latest producer of `reg`, replacing any earlier one.
    pub fn set_producer(&mut self, reg: ArchReg, slot: RsSlot) {
        self.producers[reg.index()] = Some(slot);
    }

    /// The slot that will produce `reg`, or `None` if its value is ready.
    pub fn producer(&self, reg: ArchReg) -> Option<RsSlot> {
        self.producers[reg.index()]
    }

    /// Clear `reg`'s producer, but ONLY if it is still `slot`.
    /// A younger instruction may have claimed the register since.
    pub fn clear_if_match(&mut self, reg: ArchReg, slot: RsSlot) {
        let entry = &mut self.producers[reg.index()];
        if *entry == Some(slot) {
            *entry = None;
        }
    }

    /// True when some register still maps to `slot`.
    pub fn references(&self, slot: RsSlot) -> bool {
        self.producers.contains(&Some(slot))
    }

    /// Number of registers with an in-flight producer.
    pub fn pending(&self) -> usize {
        self.producers.iter().filter(|p| p.is_some()).count()
    }
}
