//! Structural constants.
//!
//! These are fixed properties of the modelled core, not tunables. Anything a
//! user may change lives in [`crate::config`].

/// Number of architectural registers addressable by a trace record.
pub const NUM_ARCH_REGISTERS: usize = 32;

/// Reservation-station slots provisioned per functional unit.
///
/// Station capacity is `RS_SLOTS_PER_UNIT * (k0 + k1 + k2)`.
pub const RS_SLOTS_PER_UNIT: usize = 2;

/// Number of operation classes, one functional-unit group each.
pub const NUM_OP_CLASSES: usize = 3;
