//! Architectural register identifiers.

use std::fmt;

use super::constants::NUM_ARCH_REGISTERS;

/// Index of an architectural register, guaranteed to be below
/// [`NUM_ARCH_REGISTERS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArchReg(u8);

impl ArchReg {
    /// Creates a register identifier, or `None` if `index` is out of range.
    pub const fn new(index: usize) -> Option<Self> {
        if index < NUM_ARCH_REGISTERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Returns the register number as a table index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArchReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
