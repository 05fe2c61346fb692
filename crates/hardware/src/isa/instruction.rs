//! Trace records and in-flight instructions.

use std::fmt;

use crate::common::ArchReg;
use crate::common::constants::NUM_OP_CLASSES;

/// Fetch-order sequence number. Tag order is program order.
///
/// Tags start at 0 and increase by one per fetched instruction, so they are
/// unique for the lifetime of a run and serve as the final tie-break in every
/// oldest-first decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tag(pub u64);

impl Tag {
    /// 1-based instruction number, as used by the event log and trace table.
    #[inline]
    pub const fn ordinal(self) -> u64 {
        self.0 + 1
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Functional-unit class an instruction executes on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpClass {
    /// Class served by the `k0` group.
    K0,
    /// Class served by the `k1` group. Unknown op codes are routed here.
    K1,
    /// Class served by the `k2` group.
    K2,
}

impl OpClass {
    /// All classes in group order.
    pub const ALL: [Self; NUM_OP_CLASSES] = [Self::K0, Self::K1, Self::K2];

    /// Routes a trace op code onto a class.
    ///
    /// `0` and `2` select their own groups; every other value, including the
    /// `-1` used by traces for "no specific unit", goes to `K1`.
    pub const fn from_op_code(op_code: i32) -> Self {
        match op_code {
            0 => Self::K0,
            2 => Self::K2,
            _ => Self::K1,
        }
    }

    /// Stable index of this class (0, 1, or 2).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::K0 => 0,
            Self::K1 => 1,
            Self::K2 => 2,
        }
    }
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "k{}", self.index())
    }
}

/// One decoded record as produced by an instruction source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Instruction address (informational only).
    pub address: u32,
    /// Raw op code; see [`OpClass::from_op_code`].
    pub op_code: i32,
    /// Destination register, if the instruction writes one.
    pub dest: Option<ArchReg>,
    /// Source registers; `None` for an absent operand.
    pub src: [Option<ArchReg>; 2],
}

impl TraceRecord {
    /// Creates a record with the given op code and registers at address 0.
    pub const fn new(op_code: i32, dest: Option<ArchReg>, src: [Option<ArchReg>; 2]) -> Self {
        Self {
            address: 0,
            op_code,
            dest,
            src,
        }
    }
}

/// An in-flight instruction.
///
/// Created by fetch, owned successively by the fetch queue, the dispatch
/// queue, and a reservation-station slot, and dropped when the broadcast bus
/// retires that slot. Not `Clone`: there is exactly one owner at a time.
#[derive(Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Fetch-order tag.
    pub tag: Tag,
    /// Instruction address from the trace.
    pub address: u32,
    /// Functional-unit class.
    pub op: OpClass,
    /// Source registers.
    pub src: [Option<ArchReg>; 2],
    /// Destination register.
    pub dest: Option<ArchReg>,
}

impl Instruction {
    /// Stamps a trace record with its fetch tag.
    pub const fn from_record(record: TraceRecord, tag: Tag) -> Self {
        Self {
            tag,
            address: record.address,
            op: OpClass::from_op_code(record.op_code),
            src: record.src,
            dest: record.dest,
        }
    }
}
