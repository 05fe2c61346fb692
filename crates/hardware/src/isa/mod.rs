//! Instruction model.
//!
//! The simulator carries no instruction semantics: an instruction is an
//! operation class plus register names. This module defines:
//! 1. **Trace Records:** What the instruction source yields.
//! 2. **Instructions:** Records stamped with a fetch-order tag.
//! 3. **Operation Classes:** The three functional-unit classes and the op-code routing onto them.

/// Trace records, fetched instructions, tags, and operation classes.
pub mod instruction;

pub use instruction::{Instruction, OpClass, Tag, TraceRecord};
