//! Instruction sources, the simulator facade, and its recorders.

pub mod trace_reader;
