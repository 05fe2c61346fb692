//! Instruction sources.
//!
//! Fetch pulls records one at a time through [`InstructionSource`] until it
//! reports exhaustion. Two sources are provided:
//! 1. **`TraceReader`:** Streams the text trace format from any `BufRead`.
//! 2. **`VecSource`:** Replays an in-memory list, for tests and generated workloads.
//!
//! # Trace format
//!
//! One instruction per line, five whitespace-separated fields:
//!
//! ```text
//! <hex address> <op code> <dest reg> <src reg 1> <src reg 2>
//! ```
//!
//! A negative register number means "no register". Blank lines are ignored.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::constants::NUM_ARCH_REGISTERS;
use crate::common::error::TraceError;
use crate::common::reg::ArchReg;
use crate::isa::TraceRecord;

/// Sequential provider of decoded instruction records.
pub trait InstructionSource {
    /// Returns the next record, or `Ok(None)` once the source is exhausted.
    fn next_instruction(&mut self) -> Result<Option<TraceRecord>, TraceError>;
}

impl<S: InstructionSource + ?Sized> InstructionSource for Box<S> {
    fn next_instruction(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        (**self).next_instruction()
    }
}

/// Streaming parser for the text trace format.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub const fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> InstructionSource for TraceReader<R> {
    fn next_instruction(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let text = self.buf.trim();
            if !text.is_empty() {
                return parse_line(text, self.line).map(Some);
            }
        }
    }
}

/// Parses one non-empty trace line. `line` is only used for error reporting.
pub fn parse_line(text: &str, line: usize) -> Result<TraceRecord, TraceError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [address, op_code, dest, src1, src2] = fields.as_slice() else {
        return Err(TraceError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(*address);
    let address = u32::from_str_radix(hex, 16).map_err(|_| TraceError::InvalidField {
        line,
        field: "address",
        value: (*address).to_owned(),
    })?;
    let op_code = op_code
        .parse::<i32>()
        .map_err(|_| TraceError::InvalidField {
            line,
            field: "op code",
            value: (*op_code).to_owned(),
        })?;

    Ok(TraceRecord {
        address,
        op_code,
        dest: parse_reg(dest, "destination register", line)?,
        src: [
            parse_reg(src1, "source register", line)?,
            parse_reg(src2, "source register", line)?,
        ],
    })
}

fn parse_reg(text: &str, field: &'static str, line: usize) -> Result<Option<ArchReg>, TraceError> {
    let raw = text.parse::<i64>().map_err(|_| TraceError::InvalidField {
        line,
        field,
        value: text.to_owned(),
    })?;
    if raw < 0 {
        return Ok(None);
    }
    usize::try_from(raw)
        .ok()
        .and_then(ArchReg::new)
        .map(Some)
        .ok_or(TraceError::RegisterOutOfRange {
            line,
            reg: raw,
            limit: NUM_ARCH_REGISTERS,
        })
}

/// In-memory instruction source.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    records: VecDeque<TraceRecord>,
}

impl VecSource {
    /// Creates a source that yields `records` in order.
    pub fn new(records: impl IntoIterator<Item = TraceRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Records not yet fetched.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl FromIterator<TraceRecord> for VecSource {
    fn from_iter<I: IntoIterator<Item = TraceRecord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl InstructionSource for VecSource {
    fn next_instruction(&mut self) -> Result<Option<TraceRecord>, TraceError> {
        Ok(self.records.pop_front())
    }
}
