use tomasim_core::common::ArchReg;
use tomasim_core::isa::TraceRecord;

/// Builds a [`TraceRecord`] one field at a time.
///
/// Registers are given as trace integers, so `-1` means "none" exactly as in
/// a trace file.
#[derive(Clone, Copy, Debug)]
pub struct InstructionBuilder {
    address: u32,
    op_code: i32,
    dest: i64,
    src1: i64,
    src2: i64,
}

impl Default for InstructionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn reg(value: i64) -> Option<ArchReg> {
    usize::try_from(value).ok().and_then(ArchReg::new)
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self {
            address: 0,
            op_code: 1,
            dest: -1,
            src1: -1,
            src2: -1,
        }
    }

    pub fn address(mut self, address: u32) -> Self {
        self.address = address;
        self
    }

    pub fn op(mut self, op_code: i32) -> Self {
        self.op_code = op_code;
        self
    }

    pub fn dest(mut self, dest: i64) -> Self {
        self.dest = dest;
        self
    }

    pub fn src1(mut self, src: i64) -> Self {
        self.src1 = src;
        self
    }

    pub fn src2(mut self, src: i64) -> Self {
        self.src2 = src;
        self
    }

    /// Independent instruction of class `op_code`.
    pub fn independent(op_code: i32) -> TraceRecord {
        Self::new().op(op_code).build()
    }

    pub fn build(self) -> TraceRecord {
        TraceRecord {
            address: self.address,
            op_code: self.op_code,
            dest: reg(self.dest),
            src: [reg(self.src1), reg(self.src2)],
        }
    }

    /// The record as a trace-file line.
    pub fn line(self) -> String {
        format!(
            "{:x} {} {} {} {}",
            self.address, self.op_code, self.dest, self.src1, self.src2
        )
    }
}
