//! Trace file parsing.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::builder::trace::TraceBuilder;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Cursor;
use tomasim_core::common::{ArchReg, TraceError};
use tomasim_core::sim::{InstructionSource, TraceReader};

fn read_all(text: &str) -> Result<Vec<tomasim_core::isa::TraceRecord>, TraceError> {
    let mut reader = TraceReader::new(Cursor::new(text.to_owned()));
    let mut out = Vec::new();
    while let Some(record) = reader.next_instruction()? {
        out.push(record);
    }
    Ok(out)
}

#[test]
fn reads_file_from_disk() {
    let file = TraceBuilder::new()
        .inst(InstructionBuilder::new().address(0x4005d0).op(0).dest(1).src1(2).src2(3))
        .raw("")
        .inst(InstructionBuilder::new().address(0x4005d4).op(-1).src1(1))
        .write_temp();

    let mut reader = TraceReader::open(file.path()).unwrap();
    let first = reader.next_instruction().unwrap().unwrap();
    assert_eq!(first.address, 0x4005d0);
    assert_eq!(first.op_code, 0);
    assert_eq!(first.dest, ArchReg::new(1));
    assert_eq!(first.src, [ArchReg::new(2), ArchReg::new(3)]);

    let second = reader.next_instruction().unwrap().unwrap();
    assert_eq!(second.op_code, -1);
    assert_eq!(second.dest, None);
    assert_eq!(reader.lines_read(), 3);
    assert!(reader.next_instruction().unwrap().is_none());
}

#[test]
fn accepts_prefixed_hex_and_extra_whitespace() {
    let records = read_all("  0x1F\t2   31 -1  0  \n").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].address, 0x1f);
    assert_eq!(records[0].dest, ArchReg::new(31));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TraceReader::open(dir.path().join("none.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

#[rstest]
#[case("ab 1 2 3", 1, "expected 5 fields")]
#[case("zz 1 2 3 4", 1, "invalid address")]
#[case("ab x 2 3 4", 1, "invalid op code")]
#[case("ab 1 2 3 q", 1, "invalid source register")]
#[case("ab 1 32 3 4", 1, "register 32 out of range")]
#[case("ab 1 2 3 4\n\nab 1 2 3", 3, "expected 5 fields")]
fn malformed_lines_report_line_number(
    #[case] text: &str,
    #[case] line: usize,
    #[case] message: &str,
) {
    let err = read_all(text).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with(&format!("trace line {line}:")), "{rendered}");
    assert!(rendered.contains(message), "{rendered}");
}
