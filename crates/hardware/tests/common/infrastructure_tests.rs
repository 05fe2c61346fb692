use pretty_assertions::assert_eq;
use super::builder::instruction::InstructionBuilder;
use super::builder::trace::TraceBuilder;
use super::harness::TestContext;
use super::mocks::source::yielding;
use tomasim_core::common::ArchReg;
use tomasim_core::sim::InstructionSource;

#[test]
fn builder_maps_negative_registers_to_none() {
    let record = InstructionBuilder::new().op(2).dest(4).src1(-1).src2(31).build();
    assert_eq!(record.op_code, 2);
    assert_eq!(record.dest, ArchReg::new(4));
    assert_eq!(record.src, [None, ArchReg::new(31)]);
}

#[test]
fn builder_line_is_trace_format() {
    let line = InstructionBuilder::new().address(0x2b0).op(-1).dest(3).src1(1).line();
    assert_eq!(line, "2b0 -1 3 1 -1");
}

#[test]
fn trace_builder_joins_lines() {
    let text = TraceBuilder::new()
        .inst(InstructionBuilder::new())
        .raw("")
        .inst(InstructionBuilder::new().op(0))
        .text();
    assert_eq!(text, "0 1 -1 -1 -1\n\n0 0 -1 -1 -1\n");
}

#[test]
fn mock_source_yields_then_exhausts() {
    let mut source = yielding(vec![InstructionBuilder::independent(0)]);
    assert!(source.next_instruction().unwrap().is_some());
    assert!(source.next_instruction().unwrap().is_none());
    assert!(source.next_instruction().unwrap().is_none());
}

#[test]
fn harness_records_every_instruction() {
    let mut ctx = TestContext::new(vec![InstructionBuilder::independent(1); 3]);
    let stats = ctx.run();
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(ctx.all_times().len(), 3);
    assert!(ctx.all_times().iter().all(|t| t.is_retired()));
}
