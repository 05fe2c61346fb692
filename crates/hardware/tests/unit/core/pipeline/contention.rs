//! Structural pressure: result buses, functional units, reservation-station slots.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::{TestContext, config};
use crate::common::mocks::source::yielding;
use pretty_assertions::assert_eq;

#[test]
fn single_bus_broadcasts_oldest_first() {
    let records = vec![InstructionBuilder::independent(1); 3];
    let mut ctx = TestContext::with_config(config(1, 1, 3, 3, 4), records);
    let stats = ctx.run();

    let executed: Vec<_> = ctx.all_times().iter().map(|t| t.execute).collect();
    let retired: Vec<_> = ctx.all_times().iter().map(|t| t.retire).collect();
    assert_eq!(executed, vec![Some(4); 3]);
    assert_eq!(retired, vec![Some(5), Some(6), Some(7)]);
    assert_eq!(stats.cycles, 7);
}

#[test]
fn unit_waiting_for_bus_blocks_its_class() {
    let records = [0, 1, 2, 2].map(InstructionBuilder::independent).to_vec();
    let mut ctx = TestContext::with_config(config(1, 1, 1, 1, 4), records);
    let stats = ctx.run();

    assert_eq!(ctx.times(2).retire, Some(7));
    // The k2 unit is released only when tag 2 wins the bus at cycle 6
    assert_eq!(ctx.times(3).issue, Some(6));
    assert_eq!(ctx.times(3).retire, Some(8));
    assert_eq!(stats.cycles, 8);
}

#[test]
fn earlier_completion_beats_lower_tag() {
    let mut cfg = config(1, 1, 2, 3, 4);
    cfg.core.latency.k2 = 2;
    let records = [2, 0].map(InstructionBuilder::independent).to_vec();
    let mut ctx = TestContext::with_config(cfg, records);
    let _ = ctx.run();

    assert_eq!(ctx.times(1).retire, Some(5));
    assert_eq!(ctx.times(0).retire, Some(6));
}

#[test]
fn full_station_holds_dispatch_queue() {
    // Capacity 2 * (1 + 1 + 1) = 6 slots, eight instructions on one k0 unit
    let records = vec![InstructionBuilder::independent(0); 8];
    let mut ctx = TestContext::with_config(config(8, 1, 1, 1, 8), records);
    let stats = ctx.run();

    let scheduled: Vec<_> = ctx.all_times().iter().map(|t| t.schedule).collect();
    assert_eq!(scheduled, [3, 3, 3, 3, 3, 3, 7, 8].map(Some).to_vec());
    assert_eq!(ctx.times(6).dispatch, Some(2));
    assert_eq!(ctx.times(7).issue, Some(10));
    assert_eq!(stats.dispatch_queue_peak, 8);
    assert_eq!(stats.dispatch_queue_total, 17);
    assert_eq!(stats.cycles, 12);
}

#[test]
fn mock_source_drives_pipeline() {
    let source = yielding(vec![
        InstructionBuilder::new().op(0).dest(3).build(),
        InstructionBuilder::new().op(2).src1(3).build(),
    ]);
    let mut ctx = TestContext::with_source(config(8, 1, 2, 3, 4), source);
    let stats = ctx.run();
    assert_eq!(stats.instructions_retired, 2);
    assert_eq!(ctx.times(1).issue, ctx.times(0).retire);
}
