//! SimStats unit tests.
//!
//! Verifies derived metrics and the serialized report on a real run.

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::{TestContext, config};
use tomasim_core::stats::SimStats;

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.instructions_fired, 0);
    assert_eq!(stats.dispatch_queue_total, 0);
    assert_eq!(stats.dispatch_queue_peak, 0);
    assert_eq!(stats.avg_inst_retired(), 0.0);
}

#[test]
fn run_counts_queue_occupancy() {
    // 5 instructions, fetch width 4: the queue holds 4 after cycle 2 and 1 after cycle 3
    let records = [0, 1, 2, 0, 1].map(InstructionBuilder::independent).to_vec();
    let mut ctx = TestContext::with_config(config(8, 1, 2, 3, 4), records);
    let stats = ctx.run();

    assert_eq!(stats.cycles, 6);
    assert_eq!(stats.instructions_retired, 5);
    assert_eq!(stats.instructions_fetched, 5);
    assert_eq!(stats.instructions_fired, 5);
    assert_eq!(stats.dispatch_queue_total, 5);
    assert_eq!(stats.dispatch_queue_peak, 4);

    let report = stats.report();
    assert!((report.avg_dispatch_queue_size - 5.0 / 6.0).abs() < 1e-12);
    assert!((report.avg_inst_retired - 5.0 / 6.0).abs() < 1e-12);
    assert!((report.avg_inst_fired - 5.0 / 6.0).abs() < 1e-12);
    assert_eq!(report.max_dispatch_queue_size, 4);
}

#[test]
fn report_serializes_to_json() {
    let mut ctx = TestContext::new(vec![InstructionBuilder::independent(2)]);
    let stats = ctx.run();
    let json = serde_json::to_value(stats.report()).unwrap();
    assert_eq!(json["cycles"], 5);
    assert_eq!(json["instructions_retired"], 1);
    assert_eq!(json["max_dispatch_queue_size"], 1);
}
