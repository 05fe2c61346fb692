//! Randomised programs checked against the pipeline's invariants.

use std::collections::HashMap;

use crate::common::builder::instruction::InstructionBuilder;
use crate::common::harness::{TestContext, config};
use proptest::prelude::*;
use tomasim_core::config::Config;
use tomasim_core::isa::{OpClass, TraceRecord};

fn arb_record() -> impl Strategy<Value = TraceRecord> {
    (-1i32..4, -1i64..32, -1i64..32, -1i64..32).prop_map(|(op, dest, src1, src2)| {
        InstructionBuilder::new()
            .op(op)
            .dest(dest)
            .src1(src1)
            .src2(src2)
            .build()
    })
}

fn arb_config() -> impl Strategy<Value = Config> {
    (1usize..4, 1usize..3, 1usize..3, 1usize..3, 1usize..5, 1u64..4).prop_map(
        |(r, k0, k1, k2, f, lat)| {
            let mut cfg = config(r, k0, k1, k2, f);
            cfg.core.latency.k1 = lat;
            cfg
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_instruction_retires_in_order_of_stages(
        records in prop::collection::vec(arb_record(), 0..48),
        cfg in arb_config(),
    ) {
        let n = records.len();
        let mut ctx = TestContext::with_config(cfg.clone(), records.clone());
        let stats = ctx.run_bounded(10_000);
        let rows = ctx.all_times();

        prop_assert_eq!(stats.instructions_retired, n as u64);
        prop_assert_eq!(rows.len(), n);

        let f = cfg.core.fetch_width as u64;
        let mut last_schedule = 0;
        for (tag, (row, record)) in rows.iter().zip(&records).enumerate() {
            let class = OpClass::from_op_code(record.op_code);
            let fetch = row.fetch.unwrap();
            let dispatch = row.dispatch.unwrap();
            let schedule = row.schedule.unwrap();
            let issue = row.issue.unwrap();
            let execute = row.execute.unwrap();
            let retire = row.retire.unwrap();

            prop_assert_eq!(fetch, tag as u64 / f + 1);
            prop_assert_eq!(dispatch, fetch + 1);
            prop_assert!(schedule > dispatch);
            prop_assert!(issue >= schedule);
            prop_assert_eq!(execute, issue + 1);
            prop_assert!(retire >= execute + cfg.core.latency.of(class));
            prop_assert!(retire <= stats.cycles);

            // The dispatch queue is FIFO
            prop_assert!(schedule >= last_schedule);
            last_schedule = schedule;
        }
    }

    #[test]
    fn consumers_wait_for_latest_producer(
        records in prop::collection::vec(arb_record(), 1..48),
        cfg in arb_config(),
    ) {
        let mut ctx = TestContext::with_config(cfg, records.clone());
        let _ = ctx.run_bounded(10_000);
        let rows = ctx.all_times();

        let mut last_writer: HashMap<usize, usize> = HashMap::new();
        for (tag, record) in records.iter().enumerate() {
            for src in record.src.iter().flatten() {
                if let Some(&producer) = last_writer.get(&src.index()) {
                    let (p, c) = (rows[producer], rows[tag]);
                    prop_assert!(
                        c.issue >= p.retire,
                        "tag {} issued before producer {} retired",
                        tag,
                        producer
                    );
                    prop_assert!(c.execute > p.retire);
                }
            }
            if let Some(dest) = record.dest {
                let _ = last_writer.insert(dest.index(), tag);
            }
        }
    }

    #[test]
    fn structural_limits_hold_every_cycle(
        records in prop::collection::vec(arb_record(), 1..48),
        cfg in arb_config(),
    ) {
        let mut ctx = TestContext::with_config(cfg.clone(), records.clone());
        let stats = ctx.run_bounded(10_000);
        let rows = ctx.all_times();

        let cycles = stats.cycles as usize + 1;
        let mut broadcasts = vec![0usize; cycles];
        let mut busy_units = vec![[0usize; 3]; cycles];
        let mut in_station = vec![0usize; cycles];
        for (row, record) in rows.iter().zip(&records) {
            let class = OpClass::from_op_code(record.op_code);
            let retire = row.retire.unwrap() as usize;
            broadcasts[retire] += 1;
            // A unit is held from its latch cycle through the cycle it wins a bus
            for cycle in row.execute.unwrap() as usize..retire {
                busy_units[cycle][class.index()] += 1;
            }
            for slot in &mut in_station[row.schedule.unwrap() as usize..retire] {
                *slot += 1;
            }
        }

        for cycle in 0..cycles {
            prop_assert!(broadcasts[cycle] <= cfg.core.result_buses);
            prop_assert!(in_station[cycle] <= cfg.core.rs_capacity());
            for class in OpClass::ALL {
                prop_assert!(busy_units[cycle][class.index()] <= cfg.core.units(class));
            }
        }
    }
}
