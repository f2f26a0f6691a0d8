//! Trace-Level Property Tests.
//!
//! Generates random programs over a small register set, so dependencies and
//! same-destination writers are frequent, and checks invariants of every run.

use crate::common::TestContext;
use pipesim_core::config::{Config, LatencyConfig};
use pipesim_core::core::pipeline::{ExitKind, Slot, Stage};
use pipesim_core::isa::{InstrClass, Opcode};
use proptest::prelude::*;
use std::collections::HashSet;

/// One trace line built from an opcode and three register numbers.
fn line(opcode: Opcode, a: u8, b: u8, c: u8, taken: bool) -> String {
    let m = opcode.mnemonic();
    match opcode {
        Opcode::Lw => format!("{m} R{a},0(R{b})"),
        Opcode::Ls => format!("{m} F{a},4(R{b})"),
        Opcode::Sw => format!("{m} R{a},0(R{b})"),
        Opcode::Ss => format!("{m} F{a},4(R{b})"),
        Opcode::Beq | Opcode::Bne => {
            format!("{m} R{a},R{b},target:{}", if taken { 'T' } else { 'F' })
        }
        Opcode::Mfc1 => format!("{m} R{a},F{b}"),
        Opcode::Mtc1 => format!("{m} R{b},F{a}"),
        Opcode::MovS | Opcode::CvtSW | Opcode::CvtWS => format!("{m} F{a},F{b}"),
        Opcode::Dadd | Opcode::Dsub | Opcode::And | Opcode::Or | Opcode::Xor => {
            format!("{m} R{a},R{b},R{c}")
        }
        Opcode::AddS | Opcode::SubS | Opcode::MulS | Opcode::DivS => {
            format!("{m} F{a},F{b},F{c}")
        }
    }
}

fn trace_line() -> impl Strategy<Value = String> {
    (
        prop::sample::select(Opcode::ALL.to_vec()),
        1u8..4,
        1u8..4,
        1u8..4,
        any::<bool>(),
    )
        .prop_map(|(op, a, b, c, taken)| line(op, a, b, c, taken))
}

fn config() -> impl Strategy<Value = Config> {
    (1u32..5, 1u32..8, 1u32..12).prop_map(|(fp_add_sub, fp_mul, fp_div)| Config {
        latency: LatencyConfig {
            fp_add_sub,
            fp_mul,
            fp_div,
        },
        ..Config::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_instruction_leaves_exactly_once(
        lines in prop::collection::vec(trace_line(), 0..24),
        config in config(),
    ) {
        let ctx = TestContext::run(&lines.join("\n"), &config);
        let stats = ctx.stats();

        prop_assert_eq!(stats.instructions_fetched, lines.len() as u64);
        prop_assert_eq!(
            stats.instructions_retired,
            stats.instructions_fetched - stats.waw_squashes - stats.branch_flushes
        );

        let mut seen = HashSet::new();
        for r in &ctx.report.retirements {
            prop_assert!(seen.insert(r.seq), "{} left twice", r.seq);
        }
        prop_assert_eq!(seen.len(), lines.len());
    }

    #[test]
    fn squashed_results_never_write_back(
        lines in prop::collection::vec(trace_line(), 1..24),
        config in config(),
    ) {
        let ctx = TestContext::run(&lines.join("\n"), &config);

        let squashed = ctx.exits(ExitKind::Squashed);
        prop_assert_eq!(squashed.len() as u64, ctx.stats().waw_squashes);
        for seq in squashed {
            let exit = ctx.exit_of(seq);
            prop_assert!(exit.stage.is_fp_unit(), "{} squashed in {}", seq, exit.stage);
            prop_assert!(ctx.cycles_in(seq, Stage::Fwb).is_empty());
            prop_assert!(ctx.cycles_in(seq, Stage::Wb).is_empty());
        }
    }

    #[test]
    fn every_charged_stall_cycle_is_shown(
        lines in prop::collection::vec(trace_line(), 0..24),
        config in config(),
    ) {
        let ctx = TestContext::run(&lines.join("\n"), &config);
        let records = ctx.report.timeline.records();
        prop_assert_eq!(records.len() as u64, ctx.cycles());

        // A held ID shows `stall` on every charged cycle, except the cycle in
        // which a released branch retires.
        let marked = records.iter().filter(|r| r.slot(Stage::Id) == Slot::Stall).count() as u64;
        let released_branches = ctx
            .program
            .iter()
            .filter(|inst| inst.class() == InstrClass::Branch)
            .filter(|inst| ctx.cycles_in(inst.seq.val(), Stage::Id).len() > 1)
            .count() as u64;

        prop_assert_eq!(marked + released_branches, ctx.stats().total_stalls());
    }
}
