//! Structural Hazard Tests.
//!
//! Verifies that an FP instruction whose unit is busy waits in ID for the
//! occupant's remaining cycles, and that different units do not conflict.

use crate::common::TraceBuilder;
use pipesim_core::core::pipeline::Stage;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn back_to_back_multiplies() {
    let ctx = TraceBuilder::new()
        .inst("MUL.S F1,F2,F3")
        .inst("MUL.S F4,F5,F6")
        .mul_latency(4)
        .run();

    // Stall length is measured after the older multiply's first FMUL cycle.
    assert_eq!(ctx.stats().structural_stalls, 3);
    assert_eq!(ctx.cycles_in(2, Stage::Id), vec![3]);
    assert_eq!(ctx.stall_cycles_in(Stage::Id), vec![4, 5, 6]);

    assert_eq!(ctx.cycles_in(1, Stage::Fmul), vec![3, 4, 5, 6]);
    assert_eq!(ctx.cycles_in(2, Stage::Fmul), vec![7, 8, 9, 10]);
    assert_eq!(ctx.cycles_in(2, Stage::Fwb), vec![11]);
    assert_eq!(ctx.cycles(), 11);
}

#[rstest]
#[case("ADD.S F1,F2,F3", "SUB.S F4,F5,F6", 3, 2)]
#[case("MUL.S F1,F2,F3", "MUL.S F4,F5,F6", 5, 4)]
#[case("DIV.S F1,F2,F3", "DIV.S F4,F5,F6", 10, 9)]
#[case("ADD.S F1,F2,F3", "ADD.S F4,F5,F6", 1, 0)]
fn same_unit_waits_for_remaining_cycles(
    #[case] first: &str,
    #[case] second: &str,
    #[case] latency: u32,
    #[case] expected: u64,
) {
    let ctx = TraceBuilder::new()
        .inst(first)
        .inst(second)
        .latencies(latency, latency, latency)
        .run();

    assert_eq!(ctx.stats().structural_stalls, expected);
    assert_eq!(ctx.stats().total_stalls(), expected);
}

#[test]
fn different_units_run_in_parallel() {
    let ctx = TraceBuilder::new()
        .inst("DIV.S F1,F2,F3")
        .inst("MUL.S F4,F5,F6")
        .inst("ADD.S F7,F8,F9")
        .latencies(2, 4, 8)
        .run();

    assert_eq!(ctx.stats().total_stalls(), 0);
    assert_eq!(ctx.cycles_in(1, Stage::Fdiv).first(), Some(&3));
    assert_eq!(ctx.cycles_in(2, Stage::Fmul).first(), Some(&4));
    assert_eq!(ctx.cycles_in(3, Stage::Fadd).first(), Some(&5));
}

#[test]
fn single_fp_instruction_occupies_unit_for_latency() {
    for latency in 1..=6 {
        let ctx = TraceBuilder::new()
            .inst("DIV.S F1,F2,F3")
            .div_latency(latency)
            .run();

        let expected: Vec<u64> = (3..3 + u64::from(latency)).collect();
        assert_eq!(ctx.cycles_in(1, Stage::Fdiv), expected);
    }
}
