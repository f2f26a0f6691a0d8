//! Load-Delay Hazard Tests.
//!
//! Verifies that a consumer of a load result waits exactly one cycle in ID,
//! that a store of a loaded value does not wait, and that a store whose
//! address base is being loaded does.

use crate::common::TraceBuilder;
use pipesim_core::core::pipeline::Stage;
use pretty_assertions::assert_eq;

// ══════════════════════════════════════════════════════════
// 1. Load followed by a consumer
// ══════════════════════════════════════════════════════════

#[test]
fn load_then_fp_add_stalls_once() {
    let ctx = TraceBuilder::new()
        .inst("LW F1,0(R1)")
        .inst("ADD.S F2,F1,F3")
        .add_latency(2)
        .run();

    assert_eq!(ctx.cycles(), 7);
    assert_eq!(ctx.stats().load_delay_stalls, 1);
    assert_eq!(ctx.stats().structural_stalls, 0);
    assert_eq!(ctx.stats().data_stalls, 0);
    assert_eq!(ctx.stats().waw_squashes, 0);
    assert_eq!(ctx.stats().branch_flushes, 0);

    assert_eq!(ctx.cycles_in(2, Stage::Id), vec![3]);
    assert_eq!(ctx.stall_cycles_in(Stage::Id), vec![4]);
    assert_eq!(ctx.cycles_in(2, Stage::Fadd), vec![5, 6]);
    assert_eq!(ctx.cycles_in(2, Stage::Fwb), vec![7]);
}

#[test]
fn load_then_integer_consumer_stalls_once() {
    let ctx = TraceBuilder::new()
        .inst("LW R1,0(R2)")
        .inst("DADD R3,R1,R4")
        .run();

    assert_eq!(ctx.stats().load_delay_stalls, 1);
    assert_eq!(ctx.cycles_in(2, Stage::Ex), vec![5]);
    assert_eq!(ctx.cycles(), 7);
}

#[test]
fn fp_load_then_consumer_stalls_once() {
    let ctx = TraceBuilder::new()
        .inst("L.S F1,0(R2)")
        .inst("MUL.S F2,F1,F1")
        .mul_latency(3)
        .run();

    assert_eq!(ctx.stats().load_delay_stalls, 1);
    assert_eq!(ctx.cycles_in(1, Stage::Fwb), vec![5]);
    assert_eq!(ctx.cycles_in(2, Stage::Fmul), vec![5, 6, 7]);
}

#[test]
fn unrelated_load_does_not_stall() {
    let ctx = TraceBuilder::new()
        .inst("LW R1,0(R2)")
        .inst("DADD R3,R4,R5")
        .run();

    assert_eq!(ctx.stats().total_stalls(), 0);
    assert_eq!(ctx.cycles(), 6);
}

// ══════════════════════════════════════════════════════════
// 2. Stores
// ══════════════════════════════════════════════════════════

#[test]
fn store_of_loaded_value_does_not_stall() {
    let ctx = TraceBuilder::new()
        .inst("LW R1,0(R2)")
        .inst("SW R1,0(R3)")
        .run();

    assert_eq!(ctx.stats().total_stalls(), 0);
    assert_eq!(ctx.cycles(), 5);
    assert_eq!(ctx.exit_of(2).stage, Stage::Mem);
}

#[test]
fn store_with_loaded_base_stalls_once() {
    let ctx = TraceBuilder::new()
        .inst("LW R3,0(R2)")
        .inst("SW R1,0(R3)")
        .run();

    assert_eq!(ctx.stats().load_delay_stalls, 1);
    assert_eq!(ctx.cycles(), 6);
}
