//! FP Write-Back Port Tests.
//!
//! One instruction per cycle leaves through FWB, oldest first. A completed
//! unit that loses holds its unit without being charged a stall; an
//! FWB-routed instruction in MEM that loses leaves through WB instead.

use crate::common::TraceBuilder;
use pipesim_core::core::pipeline::{ExitKind, Stage};
use pretty_assertions::assert_eq;

#[test]
fn fp_load_losing_port_leaves_through_wb() {
    let ctx = TraceBuilder::new()
        .inst("ADD.S F1,F2,F3")
        .inst("L.S F4,0(R1)")
        .add_latency(3)
        .run();

    assert_eq!(ctx.cycles_in(1, Stage::Fwb), vec![6]);
    assert_eq!(ctx.cycles_in(2, Stage::Mem), vec![5]);
    assert!(ctx.cycles_in(2, Stage::Fwb).is_empty());

    let load = ctx.exit_of(2);
    assert_eq!(load.stage, Stage::Wb);
    assert_eq!(load.cycle, 6);
    assert_eq!(ctx.stats().total_stalls(), 0);
    assert_eq!(ctx.cycles(), 6);
}

#[test]
fn fp_load_with_free_port_uses_fwb() {
    let ctx = TraceBuilder::new()
        .inst("ADD.S F1,F2,F3")
        .inst("L.S F4,0(R1)")
        .add_latency(2)
        .run();

    assert_eq!(ctx.cycles_in(1, Stage::Fwb), vec![5]);
    assert_eq!(ctx.cycles_in(2, Stage::Fwb), vec![6]);
}

#[test]
fn completed_unit_holds_until_port_is_free() {
    let ctx = TraceBuilder::new()
        .inst("ADD.S F1,F2,F3")
        .inst("MUL.S F4,F5,F6")
        .latencies(2, 1, 10)
        .run();

    assert_eq!(ctx.cycles_in(2, Stage::Fmul), vec![4, 5]);
    assert_eq!(ctx.cycles_in(1, Stage::Fwb), vec![5]);
    assert_eq!(ctx.cycles_in(2, Stage::Fwb), vec![6]);
    assert_eq!(ctx.exits(ExitKind::Retired), vec![1, 2]);
}

#[test]
fn move_and_convert_leave_through_fwb() {
    for line in ["MTC1 R1,F2", "MOV.S F1,F2", "CVT.S.W F1,F2", "CVT.W.S F1,F2", "L.S F1,0(R2)"] {
        let ctx = TraceBuilder::new().inst(line).run();
        assert_eq!(ctx.exit_of(1).stage, Stage::Fwb, "{line}");
        assert_eq!(ctx.cycles(), 5, "{line}");
    }
}

#[test]
fn integer_results_leave_through_wb() {
    for line in ["MFC1 R1,F2", "LW R1,0(R2)", "DADD R1,R2,R3", "XOR R1,R2,R3"] {
        let ctx = TraceBuilder::new().inst(line).run();
        assert_eq!(ctx.exit_of(1).stage, Stage::Wb, "{line}");
    }
}

#[test]
fn losing_port_does_not_block_integer_pipe() {
    let ctx = TraceBuilder::new()
        .inst("ADD.S F1,F2,F3")
        .inst("L.S F4,0(R1)")
        .inst("DADD R5,R6,R7")
        .add_latency(3)
        .run();

    assert_eq!(ctx.cycles_in(3, Stage::Ex), vec![5]);
    assert_eq!(ctx.cycles_in(3, Stage::Mem), vec![6]);
    assert_eq!(ctx.cycles_in(3, Stage::Wb), vec![7]);
    assert_eq!(ctx.exits(ExitKind::Retired), vec![1, 2, 3]);
    assert_eq!(ctx.cycles(), 7);
}
