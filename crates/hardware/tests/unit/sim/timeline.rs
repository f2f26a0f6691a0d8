//! Cycle Diagram Tests.

use crate::common::TraceBuilder;
use pipesim_core::common::SeqNum;
use pipesim_core::core::pipeline::Stage;
use pretty_assertions::assert_eq;

#[test]
fn test_load_use_diagram() {
    let ctx = TraceBuilder::new()
        .inst("LW F1,0(R1)")
        .inst("ADD.S F2,F1,F3")
        .run();

    let diagram = ctx.report.timeline.render();
    let lines: Vec<&str> = diagram.lines().collect();
    assert_eq!(
        lines,
        vec![
            "cycle    IF    ID    EX   MEM    WB  FADD  FMUL  FDIV   FWB",
            "----- ----- ----- ----- ----- ----- ----- ----- ----- -----",
            "    1     1",
            "    2     2     1",
            "    3           2     1",
            "    4       stall           1",
            "    5                             1     2",
            "    6                                   2",
            "    7                                                     2",
        ]
    );
}

#[test]
fn test_one_record_per_cycle() {
    let ctx = TraceBuilder::new()
        .inst("DIV.S F1,F2,F3")
        .inst("DADD R1,R2,R3")
        .run();

    let timeline = &ctx.report.timeline;
    assert_eq!(timeline.len() as u64, ctx.cycles());
    for (i, record) in timeline.records().iter().enumerate() {
        assert_eq!(record.cycle, i as u64 + 1);
    }
    assert_eq!(timeline.cycles_in(SeqNum::new(1), Stage::Fdiv).len(), 10);
}

#[test]
fn test_empty_trace_has_header_only() {
    let ctx = TraceBuilder::new().run();
    assert!(ctx.report.timeline.is_empty());
    assert_eq!(ctx.report.timeline.render().lines().count(), 2);
}

#[test]
fn test_timeline_serializes_as_array() {
    let ctx = TraceBuilder::new().inst("DADD R1,R2,R3").run();
    let value = serde_json::to_value(&ctx.report.timeline).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["cycle"], 1);
}
