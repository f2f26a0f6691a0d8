//! # Statistics Tests
//!
//! Counter bookkeeping and the rendered hazard table.

use crate::common::TraceBuilder;
use pipesim_core::core::pipeline::HazardKind;
use pipesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

#[test]
fn test_load_use_table() {
    let ctx = TraceBuilder::new()
        .inst("LW F1,0(R1)")
        .inst("ADD.S F2,F1,F3")
        .run();

    let table = ctx.stats().render();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines,
        vec![
            "hazard type  cycles  % of stalls  % of total",
            "-----------  ------  -----------  ----------",
            "load-delay        1       100.00       14.29",
            "structural        0         0.00        0.00",
            "data              0         0.00        0.00",
            "-----------  ------  -----------  ----------",
            "total             1       100.00       14.29",
            "",
            "WAW squashes: 0",
            "branch flushes: 0",
        ]
    );
}

#[test]
fn test_percentages_split_across_categories() {
    let stats = SimStats {
        cycles: 20,
        load_delay_stalls: 1,
        structural_stalls: 3,
        ..SimStats::default()
    };

    assert_eq!(stats.total_stalls(), 4);
    assert!((stats.percent_of_stalls(HazardKind::Structural) - 75.0).abs() < 1e-9);
    assert!((stats.percent_of_stalls(HazardKind::LoadDelay) - 25.0).abs() < 1e-9);
    assert!((stats.percent_of_cycles(HazardKind::Structural) - 15.0).abs() < 1e-9);
    assert_eq!(stats.percent_of_cycles(HazardKind::Data), 0.0);
}

#[test]
fn test_counts_line_reports_cancellations() {
    let stats = SimStats {
        waw_squashes: 2,
        branch_flushes: 5,
        ..SimStats::default()
    };
    let table = stats.render();
    assert!(table.contains("WAW squashes: 2\n"));
    assert!(table.ends_with("branch flushes: 5\n"));
}

#[test]
fn test_stats_serialize_as_flat_object() {
    let stats = SimStats {
        cycles: 7,
        load_delay_stalls: 1,
        ..SimStats::default()
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["cycles"], 7);
    assert_eq!(value["load_delay_stalls"], 1);
    assert_eq!(value["waw_squashes"], 0);
}
