//! Report Section Tests.

use crate::common::TraceBuilder;
use pipesim_core::config::LatencyConfig;
use pipesim_core::isa::decode_trace;
use pipesim_core::SimError;
use pipesim_core::sim::report::{render_json, render_report, write_configuration, write_listing};
use pretty_assertions::assert_eq;

#[test]
fn test_configuration_block() {
    let mut out = String::new();
    write_configuration(&mut out, &LatencyConfig::default()).unwrap();
    assert_eq!(
        out,
        "Configuration:\n\
         \x20  fp adds and subs cycles:  2\n\
         \x20     fp multiplies cycles:  5\n\
         \x20        fp divides cycles: 10\n\n\n"
    );
}

#[test]
fn test_listing_numbers_instructions() {
    let program = decode_trace("LW R1,0(R2)\nADD.S F1,F2,F3\n").unwrap();
    let mut out = String::new();
    write_listing(&mut out, &program).unwrap();
    assert_eq!(out, "Instructions:\n  1. LW R1,0(R2)\n  2. ADD.S F1,F2,F3\n\n\n");
}

#[test]
fn test_full_report_section_order() {
    let builder = TraceBuilder::new()
        .inst("LW F1,0(R1)")
        .inst("ADD.S F2,F1,F3");
    let latency = builder.config().latency.clone();
    let ctx = builder.run();

    let text = render_report(&latency, &ctx.program, &ctx.report);
    let config_at = text.find("Configuration:").unwrap();
    let listing_at = text.find("Instructions:").unwrap();
    let diagram_at = text.find("cycle    IF").unwrap();
    let table_at = text.find("hazard type").unwrap();
    assert!(config_at < listing_at);
    assert!(listing_at < diagram_at);
    assert!(diagram_at < table_at);

    assert!(text.contains("    7                                                     2\n\nhazard type"));
    assert!(text.ends_with("branch flushes: 0\n"));
}

#[test]
fn test_json_report_parses_back() {
    let ctx = TraceBuilder::new()
        .inst("LW F1,0(R1)")
        .inst("ADD.S F2,F1,F3")
        .run();

    let json = render_json(&ctx.report).unwrap();
    assert!(json.ends_with("}\n"));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["cycles"], 7);
    assert_eq!(value["stats"]["load_delay_stalls"], 1);
    assert_eq!(value["timeline"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_serialize_error_message() {
    let source = serde_json::from_str::<u8>("x").unwrap_err();
    let err = SimError::Serialize(source);
    assert!(err.to_string().starts_with("could not serialize report: "));
}
