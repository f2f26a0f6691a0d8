//! Textual run report.
//!
//! The report has four sections, in order: the configuration block, the
//! numbered instruction listing, the cycle diagram and the hazard table.
//! [`render_json`] is the machine-readable alternative.

use crate::common::error::SimError;
use crate::config::LatencyConfig;
use crate::isa::instruction::Instruction;
use crate::sim::simulator::SimReport;
use std::fmt;

/// Writes the configured unit latencies.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_configuration<W: fmt::Write>(out: &mut W, latency: &LatencyConfig) -> fmt::Result {
    writeln!(out, "Configuration:")?;
    for (label, cycles) in [
        ("fp adds and subs cycles", latency.fp_add_sub),
        ("fp multiplies cycles", latency.fp_mul),
        ("fp divides cycles", latency.fp_div),
    ] {
        writeln!(out, "{label:>26}:{cycles:>3}")?;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Writes the trace as a numbered listing.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_listing<W: fmt::Write>(out: &mut W, program: &[Instruction]) -> fmt::Result {
    writeln!(out, "Instructions:")?;
    for inst in program {
        writeln!(out, "{:>3}. {inst}", inst.seq)?;
    }
    writeln!(out)?;
    writeln!(out)
}

/// Writes every section of a completed run.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_report<W: fmt::Write>(
    out: &mut W,
    latency: &LatencyConfig,
    program: &[Instruction],
    report: &SimReport,
) -> fmt::Result {
    write_configuration(out, latency)?;
    write_listing(out, program)?;
    report.timeline.write_diagram(out)?;
    writeln!(out)?;
    report.stats.write_table(out)
}

/// Renders the full report to a string.
pub fn render_report(latency: &LatencyConfig, program: &[Instruction], report: &SimReport) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, latency, program, report);
    out
}

/// Renders the run results as pretty-printed JSON with a trailing newline.
///
/// # Errors
///
/// Returns `SimError::Serialize` if serialization fails.
pub fn render_json(report: &SimReport) -> Result<String, SimError> {
    let mut json = serde_json::to_string_pretty(report).map_err(SimError::Serialize)?;
    json.push('\n');
    Ok(json)
}
