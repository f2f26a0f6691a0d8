//! Simulation statistics collection and reporting.
//!
//! This module tracks the hazard metrics of a pipeline run. It provides:
//! 1. **Throughput:** Total cycles, fetched and retired instruction counts.
//! 2. **Stalls:** Stall cycles charged to load-delay, structural and data hazards.
//! 3. **Cancellations:** WAW result squashes and taken-branch flushes.
//! 4. **Reporting:** The hazard table with per-category percentages.

use crate::core::pipeline::hazards::HazardKind;
use serde::Serialize;
use std::fmt;

/// Dashed rule under the hazard table header and above its total row.
const TABLE_RULE: &str = "-----------  ------  -----------  ----------";

/// Simulation statistics structure tracking all hazard metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions that entered IF.
    pub instructions_fetched: u64,
    /// Instructions that completed normally.
    pub instructions_retired: u64,

    /// Stall cycles waiting on a load result.
    pub load_delay_stalls: u64,
    /// Stall cycles waiting on a busy functional unit.
    pub structural_stalls: u64,
    /// Stall cycles waiting on a non-load producer.
    pub data_stalls: u64,

    /// Older FP results suppressed by a faster younger writer.
    pub waw_squashes: u64,
    /// Instructions discarded behind taken branches.
    pub branch_flushes: u64,
}

impl SimStats {
    /// Charges `cycles` stall cycles to `kind`.
    pub const fn record_stall(&mut self, kind: HazardKind, cycles: u32) {
        let cycles = cycles as u64;
        match kind {
            HazardKind::LoadDelay => self.load_delay_stalls += cycles,
            HazardKind::Structural => self.structural_stalls += cycles,
            HazardKind::Data => self.data_stalls += cycles,
        }
    }

    /// Stall cycles charged to `kind`.
    pub const fn stalls(&self, kind: HazardKind) -> u64 {
        match kind {
            HazardKind::LoadDelay => self.load_delay_stalls,
            HazardKind::Structural => self.structural_stalls,
            HazardKind::Data => self.data_stalls,
        }
    }

    /// Stall cycles over all categories.
    pub const fn total_stalls(&self) -> u64 {
        self.load_delay_stalls + self.structural_stalls + self.data_stalls
    }

    /// Share of all stall cycles charged to `kind`, in percent.
    ///
    /// Zero when the run had no stalls.
    pub fn percent_of_stalls(&self, kind: HazardKind) -> f64 {
        percent(self.stalls(kind), self.total_stalls())
    }

    /// Share of all cycles stalled on `kind`, in percent.
    pub fn percent_of_cycles(&self, kind: HazardKind) -> f64 {
        percent(self.stalls(kind), self.cycles)
    }

    /// Writes the hazard table and the squash/flush counts.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_table<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "hazard type  cycles  % of stalls  % of total")?;
        writeln!(out, "{TABLE_RULE}")?;

        let mut stall_share = 0.0;
        for kind in [HazardKind::LoadDelay, HazardKind::Structural, HazardKind::Data] {
            let share = self.percent_of_stalls(kind);
            stall_share += share;
            row(out, &kind.to_string(), self.stalls(kind), share, self.percent_of_cycles(kind))?;
        }

        writeln!(out, "{TABLE_RULE}")?;
        let total = self.total_stalls();
        row(out, "total", total, stall_share, percent(total, self.cycles))?;

        writeln!(out)?;
        writeln!(out, "WAW squashes: {}", self.waw_squashes)?;
        writeln!(out, "branch flushes: {}", self.branch_flushes)
    }

    /// Renders the hazard table to a string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = self.write_table(&mut out);
        out
    }

    /// Prints the hazard table to stdout.
    pub fn print(&self) {
        print!("{}", self.render());
    }
}

fn row<W: fmt::Write>(
    out: &mut W,
    label: &str,
    cycles: u64,
    of_stalls: f64,
    of_total: f64,
) -> fmt::Result {
    writeln!(out, "{label:<11}  {cycles:>6}  {of_stalls:>11.2}  {of_total:>10.2}")
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
