//! Cycle-by-stage timeline.
//!
//! Collects the [`CycleRecord`] of every simulated cycle and renders them as
//! the cycle diagram: one row per cycle, one 5-wide column per stage.

use crate::common::seq::SeqNum;
use crate::core::pipeline::snapshot::{CycleRecord, Slot};
use crate::core::pipeline::stage::Stage;
use serde::Serialize;
use std::fmt;

/// Column width of the diagram.
const COLUMN_WIDTH: usize = 5;

/// Every cycle of a run, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    records: Vec<CycleRecord>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends the record of the next cycle.
    pub fn push(&mut self, record: CycleRecord) {
        self.records.push(record);
    }

    /// All records in cycle order.
    pub fn records(&self) -> &[CycleRecord] {
        &self.records
    }

    /// Number of cycles recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no cycle was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cycles (1-based) in which `seq` occupied `stage`.
    pub fn cycles_in(&self, seq: SeqNum, stage: Stage) -> Vec<u64> {
        self.records
            .iter()
            .filter(|r| r.slot(stage) == Slot::Busy(seq))
            .map(|r| r.cycle)
            .collect()
    }

    /// Writes the diagram header, rule and one row per cycle.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying writer.
    pub fn write_diagram<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{:>COLUMN_WIDTH$}", "cycle")?;
        for stage in Stage::ALL {
            write!(out, " {stage:>COLUMN_WIDTH$}")?;
        }
        writeln!(out)?;

        let rule = "-".repeat(COLUMN_WIDTH);
        let rules = vec![rule.as_str(); Stage::COUNT + 1];
        writeln!(out, "{}", rules.join(" "))?;

        for record in &self.records {
            writeln!(out, "{}", render_row(record))?;
        }
        Ok(())
    }

    /// Renders the diagram to a string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = self.write_diagram(&mut out);
        out
    }
}

fn render_row(record: &CycleRecord) -> String {
    let mut row = format!("{:>COLUMN_WIDTH$}", record.cycle);
    for slot in record.slots {
        row.push(' ');
        let cell = match slot {
            Slot::Empty => String::new(),
            Slot::Busy(seq) => seq.to_string(),
            Slot::Stall => "stall".to_string(),
        };
        row.push_str(&format!("{cell:>COLUMN_WIDTH$}"));
    }
    row.truncate(row.trim_end().len());
    row
}
