//! Hazard Detection at Decode.
//!
//! This module decides what happens to an instruction the moment it enters
//! ID. Older in-flight instructions are scanned nearest first, and each one
//! visited is checked for:
//! 1. **WAW Squash:** An older writer of the same FP register that would
//!    finish after the entering instruction has its result squashed.
//! 2. **Stall:** The first structural, load-delay or data conflict fixes the
//!    stall length and category.
//!
//! The scan ends at the first older instruction that decides the stall
//! outcome, whether it stalls or forwards; writers beyond it are not
//! examined. Detection is pure: it reads the window and returns a
//! [`HazardVerdict`] which the engine applies.

use crate::common::constants::{BRANCH_OPERAND_STALL, LOAD_DELAY_STALL};
use crate::core::pipeline::entry::PipelineEntry;
use crate::core::pipeline::window::PipelineWindow;
use crate::isa::opcodes::InstrClass;
use serde::Serialize;
use std::fmt;

/// Category a stall cycle is charged to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum HazardKind {
    /// Consumer of a load result, or a store whose base register is being loaded.
    LoadDelay,
    /// Functional unit busy with an older instruction.
    Structural,
    /// Operand produced by an older non-load instruction.
    Data,
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::LoadDelay => "load-delay",
            Self::Structural => "structural",
            Self::Data => "data",
        })
    }
}

/// A stall requested for the entering instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StallRequest {
    /// Cycles to hold ID and IF; always positive.
    pub cycles: u32,
    /// Category charged.
    pub kind: HazardKind,
    /// Window index of the older instruction causing it.
    pub culprit: usize,
}

/// Outcome of decoding one instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HazardVerdict {
    /// Window indices of older instructions whose results are now squashed.
    pub squashes: Vec<usize>,
    /// Stall to serve, if any.
    pub stall: Option<StallRequest>,
}

/// What one older instruction means for the scan.
enum Step {
    /// Unrelated, or a dependency resolved in time; keep scanning.
    Continue,
    /// The stall outcome is decided here.
    Stop(Option<StallRequest>),
}

/// Runs WAW and stall detection for the entry at `idx`, which has just
/// entered ID.
///
/// # Arguments
///
/// * `window` - The in-flight instructions, with `idx` the entering one.
/// * `idx` - Window index of the instruction in ID.
///
/// # Returns
///
/// The squashes to apply and the stall, if any, to start.
pub fn detect(window: &PipelineWindow, idx: usize) -> HazardVerdict {
    let mut verdict = HazardVerdict::default();
    let Some(entering) = window.get(idx) else {
        return verdict;
    };

    for (j, older) in window.older_than(idx) {
        if overtakes(entering, older) {
            verdict.squashes.push(j);
        }
        if let Step::Stop(stall) = stall_step(entering, j, older) {
            verdict.stall = stall;
            break;
        }
    }
    verdict
}

/// Returns `true` if `entering` writes the FP register `older` writes and
/// will finish its execution stage before `older` does.
fn overtakes(entering: &PipelineEntry, older: &PipelineEntry) -> bool {
    entering.inst.fp_dest().is_some_and(|dest| {
        older.inst.dest == Some(dest)
            && !older.result_squashed
            && entering.cycles_required < older.remaining()
    })
}

fn stall_step(entering: &PipelineEntry, j: usize, older: &PipelineEntry) -> Step {
    let stop = |cycles, kind| {
        Step::Stop(Some(StallRequest {
            cycles,
            kind,
            culprit: j,
        }))
    };
    let class = entering.inst.class();
    let older_class = older.inst.class();

    let unit_stage = class.fp_unit().map(|u| u.stage());
    if unit_stage == Some(older.stage) && older.cycles_completed != older.cycles_required {
        return stop(older.remaining(), HazardKind::Structural);
    }

    if older_class == InstrClass::Load
        && older.inst.dest.is_some()
        && older.inst.dest == entering.inst.store_base()
    {
        return stop(LOAD_DELAY_STALL, HazardKind::LoadDelay);
    }

    let Some(dest) = older.inst.dest else {
        return Step::Continue;
    };
    if !entering.inst.reads_operand(dest) {
        return Step::Continue;
    }

    if older_class == InstrClass::Load {
        // Stored values are read in MEM, after the load has produced them.
        if class == InstrClass::Store {
            return Step::Continue;
        }
        return stop(LOAD_DELAY_STALL, HazardKind::LoadDelay);
    }
    if class == InstrClass::Branch {
        return stop(BRANCH_OPERAND_STALL, HazardKind::Data);
    }
    if older_class.is_fp_arith() {
        let mut cycles = older.remaining();
        if class == InstrClass::Store {
            cycles = cycles.saturating_sub(1);
        }
        if cycles == 0 {
            return Step::Stop(None);
        }
        return stop(cycles, HazardKind::Data);
    }
    // Integer results are forwarded from EX.
    Step::Stop(None)
}
