//! In-flight instruction state.
//!
//! A `PipelineEntry` pairs an immutable [`Instruction`] with the runtime
//! state the engine mutates each cycle: the occupied stage, functional-unit
//! progress, the stall flag and the WAW result-squash flag. Entries are never
//! removed mid-cycle; leaving the pipeline sets `exit`, and the window drops
//! exited entries once the cycle snapshot has been taken.

use crate::common::seq::SeqNum;
use crate::core::pipeline::stage::Stage;
use crate::core::units::fpu::LatencyTable;
use crate::isa::instruction::Instruction;
use serde::Serialize;

/// How an instruction left the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitKind {
    /// Completed normally (write-back, store at MEM, branch at ID).
    Retired,
    /// Finished its functional unit with its result squashed by a younger writer.
    Squashed,
    /// Discarded from IF behind a taken branch.
    Flushed,
}

/// One pipeline exit, in the order exits happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Retirement {
    /// Instruction that left.
    pub seq: SeqNum,
    /// Cycle in which it left.
    pub cycle: u64,
    /// Stage it left from.
    pub stage: Stage,
    /// Manner of leaving.
    pub kind: ExitKind,
}

/// An instruction in flight.
#[derive(Clone, Debug)]
pub struct PipelineEntry {
    /// Decoded instruction.
    pub inst: Instruction,
    /// Stage currently occupied (or left, once `exit` is set).
    pub stage: Stage,
    /// Cycles needed in the execution stage.
    pub cycles_required: u32,
    /// Cycles spent so far in the execution stage.
    pub cycles_completed: u32,
    /// Held in place by an outstanding hazard stall.
    pub stalled: bool,
    /// Write-back suppressed by a younger writer of the same register.
    pub result_squashed: bool,
    /// Set once the entry has left the pipeline.
    pub exit: Option<ExitKind>,
}

impl PipelineEntry {
    /// Creates the IF-stage entry for a freshly fetched instruction.
    pub fn fetched(inst: Instruction, latencies: &LatencyTable) -> Self {
        let cycles_required = latencies.cycles_for(inst.class());
        Self {
            inst,
            stage: Stage::If,
            cycles_required,
            cycles_completed: 0,
            stalled: false,
            result_squashed: false,
            exit: None,
        }
    }

    /// Sequence number of the instruction.
    #[inline]
    pub const fn seq(&self) -> SeqNum {
        self.inst.seq
    }

    /// Still occupying a stage.
    #[inline]
    pub const fn is_active(&self) -> bool {
        self.exit.is_none()
    }

    /// Execution cycles still outstanding.
    #[inline]
    pub const fn remaining(&self) -> u32 {
        self.cycles_required.saturating_sub(self.cycles_completed)
    }

    /// In a functional unit with all its cycles done, awaiting FWB.
    pub const fn unit_complete(&self) -> bool {
        self.stage.is_fp_unit() && self.cycles_completed == self.cycles_required
    }

    /// Marks the entry as having left the pipeline from its current stage.
    pub fn leave(&mut self, kind: ExitKind, cycle: u64) -> Retirement {
        self.exit = Some(kind);
        self.stalled = false;
        Retirement {
            seq: self.seq(),
            cycle,
            stage: self.stage,
            kind,
        }
    }
}
