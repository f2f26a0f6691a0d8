//! Per-cycle stage occupancy.

use crate::common::seq::SeqNum;
use crate::core::pipeline::stage::Stage;
use serde::Serialize;

/// Contents of one stage column in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "seq")]
pub enum Slot {
    /// Nothing in the stage.
    #[default]
    Empty,
    /// The instruction that occupied or acted in the stage.
    Busy(SeqNum),
    /// Held by an outstanding stall.
    Stall,
}

/// What every stage held during one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// Cycle number, 1-based.
    pub cycle: u64,
    /// One slot per stage, indexed by [`Stage::index`].
    pub slots: [Slot; Stage::COUNT],
}

impl CycleRecord {
    /// An all-empty record.
    pub fn new(cycle: u64) -> Self {
        Self {
            cycle,
            slots: [Slot::Empty; Stage::COUNT],
        }
    }

    /// Slot of `stage`.
    #[inline]
    pub const fn slot(&self, stage: Stage) -> Slot {
        self.slots[stage.index()]
    }

    /// Stage holding `seq` this cycle, if any.
    pub fn stage_of(&self, seq: SeqNum) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|s| self.slot(*s) == Slot::Busy(seq))
    }
}
