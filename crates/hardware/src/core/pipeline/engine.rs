//! Cycle-stepping pipeline engine.
//!
//! `Pipeline` owns the pending instruction stream, the in-flight window, the
//! stall state and the hazard counters. Each [`Pipeline::tick`] runs the
//! stages retirement-first so that a stage vacated earlier in the pass can be
//! refilled later in the same cycle:
//!
//! 1. **FWB:** the oldest eligible instruction writes back through the FP port.
//! 2. **FDIV / FMUL / FADD:** progress the occupant, or admit from ID.
//! 3. **WB, MEM, EX:** the integer pipe drains forward.
//! 4. **Stall service:** while a stall is outstanding, ID and IF hold.
//! 5. **ID, IF:** decode with hazard detection, then fetch.
//!
//! Exits are marked on the entry and the window is compacted after the
//! cycle snapshot is taken.

use crate::core::pipeline::entry::{ExitKind, PipelineEntry, Retirement};
use crate::core::pipeline::hazards::{self, HazardKind};
use crate::core::pipeline::snapshot::{CycleRecord, Slot};
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::window::PipelineWindow;
use crate::core::units::fpu::{FpUnit, LatencyTable};
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::InstrClass;
use crate::stats::SimStats;
use std::collections::VecDeque;
use tracing::{debug, trace};

/// The single outstanding decode stall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct StallState {
    needed: u32,
    served: u32,
    kind: HazardKind,
}

/// In-order pipeline with multi-cycle floating-point units.
#[derive(Debug)]
pub struct Pipeline {
    pending: VecDeque<Instruction>,
    latencies: LatencyTable,
    window: PipelineWindow,
    stall: Option<StallState>,
    /// A taken branch resolved at decode; the next fetch is discarded.
    flush_pending: bool,
    cycle: u64,
    stats: SimStats,
    retirements: Vec<Retirement>,
}

impl Pipeline {
    /// Creates a pipeline that will fetch `program` in order.
    pub fn new(program: Vec<Instruction>, latencies: LatencyTable) -> Self {
        Self {
            pending: program.into(),
            latencies,
            window: PipelineWindow::new(),
            stall: None,
            flush_pending: false,
            cycle: 0,
            stats: SimStats::default(),
            retirements: Vec::new(),
        }
    }

    /// Returns `true` once nothing is in flight and nothing is left to fetch.
    pub fn is_finished(&self) -> bool {
        self.window.is_empty() && self.pending.is_empty()
    }

    /// Cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Every exit so far, in the order it happened.
    pub fn retirements(&self) -> &[Retirement] {
        &self.retirements
    }

    /// Instructions currently in flight.
    pub const fn window(&self) -> &PipelineWindow {
        &self.window
    }

    /// Consumes the pipeline, returning its counters and exit log.
    pub fn into_results(self) -> (SimStats, Vec<Retirement>) {
        (self.stats, self.retirements)
    }

    /// Simulates one clock cycle and returns what each stage held.
    pub fn tick(&mut self) -> CycleRecord {
        self.cycle += 1;
        self.stats.cycles = self.cycle;

        self.fp_writeback();
        for unit in FpUnit::ADVANCE_ORDER {
            self.advance_unit(unit);
        }
        self.writeback();
        self.memory();
        self.execute();

        let stalling = self.serve_stall();
        if !stalling {
            self.decode();
            self.fetch();
        }

        let record = self.snapshot(stalling);
        self.window.compact();
        record
    }

    /// Grants the FP write-back port to the oldest eligible instruction:
    /// a completed, unsquashed unit occupant or an FWB-routed instruction
    /// in MEM. A losing unit occupant holds its unit; a losing MEM occupant
    /// leaves through WB instead.
    fn fp_writeback(&mut self) {
        let winner = self.window.iter().position(|e| {
            e.is_active()
                && ((e.unit_complete() && !e.result_squashed)
                    || (e.stage == Stage::Mem && e.inst.opcode.writes_back_via_fwb()))
        });
        if let Some(idx) = winner {
            self.move_to(idx, Stage::Fwb);
            self.exit(idx, ExitKind::Retired);
        }
    }

    /// One action per unit per cycle: progress the occupant, or admit the
    /// instruction waiting in ID.
    fn advance_unit(&mut self, unit: FpUnit) {
        let stage = unit.stage();

        if let Some(idx) = self.window.occupant(stage) {
            let Some(entry) = self.window.get_mut(idx) else {
                return;
            };
            if entry.cycles_completed < entry.cycles_required {
                entry.cycles_completed += 1;
                if entry.cycles_completed == entry.cycles_required && entry.result_squashed {
                    self.exit(idx, ExitKind::Squashed);
                }
            }
            return;
        }

        let Some(idx) = self.window.occupant(Stage::Id) else {
            return;
        };
        let admit = self
            .window
            .get(idx)
            .is_some_and(|e| !e.stalled && e.inst.class().fp_unit() == Some(unit));
        if !admit {
            return;
        }

        self.move_to(idx, stage);
        if let Some(entry) = self.window.get_mut(idx) {
            entry.cycles_completed = 1;
            if entry.unit_complete() && entry.result_squashed {
                self.exit(idx, ExitKind::Squashed);
            }
        }
    }

    /// MEM to WB. An FWB-routed instruction still in MEM here lost the FP
    /// port this cycle.
    fn writeback(&mut self) {
        let Some(idx) = self.window.occupant(Stage::Mem) else {
            return;
        };
        self.move_to(idx, Stage::Wb);
        self.exit(idx, ExitKind::Retired);
    }

    /// EX to MEM; stores complete here.
    fn memory(&mut self) {
        if !self.window.is_free(Stage::Mem) {
            return;
        }
        let Some(idx) = self.window.occupant(Stage::Ex) else {
            return;
        };
        self.move_to(idx, Stage::Mem);
        if self.class_of(idx) == Some(InstrClass::Store) {
            self.exit(idx, ExitKind::Retired);
        }
    }

    /// ID to EX for everything that is neither a branch nor FP arithmetic.
    fn execute(&mut self) {
        if !self.window.is_free(Stage::Ex) {
            return;
        }
        let Some(idx) = self.window.occupant(Stage::Id) else {
            return;
        };
        let ready = self.window.get(idx).is_some_and(|e| {
            let class = e.inst.class();
            !e.stalled && !class.is_fp_arith() && class != InstrClass::Branch
        });
        if ready {
            self.move_to(idx, Stage::Ex);
            if let Some(entry) = self.window.get_mut(idx) {
                entry.cycles_completed = 1;
            }
        }
    }

    /// Counts one stall cycle if a stall is outstanding. Returns `true` if
    /// this cycle was a stall cycle.
    fn serve_stall(&mut self) -> bool {
        let Some(stall) = self.stall.as_mut() else {
            return false;
        };
        stall.served += 1;
        if stall.served < stall.needed {
            return true;
        }

        let kind = stall.kind;
        self.stall = None;
        for entry in self.window.iter_mut().filter(|e| e.is_active()) {
            entry.stalled = false;
        }
        debug!(cycle = self.cycle, %kind, "stall served");

        // A branch held for its operands resolves as soon as it is released.
        if let Some(idx) = self.window.occupant(Stage::Id)
            && self.class_of(idx) == Some(InstrClass::Branch)
        {
            self.resolve_branch(idx, true);
        }
        true
    }

    /// IF to ID, then hazard detection on the entering instruction.
    fn decode(&mut self) {
        if !self.window.is_free(Stage::Id) {
            return;
        }
        let Some(idx) = self.window.occupant(Stage::If) else {
            return;
        };
        self.move_to(idx, Stage::Id);

        let verdict = hazards::detect(&self.window, idx);
        for victim in verdict.squashes {
            if let Some(older) = self.window.get_mut(victim) {
                older.result_squashed = true;
                self.stats.waw_squashes += 1;
                debug!(cycle = self.cycle, seq = %older.seq(), dest = ?older.inst.dest, "WAW squash");
            }
        }

        if let Some(request) = verdict.stall {
            if let Some(entry) = self.window.get_mut(idx) {
                entry.stalled = true;
                debug!(
                    cycle = self.cycle,
                    seq = %entry.seq(),
                    kind = %request.kind,
                    cycles = request.cycles,
                    culprit = request.culprit,
                    "stall"
                );
            }
            self.stats.record_stall(request.kind, request.cycles);
            self.stall = Some(StallState {
                needed: request.cycles,
                served: 0,
                kind: request.kind,
            });
            return;
        }

        if self.class_of(idx) == Some(InstrClass::Branch) {
            self.resolve_branch(idx, false);
        }
    }

    /// Retires a branch at ID. A taken branch discards the instruction
    /// fetched in its decode cycle: already in IF when the branch was
    /// released from a stall, otherwise the one fetched later this cycle.
    fn resolve_branch(&mut self, idx: usize, released: bool) {
        let taken = self
            .window
            .get(idx)
            .is_some_and(|e| e.inst.is_taken_branch());
        self.exit(idx, ExitKind::Retired);
        debug!(cycle = self.cycle, taken, "branch resolved");

        if !taken {
            return;
        }
        if released {
            if let Some(fetched) = self.window.occupant(Stage::If) {
                self.exit(fetched, ExitKind::Flushed);
            }
        } else {
            self.flush_pending = true;
        }
    }

    fn fetch(&mut self) {
        let flush = std::mem::take(&mut self.flush_pending);
        if !self.window.is_free(Stage::If) {
            return;
        }
        let Some(inst) = self.pending.pop_front() else {
            return;
        };

        self.stats.instructions_fetched += 1;
        trace!(cycle = self.cycle, seq = %inst.seq, text = %inst, "fetch");
        let idx = self.window.push(PipelineEntry::fetched(inst, &self.latencies));
        if flush {
            self.exit(idx, ExitKind::Flushed);
        }
    }

    fn snapshot(&self, stalling: bool) -> CycleRecord {
        let mut record = CycleRecord::new(self.cycle);
        for entry in self.window.iter() {
            let slot = &mut record.slots[entry.stage.index()];
            if !entry.is_active() && *slot != Slot::Empty {
                continue;
            }
            let held = stalling && entry.is_active() && matches!(entry.stage, Stage::If | Stage::Id);
            *slot = if held {
                Slot::Stall
            } else {
                Slot::Busy(entry.seq())
            };
        }
        record
    }

    fn class_of(&self, idx: usize) -> Option<InstrClass> {
        self.window.get(idx).map(|e| e.inst.class())
    }

    fn move_to(&mut self, idx: usize, stage: Stage) {
        if let Some(entry) = self.window.get_mut(idx) {
            trace!(cycle = self.cycle, seq = %entry.seq(), from = %entry.stage, to = %stage, "advance");
            entry.stage = stage;
        }
    }

    fn exit(&mut self, idx: usize, kind: ExitKind) {
        let Some(entry) = self.window.get_mut(idx) else {
            return;
        };
        let retirement = entry.leave(kind, self.cycle);
        trace!(
            cycle = self.cycle,
            seq = %retirement.seq,
            stage = %retirement.stage,
            ?kind,
            "exit"
        );
        match kind {
            ExitKind::Retired => self.stats.instructions_retired += 1,
            ExitKind::Flushed => self.stats.branch_flushes += 1,
            ExitKind::Squashed => {}
        }
        self.retirements.push(retirement);
    }
}
