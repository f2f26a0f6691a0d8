//! Decoded instruction records.
//!
//! An `Instruction` holds the static, decode-time information of one trace
//! entry: its sequence number, opcode, register operands and (for branches)
//! the resolved outcome. Runtime pipeline state lives in
//! [`PipelineEntry`](crate::core::pipeline::entry::PipelineEntry).

use crate::common::reg::Reg;
use crate::common::seq::SeqNum;
use crate::isa::opcodes::{InstrClass, Opcode};
use serde::Serialize;
use std::fmt;

/// Resolution of a conditional branch, recorded in the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BranchOutcome {
    /// Branch is taken (`:T`); the instruction fetched behind it is flushed.
    Taken,
    /// Branch falls through (`:F`).
    NotTaken,
}

/// A decoded instruction.
///
/// Operand layout by class:
/// - loads: `dest = rt`, `sources = [base, None]`
/// - stores: `dest = None`, `sources = [value, base]`
/// - branches: `dest = None`, `sources = [rs, rt]`
/// - moves/conversions: `dest`, `sources = [src, None]`
/// - arithmetic: `dest`, `sources = [src1, src2]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Instruction {
    /// Fetch-order sequence number (1-based).
    pub seq: SeqNum,
    /// Operation.
    pub opcode: Opcode,
    /// Register written by the instruction, if any.
    pub dest: Option<Reg>,
    /// Registers read by the instruction.
    pub sources: [Option<Reg>; 2],
    /// Outcome for branches; `None` for every other class.
    pub branch: Option<BranchOutcome>,
    /// Source text of the trace line.
    pub text: String,
}

impl Instruction {
    /// Instruction class of the opcode.
    #[inline]
    pub const fn class(&self) -> InstrClass {
        self.opcode.class()
    }

    /// Registers whose values the instruction consumes.
    ///
    /// A store's address base is not a value operand and is left out; it is
    /// reported by [`store_base`](Self::store_base).
    pub fn operands(&self) -> impl Iterator<Item = Reg> + '_ {
        let count = if self.class() == InstrClass::Store { 1 } else { 2 };
        self.sources.iter().take(count).flatten().copied()
    }

    /// Returns `true` if `reg` is one of the value operands.
    pub fn reads_operand(&self, reg: Reg) -> bool {
        self.operands().any(|src| src == reg)
    }

    /// Address base register of a store.
    ///
    /// Stores compute their address in EX from this register, so a load
    /// producing it costs a load-delay stall even though the stored value
    /// itself is not needed until MEM.
    pub const fn store_base(&self) -> Option<Reg> {
        match self.class() {
            InstrClass::Store => self.sources[1],
            _ => None,
        }
    }

    /// Destination, if it is a floating-point register.
    pub fn fp_dest(&self) -> Option<Reg> {
        self.dest.filter(|r| r.is_fp())
    }

    /// Returns `true` for a branch whose outcome is taken.
    pub fn is_taken_branch(&self) -> bool {
        self.branch == Some(BranchOutcome::Taken)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.opcode)
        } else {
            f.write_str(&self.text)
        }
    }
}
