//! Instruction Trace Decoder.
//!
//! This module turns the textual instruction trace into `Instruction` records.
//! Each non-blank line holds one instruction in MIPS-like syntax:
//!
//! ```text
//! LW    R1,0(R2)          SW    R1,0(R2)
//! L.S   F1,8(R3)          S.S   F1,8(R3)
//! BEQ   R1,R2,loop:T      BNE   R1,R2,loop:F
//! MFC1  R1,F2             MTC1  R1,F2
//! MOV.S F1,F2             CVT.S.W F1,F2      CVT.W.S F1,F2
//! DADD  R1,R2,R3          ADD.S F1,F2,F3     MUL.S F1,F2,F3    DIV.S F1,F2,F3
//! ```
//!
//! Sequence numbers are assigned 1-based in line order, skipping blank lines.

use crate::common::error::{DecodeError, SimError};
use crate::common::reg::Reg;
use crate::common::seq::SeqNum;
use crate::isa::instruction::{BranchOutcome, Instruction};
use crate::isa::opcodes::{InstrClass, Opcode};

/// Cursor over the comma-separated operands of one instruction.
struct Operands<'a> {
    mnemonic: &'static str,
    parts: std::str::Split<'a, char>,
}

impl<'a> Operands<'a> {
    fn new(opcode: Opcode, text: &'a str) -> Self {
        Self {
            mnemonic: opcode.mnemonic(),
            parts: text.split(','),
        }
    }

    fn next_raw(&mut self, operand: &'static str) -> Result<&'a str, DecodeError> {
        match self.parts.next().map(str::trim) {
            Some(part) if !part.is_empty() => Ok(part),
            _ => Err(DecodeError::MissingOperand {
                mnemonic: self.mnemonic,
                operand,
            }),
        }
    }

    fn reg(&mut self, operand: &'static str) -> Result<Reg, DecodeError> {
        self.next_raw(operand)?.parse()
    }

    /// Parses `disp(base)` and returns the base register.
    fn mem_base(&mut self, operand: &'static str) -> Result<Reg, DecodeError> {
        let raw = self.next_raw(operand)?;
        let bad = || DecodeError::BadMemoryOperand(raw.to_string());

        let (disp, rest) = raw.split_once('(').ok_or_else(bad)?;
        let base = rest.strip_suffix(')').ok_or_else(bad)?;
        let _: i64 = disp.trim().parse().map_err(|_| bad())?;
        base.parse()
    }

    /// Parses `label:T` / `label:F`.
    fn branch_target(&mut self, operand: &'static str) -> Result<BranchOutcome, DecodeError> {
        let raw = self.next_raw(operand)?;
        let bad = || DecodeError::BadBranchOutcome(raw.to_string());

        let (label, outcome) = raw.rsplit_once(':').ok_or_else(bad)?;
        if label.trim().is_empty() {
            return Err(bad());
        }
        match outcome.trim() {
            "T" | "t" => Ok(BranchOutcome::Taken),
            "F" | "f" => Ok(BranchOutcome::NotTaken),
            _ => Err(bad()),
        }
    }

    fn finish(mut self) -> Result<(), DecodeError> {
        match self.parts.next() {
            Some(extra) => Err(DecodeError::TrailingOperand(extra.trim().to_string())),
            None => Ok(()),
        }
    }
}

/// Decodes a single trace line.
///
/// # Arguments
///
/// * `seq` - Sequence number to assign.
/// * `line` - Instruction text, e.g. `ADD.S F1,F2,F3`.
///
/// # Returns
///
/// The decoded instruction, or the reason the line is malformed.
pub fn decode_line(seq: SeqNum, line: &str) -> Result<Instruction, DecodeError> {
    let text = line.trim();
    let (mnemonic, rest) = text
        .split_once(char::is_whitespace)
        .unwrap_or((text, ""));
    let opcode: Opcode = mnemonic.parse()?;
    let mut ops = Operands::new(opcode, rest.trim());

    let mut dest = None;
    let mut sources = [None, None];
    let mut branch = None;

    match opcode.class() {
        InstrClass::Load => {
            dest = Some(ops.reg("destination")?);
            sources[0] = Some(ops.mem_base("address")?);
        }
        InstrClass::Store => {
            sources[0] = Some(ops.reg("source")?);
            sources[1] = Some(ops.mem_base("address")?);
        }
        InstrClass::Branch => {
            sources[0] = Some(ops.reg("first source")?);
            sources[1] = Some(ops.reg("second source")?);
            branch = Some(ops.branch_target("target")?);
        }
        InstrClass::MoveConvert if opcode == Opcode::Mtc1 => {
            sources[0] = Some(ops.reg("source")?);
            dest = Some(ops.reg("destination")?);
        }
        InstrClass::MoveConvert => {
            dest = Some(ops.reg("destination")?);
            sources[0] = Some(ops.reg("source")?);
        }
        InstrClass::IntArith | InstrClass::FpAddSub | InstrClass::FpMul | InstrClass::FpDiv => {
            dest = Some(ops.reg("destination")?);
            sources[0] = Some(ops.reg("first source")?);
            sources[1] = Some(ops.reg("second source")?);
        }
    }
    ops.finish()?;

    Ok(Instruction {
        seq,
        opcode,
        dest,
        sources,
        branch,
        text: text.to_string(),
    })
}

/// Decodes a whole trace.
///
/// Blank lines are skipped; every other line must decode. The first failure
/// is reported with its 1-based line number.
pub fn decode_trace(text: &str) -> Result<Vec<Instruction>, SimError> {
    let mut program = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let seq = SeqNum::new(program.len() as u32 + 1);
        let inst = decode_line(seq, line).map_err(|source| SimError::Decode {
            line: idx + 1,
            source,
        })?;
        program.push(inst);
    }
    Ok(program)
}
