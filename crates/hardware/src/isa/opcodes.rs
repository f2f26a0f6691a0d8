//! Opcodes and Instruction Classes.
//!
//! Defines the closed set of mnemonics the pipeline models and groups them into
//! the eight classes that drive stage routing and hazard detection:
//! 1. **Memory:** Loads and stores (`LW`, `L.S`, `SW`, `S.S`).
//! 2. **Control:** Conditional branches resolved in ID (`BEQ`, `BNE`).
//! 3. **Data Movement:** Register-file transfers and conversions (`MFC1`, `MTC1`, `MOV.S`, `CVT.*`).
//! 4. **Integer Arithmetic:** Single-cycle ALU operations (`DADD`, `DSUB`, `AND`, `OR`, `XOR`).
//! 5. **Floating-Point Arithmetic:** Multi-cycle unit operations (`ADD.S`, `SUB.S`, `MUL.S`, `DIV.S`).

use crate::common::error::DecodeError;
use crate::core::units::fpu::FpUnit;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Instruction class, the unit of routing and hazard rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum InstrClass {
    /// `LW`, `L.S`.
    Load,
    /// `SW`, `S.S`.
    Store,
    /// `BEQ`, `BNE`.
    Branch,
    /// `MFC1`, `MTC1`, `MOV.S`, `CVT.S.W`, `CVT.W.S`.
    MoveConvert,
    /// `DADD`, `DSUB`, `AND`, `OR`, `XOR`.
    IntArith,
    /// `ADD.S`, `SUB.S`.
    FpAddSub,
    /// `MUL.S`.
    FpMul,
    /// `DIV.S`.
    FpDiv,
}

impl InstrClass {
    /// Functional unit that executes this class, if it is floating-point arithmetic.
    pub const fn fp_unit(self) -> Option<FpUnit> {
        match self {
            Self::FpAddSub => Some(FpUnit::Add),
            Self::FpMul => Some(FpUnit::Mul),
            Self::FpDiv => Some(FpUnit::Div),
            _ => None,
        }
    }

    /// Returns `true` for classes executed by a floating-point functional unit.
    #[inline]
    pub const fn is_fp_arith(self) -> bool {
        self.fp_unit().is_some()
    }
}

/// A modelled mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Opcode {
    /// Load word.
    Lw,
    /// Load single-precision float.
    Ls,
    /// Store word.
    Sw,
    /// Store single-precision float.
    Ss,
    /// Branch if equal.
    Beq,
    /// Branch if not equal.
    Bne,
    /// Move from FP register to integer register.
    Mfc1,
    /// Move from integer register to FP register.
    Mtc1,
    /// FP register move.
    MovS,
    /// Convert word to single.
    CvtSW,
    /// Convert single to word.
    CvtWS,
    /// Integer add.
    Dadd,
    /// Integer subtract.
    Dsub,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise xor.
    Xor,
    /// FP add.
    AddS,
    /// FP subtract.
    SubS,
    /// FP multiply.
    MulS,
    /// FP divide.
    DivS,
}

impl Opcode {
    /// Every modelled opcode, in listing order.
    pub const ALL: [Self; 20] = [
        Self::Lw,
        Self::Ls,
        Self::Sw,
        Self::Ss,
        Self::Beq,
        Self::Bne,
        Self::Mfc1,
        Self::Mtc1,
        Self::MovS,
        Self::CvtSW,
        Self::CvtWS,
        Self::Dadd,
        Self::Dsub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::AddS,
        Self::SubS,
        Self::MulS,
        Self::DivS,
    ];

    /// Assembly mnemonic as it appears in a trace.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lw => "LW",
            Self::Ls => "L.S",
            Self::Sw => "SW",
            Self::Ss => "S.S",
            Self::Beq => "BEQ",
            Self::Bne => "BNE",
            Self::Mfc1 => "MFC1",
            Self::Mtc1 => "MTC1",
            Self::MovS => "MOV.S",
            Self::CvtSW => "CVT.S.W",
            Self::CvtWS => "CVT.W.S",
            Self::Dadd => "DADD",
            Self::Dsub => "DSUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::AddS => "ADD.S",
            Self::SubS => "SUB.S",
            Self::MulS => "MUL.S",
            Self::DivS => "DIV.S",
        }
    }

    /// Class this opcode belongs to.
    pub const fn class(self) -> InstrClass {
        match self {
            Self::Lw | Self::Ls => InstrClass::Load,
            Self::Sw | Self::Ss => InstrClass::Store,
            Self::Beq | Self::Bne => InstrClass::Branch,
            Self::Mfc1 | Self::Mtc1 | Self::MovS | Self::CvtSW | Self::CvtWS => {
                InstrClass::MoveConvert
            }
            Self::Dadd | Self::Dsub | Self::And | Self::Or | Self::Xor => InstrClass::IntArith,
            Self::AddS | Self::SubS => InstrClass::FpAddSub,
            Self::MulS => InstrClass::FpMul,
            Self::DivS => InstrClass::FpDiv,
        }
    }

    /// Returns `true` if the result leaves MEM through the FP write-back port.
    ///
    /// These integer-pipe instructions produce a floating-point register
    /// value, so MEM hands them to FWB instead of WB.
    pub const fn writes_back_via_fwb(self) -> bool {
        matches!(
            self,
            Self::Ls | Self::Mtc1 | Self::MovS | Self::CvtSW | Self::CvtWS
        )
    }
}

impl FromStr for Opcode {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic() == upper)
            .ok_or_else(|| DecodeError::UnknownMnemonic(s.trim().to_string()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
