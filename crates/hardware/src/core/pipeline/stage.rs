//! Pipeline stage identifiers.

use serde::Serialize;
use std::fmt;

/// A pipeline or functional-unit stage.
///
/// Variants are declared in cycle-diagram column order, so `stage as usize`
/// is the column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Instruction fetch.
    If,
    /// Decode; hazards are detected and branches resolve here.
    Id,
    /// Integer execute.
    Ex,
    /// Memory access.
    Mem,
    /// Integer write-back.
    Wb,
    /// FP add/subtract unit.
    Fadd,
    /// FP multiply unit.
    Fmul,
    /// FP divide unit.
    Fdiv,
    /// FP write-back port.
    Fwb,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 9;

    /// All stages in diagram column order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::If,
        Self::Id,
        Self::Ex,
        Self::Mem,
        Self::Wb,
        Self::Fadd,
        Self::Fmul,
        Self::Fdiv,
        Self::Fwb,
    ];

    /// Column index in the cycle diagram.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column header label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::If => "IF",
            Self::Id => "ID",
            Self::Ex => "EX",
            Self::Mem => "MEM",
            Self::Wb => "WB",
            Self::Fadd => "FADD",
            Self::Fmul => "FMUL",
            Self::Fdiv => "FDIV",
            Self::Fwb => "FWB",
        }
    }

    /// Returns `true` for the three floating-point unit stages.
    pub const fn is_fp_unit(self) -> bool {
        matches!(self, Self::Fadd | Self::Fmul | Self::Fdiv)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}
