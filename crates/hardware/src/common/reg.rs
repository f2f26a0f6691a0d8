//! Architectural register names.
//!
//! This module provides the `Reg` type used for instruction operands. It provides:
//! 1. **Register Files:** Separate integer (`R<n>`) and floating-point (`F<n>`) files.
//! 2. **Parsing:** Conversion from trace operand text with range checking.
//! 3. **Hazard Queries:** Identifies floating-point destinations for WAW tracking.

use crate::common::constants::{FP_REG_PREFIX, INT_REG_PREFIX, REGISTERS_PER_FILE};
use crate::common::error::DecodeError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Register file an operand belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RegFile {
    /// General-purpose integer registers `R0`..`R31`.
    Int,
    /// Floating-point registers `F0`..`F31`.
    Fp,
}

/// An architectural register operand such as `R4` or `F12`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Reg {
    /// Register file.
    pub file: RegFile,
    /// Index within the file (0-31).
    pub index: u8,
}

impl Reg {
    /// Integer register `R<index>`.
    pub const fn int(index: u8) -> Self {
        Self {
            file: RegFile::Int,
            index,
        }
    }

    /// Floating-point register `F<index>`.
    pub const fn fp(index: u8) -> Self {
        Self {
            file: RegFile::Fp,
            index,
        }
    }

    /// Returns `true` for floating-point registers.
    #[inline]
    pub const fn is_fp(self) -> bool {
        matches!(self.file, RegFile::Fp)
    }
}

impl FromStr for Reg {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let bad = || DecodeError::BadRegister(name.to_string());

        let mut chars = name.chars();
        let file = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some(INT_REG_PREFIX) => RegFile::Int,
            Some(FP_REG_PREFIX) => RegFile::Fp,
            _ => return Err(bad()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let index: u8 = digits.parse().map_err(|_| bad())?;
        if index >= REGISTERS_PER_FILE {
            return Err(bad());
        }
        Ok(Self { file, index })
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.file {
            RegFile::Int => INT_REG_PREFIX,
            RegFile::Fp => FP_REG_PREFIX,
        };
        write!(f, "{}{}", prefix, self.index)
    }
}
