//! Floating-Point Functional Units and the Latency Table.
//!
//! The pipeline has three independent, non-pipelined floating-point units:
//! FADD (add/subtract), FMUL (multiply) and FDIV (divide). Each holds one
//! instruction at a time for a configurable number of cycles. This module
//! provides:
//! 1. **Unit Identity:** `FpUnit` and its mapping onto pipeline stages.
//! 2. **Latency Lookup:** `LatencyTable`, the cycles each class spends in its
//!    execution stage.

use crate::common::constants::INTEGER_PIPE_LATENCY;
use crate::config::LatencyConfig;
use crate::core::pipeline::stage::Stage;
use crate::isa::opcodes::InstrClass;
use serde::Serialize;

/// A floating-point functional unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FpUnit {
    /// Adder, executes `ADD.S` and `SUB.S`.
    Add,
    /// Multiplier, executes `MUL.S`.
    Mul,
    /// Divider, executes `DIV.S`.
    Div,
}

impl FpUnit {
    /// Units in the order the engine advances them each cycle.
    pub const ADVANCE_ORDER: [Self; 3] = [Self::Div, Self::Mul, Self::Add];

    /// Pipeline stage occupied while executing on this unit.
    pub const fn stage(self) -> Stage {
        match self {
            Self::Add => Stage::Fadd,
            Self::Mul => Stage::Fmul,
            Self::Div => Stage::Fdiv,
        }
    }
}

/// Execution-stage latency of every instruction class.
///
/// Integer, memory and data-movement classes always take
/// [`INTEGER_PIPE_LATENCY`] cycles; the three floating-point arithmetic
/// classes take their configured unit latency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyTable {
    add_sub: u32,
    mul: u32,
    div: u32,
}

impl LatencyTable {
    /// Builds a table from explicit unit latencies.
    ///
    /// A unit occupies its stage for at least one cycle, so zero is raised
    /// to [`INTEGER_PIPE_LATENCY`].
    pub const fn new(add_sub: u32, mul: u32, div: u32) -> Self {
        Self {
            add_sub: at_least_one_cycle(add_sub),
            mul: at_least_one_cycle(mul),
            div: at_least_one_cycle(div),
        }
    }

    /// Latency of a functional unit.
    pub const fn unit_latency(&self, unit: FpUnit) -> u32 {
        match unit {
            FpUnit::Add => self.add_sub,
            FpUnit::Mul => self.mul,
            FpUnit::Div => self.div,
        }
    }

    /// Cycles an instruction of `class` spends in its execution stage.
    pub const fn cycles_for(&self, class: InstrClass) -> u32 {
        match class.fp_unit() {
            Some(unit) => self.unit_latency(unit),
            None => INTEGER_PIPE_LATENCY,
        }
    }
}

const fn at_least_one_cycle(cycles: u32) -> u32 {
    if cycles < INTEGER_PIPE_LATENCY {
        INTEGER_PIPE_LATENCY
    } else {
        cycles
    }
}

impl From<&LatencyConfig> for LatencyTable {
    fn from(cfg: &LatencyConfig) -> Self {
        Self::new(cfg.fp_add_sub, cfg.fp_mul, cfg.fp_div)
    }
}
