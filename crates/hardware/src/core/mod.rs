//! Core pipeline model.
//!
//! This module contains the instruction pipeline and the floating-point
//! functional units it schedules onto.

/// Instruction pipeline (stages, window, hazards, engine).
pub mod pipeline;

/// Functional units and their latencies.
pub mod units;

pub use self::pipeline::Pipeline;
