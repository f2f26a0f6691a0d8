//! Cycle-accurate pipeline simulator library.
//!
//! This crate models a single-issue, in-order MIPS-style pipeline with
//! multi-cycle floating-point units:
//! 1. **Core:** IF/ID/EX/MEM/WB plus FADD, FMUL, FDIV and the FWB port, with
//!    stall, WAW squash and branch-flush handling.
//! 2. **ISA:** The modelled mnemonics, instruction classes and trace decoder.
//! 3. **Configuration:** Functional-unit latencies and trace capacity.
//! 4. **Simulation:** Driver, loaders, cycle timeline and textual report.
//! 5. **Statistics:** Hazard stall cycles, squashes and flushes.

/// Common types and constants (registers, sequence numbers, errors).
pub mod common;
/// Simulator configuration (defaults, latency and general sections).
pub mod config;
/// Pipeline core (stages, window, hazards, engine, functional units).
pub mod core;
/// Instruction set (opcodes, decoded instructions, trace decoder).
pub mod isa;
/// Simulation driver, loaders, timeline and report.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Top-level error type.
pub use crate::common::error::SimError;
/// Root configuration type; use `Config::default()` or load from text/JSON.
pub use crate::config::Config;
/// Cycle-stepping pipeline engine.
pub use crate::core::Pipeline;
/// Decoded instruction record.
pub use crate::isa::Instruction;
/// Driver and its results.
pub use crate::sim::{SimReport, Simulator};
/// Hazard counters.
pub use crate::stats::SimStats;
