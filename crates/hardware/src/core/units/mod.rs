//! Execution units.
//!
//! This module contains the floating-point functional units and the latency
//! table that sizes their occupancy.

/// Floating-point functional units (FADD, FMUL, FDIV) and latency lookup.
pub mod fpu;
