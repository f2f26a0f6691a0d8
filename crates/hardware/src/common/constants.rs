//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Capacity:** The default bound on the number of instructions in a trace.
//! 2. **Latency:** The fixed execution latency of the integer pipe.
//! 3. **Register Files:** Register counts and name prefixes used by the decoder.

/// Default maximum number of instructions accepted in a single trace.
///
/// This is a configuration default (`GeneralConfig::max_instructions`), not
/// an architectural limit; the pipeline window is dynamically sized.
pub const DEFAULT_MAX_INSTRUCTIONS: usize = 100;

/// Cycles spent in the execution stage by every instruction that does not
/// use a floating-point functional unit.
pub const INTEGER_PIPE_LATENCY: u32 = 1;

/// Number of architectural registers in each register file.
pub const REGISTERS_PER_FILE: u8 = 32;

/// Name prefix of integer registers (`R0`..`R31`).
pub const INT_REG_PREFIX: char = 'R';

/// Name prefix of floating-point registers (`F0`..`F31`).
pub const FP_REG_PREFIX: char = 'F';

/// Stall cycles charged for a load-delay hazard.
pub const LOAD_DELAY_STALL: u32 = 1;

/// Stall cycles charged when a branch in ID waits for a source operand.
pub const BRANCH_OPERAND_STALL: u32 = 1;
