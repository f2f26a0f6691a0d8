//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Capacity defaults, fixed latencies and register-file limits.
//! 2. **Error Handling:** Decode, configuration and simulation error types.
//! 3. **Registers:** Architectural register operand names.
//! 4. **Sequence Numbers:** The fetch-order identity of every instruction.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for decoding, configuration and simulation.
pub mod error;

/// Register operand names.
pub mod reg;

/// Instruction sequence numbers.
pub mod seq;

pub use error::{ConfigError, DecodeError, SimError};
pub use reg::{Reg, RegFile};
pub use seq::SeqNum;
