//! Instruction Set Definitions.
//!
//! Contains the modelled instruction set and the trace decoder:
//!
//! * `opcodes`: the closed mnemonic set and the instruction classes.
//! * `instruction`: the decoded, immutable instruction record.
//! * `decode`: the textual trace parser.

/// Trace line decoder.
pub mod decode;

/// Decoded instruction records.
pub mod instruction;

/// Mnemonics and instruction classes.
pub mod opcodes;

pub use decode::{decode_line, decode_trace};
pub use instruction::{BranchOutcome, Instruction};
pub use opcodes::{InstrClass, Opcode};
