//! Error definitions.
//!
//! This module defines the error types of the simulator. It provides:
//! 1. **Decode Errors:** Syntax problems in a single line of an instruction trace.
//! 2. **Configuration Errors:** Malformed or out-of-range latency configuration.
//! 3. **Simulation Errors:** Top-level failures that terminate a run before it starts.
//!
//! Hazards are modelled conditions, never errors: everything the pipeline
//! encounters once a run has started is resolved by stalling, squashing or
//! flushing and recorded in the statistics.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to decode one line of an instruction trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The mnemonic is not part of the modelled instruction set.
    #[error("unknown instruction `{0}`")]
    UnknownMnemonic(String),

    /// A required operand is absent.
    #[error("`{mnemonic}` is missing its {operand} operand")]
    MissingOperand {
        /// Mnemonic being decoded.
        mnemonic: &'static str,
        /// Human-readable operand role.
        operand: &'static str,
    },

    /// An operand is not a valid `R<n>`/`F<n>` register name.
    #[error("invalid register `{0}`")]
    BadRegister(String),

    /// A memory operand is not of the form `disp(base)`.
    #[error("invalid memory operand `{0}`, expected `disp(base)`")]
    BadMemoryOperand(String),

    /// A branch target lacks a `:T` or `:F` outcome suffix.
    #[error("invalid branch outcome in `{0}`, expected `label:T` or `label:F`")]
    BadBranchOutcome(String),

    /// More operands were supplied than the instruction takes.
    #[error("unexpected trailing operand `{0}`")]
    TrailingOperand(String),
}

/// Failure to load or validate the latency configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required latency entry is absent.
    #[error("missing configuration entry `{0}`")]
    MissingEntry(&'static str),

    /// An entry's value is not an integer.
    #[error("invalid value `{value}` for `{key}`")]
    BadValue {
        /// Entry being read.
        key: &'static str,
        /// Offending text.
        value: String,
    },

    /// An entry that must be positive is zero.
    #[error("`{0}` must be at least 1")]
    NotPositive(&'static str),

    /// More entries were supplied than the format defines.
    #[error("unexpected configuration line `{0}`")]
    UnexpectedLine(String),

    /// JSON configuration could not be deserialized.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal error terminating a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The trace holds more instructions than the configured capacity.
    #[error("too many instructions in the trace ({count} > {capacity})")]
    TraceTooLarge {
        /// Number of instructions supplied.
        count: usize,
        /// Configured maximum.
        capacity: usize,
    },

    /// A trace line could not be decoded.
    #[error("line {line}: {source}")]
    Decode {
        /// 1-based line number in the trace.
        line: usize,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// The configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The run results could not be serialized.
    #[error("could not serialize report: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A configuration or trace file could not be read.
    #[error("could not read `{}`: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
