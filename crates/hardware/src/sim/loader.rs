//! Configuration and Trace Loading.
//!
//! This module reads simulator inputs from disk. It performs:
//! 1. **Configuration loading:** JSON files (`*.json`) through serde, anything
//!    else as the three-line latency text format.
//! 2. **Trace loading:** Reads a trace file or any reader and decodes it.

use crate::common::error::SimError;
use crate::config::Config;
use crate::isa::decode::decode_trace;
use crate::isa::instruction::Instruction;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Display name used for traces read from a stream.
const STREAM_NAME: &str = "<stdin>";

/// Loads a configuration file.
///
/// # Arguments
///
/// * `path` - Path to the configuration; a `.json` extension selects JSON.
///
/// # Returns
///
/// The validated configuration.
pub fn load_config(path: &Path) -> Result<Config, SimError> {
    let text = read_file(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        Config::from_json(&text)?
    } else {
        Config::from_text(&text)?
    };
    Ok(config)
}

/// Loads and decodes a trace file.
pub fn load_trace(path: &Path) -> Result<Vec<Instruction>, SimError> {
    decode_trace(&read_file(path)?)
}

/// Reads a whole trace from `reader` and decodes it.
pub fn read_trace<R: Read>(mut reader: R) -> Result<Vec<Instruction>, SimError> {
    let mut text = String::new();
    let _ = reader
        .read_to_string(&mut text)
        .map_err(|source| SimError::Io {
            path: PathBuf::from(STREAM_NAME),
            source,
        })?;
    decode_trace(&text)
}

fn read_file(path: &Path) -> Result<String, SimError> {
    fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })
}
