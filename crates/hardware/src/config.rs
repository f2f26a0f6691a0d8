//! Configuration system for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline functional-unit latencies and trace capacity.
//! 2. **Structures:** `Config` with latency and general sections.
//! 3. **Formats:** The plain-text latency file (`config.txt`) and JSON.
//!
//! Every constructor other than `Default` validates its result, so the
//! pipeline core only ever sees positive latencies.

use crate::common::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default configuration constants for the simulator.
///
/// These values are used when a configuration is built programmatically or
/// when a JSON document omits a field.
mod defaults {
    /// FP add/subtract latency in cycles.
    pub const FP_ADD_SUB: u32 = 2;

    /// FP multiply latency in cycles.
    pub const FP_MUL: u32 = 5;

    /// FP divide latency in cycles.
    pub const FP_DIV: u32 = 10;

    /// Maximum number of instructions per trace.
    pub const MAX_INSTRUCTIONS: usize = crate::common::constants::DEFAULT_MAX_INSTRUCTIONS;
}

/// Entry names of the plain-text format, in file order.
const TEXT_KEYS: [&str; 3] = ["fp_add_sub", "fp_mul", "fp_div"];

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.latency.fp_add_sub, 2);
/// assert_eq!(config.general.max_instructions, 100);
/// ```
///
/// Reading the plain-text latency file:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let text = "fp_add_sub: 2\nfp_mul: 4\nfp_div: 12\n";
/// let config = Config::from_text(text).unwrap();
/// assert_eq!(config.latency.fp_mul, 4);
/// assert_eq!(config.latency.fp_div, 12);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use pipesim_core::config::Config;
///
/// let json = r#"{
///     "latency": { "fp_add_sub": 3, "fp_mul": 6, "fp_div": 18 },
///     "general": { "max_instructions": 250 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.latency.fp_div, 18);
/// assert_eq!(config.general.max_instructions, 250);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Functional-unit latencies
    #[serde(default)]
    pub latency: LatencyConfig,
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Parses the plain-text latency file.
    ///
    /// The format has three non-blank lines, read positionally as FP
    /// add/subtract, multiply and divide latencies. Each line is
    /// `<label> <value>` (or `<label>:<value>`); the label is informational.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if an entry is missing, non-numeric, zero, or
    /// if extra lines follow the three entries.
    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        let mut values = [0u32; 3];
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        for (slot, key) in values.iter_mut().zip(TEXT_KEYS) {
            let line = lines.next().ok_or(ConfigError::MissingEntry(key))?;
            let raw = line
                .rsplit(|c: char| c.is_whitespace() || c == ':')
                .next()
                .unwrap_or(line);
            *slot = raw.parse().map_err(|_| ConfigError::BadValue {
                key,
                value: raw.to_string(),
            })?;
        }
        if let Some(extra) = lines.next() {
            return Err(ConfigError::UnexpectedLine(extra.to_string()));
        }

        let config = Self {
            latency: LatencyConfig {
                fp_add_sub: values[0],
                fp_mul: values[1],
                fp_div: values[2],
            },
            general: GeneralConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration. Omitted sections and fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on malformed JSON or out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotPositive` naming the first zero entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.latency.fp_add_sub == 0 {
            return Err(ConfigError::NotPositive("fp_add_sub"));
        }
        if self.latency.fp_mul == 0 {
            return Err(ConfigError::NotPositive("fp_mul"));
        }
        if self.latency.fp_div == 0 {
            return Err(ConfigError::NotPositive("fp_div"));
        }
        if self.general.max_instructions == 0 {
            return Err(ConfigError::NotPositive("max_instructions"));
        }
        Ok(())
    }
}

/// Floating-point functional-unit latencies.
///
/// Each value is the number of consecutive cycles an instruction occupies
/// its unit before it is eligible for FP write-back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyConfig {
    /// Cycles for `ADD.S` / `SUB.S` in FADD
    #[serde(default = "LatencyConfig::default_fp_add_sub")]
    pub fp_add_sub: u32,

    /// Cycles for `MUL.S` in FMUL
    #[serde(default = "LatencyConfig::default_fp_mul")]
    pub fp_mul: u32,

    /// Cycles for `DIV.S` in FDIV
    #[serde(default = "LatencyConfig::default_fp_div")]
    pub fp_div: u32,
}

impl LatencyConfig {
    const fn default_fp_add_sub() -> u32 {
        defaults::FP_ADD_SUB
    }

    const fn default_fp_mul() -> u32 {
        defaults::FP_MUL
    }

    const fn default_fp_div() -> u32 {
        defaults::FP_DIV
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            fp_add_sub: defaults::FP_ADD_SUB,
            fp_mul: defaults::FP_MUL,
            fp_div: defaults::FP_DIV,
        }
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Maximum number of instructions accepted in one trace
    #[serde(default = "GeneralConfig::default_max_instructions")]
    pub max_instructions: usize,
}

impl GeneralConfig {
    const fn default_max_instructions() -> usize {
        defaults::MAX_INSTRUCTIONS
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_instructions: defaults::MAX_INSTRUCTIONS,
        }
    }
}
