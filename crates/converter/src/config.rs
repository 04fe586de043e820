//! Configuration for the converter.
//!
//! This module defines the structures used to parameterize a conversion. It provides:
//! 1. **Defaults:** The bootloader bench constants (chunk size, address stride, cycle intervals).
//! 2. **Structures:** Chunk geometry and timing, grouped under a root `Config`.
//! 3. **Enums:** Output mode selection (sequenced or timed).
//!
//! `Config::default()` reproduces the stock bench behaviour. A JSON file may select the
//! mode and tune the timed schedule; chunk geometry is fixed by the bootloader protocol and
//! the input path comes from the command line, so neither is read from JSON.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::constants;
use crate::common::error::{Error, Result};

/// Default configuration constants.
mod defaults {
    use crate::common::constants;

    /// Firmware image read when nothing else is configured.
    pub const INPUT: &str = constants::DEFAULT_INPUT;

    /// Source bytes per write chunk.
    pub const CHUNK_LEN: u16 = constants::CHUNK_LEN;

    /// Destination address advance per chunk.
    pub const ADDR_STRIDE: u32 = constants::ADDR_STRIDE;

    /// Cycle of the first scheduled transaction.
    ///
    /// Leaves the bootloader time to come out of reset and flash its LED.
    pub const START_CYCLE: u64 = 2_000_000;

    /// Gap after each command header.
    pub const TXN_INTERVAL: u64 = 2_000;

    /// Gap between consecutive 4-byte data groups.
    pub const INTERBYTE_INTERVAL: u64 = 1_000;

    /// Gap after a chunk while the page is erased and programmed.
    pub const INTERWRITE_INTERVAL: u64 = 80_000;
}

/// Stimulus flavour to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Mode {
    /// Writes followed by read-backs, each line ending in a chip-select flag.
    #[default]
    Sequenced,
    /// Writes only, each line prefixed by an absolute simulation cycle.
    Timed,
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use ihex2spi_core::config::{Config, Mode};
///
/// let config = Config::default();
/// assert_eq!(config.mode, Mode::Sequenced);
/// assert_eq!(config.chunk.chunk_len, 128);
/// assert_eq!(config.chunk.addr_stride, 64);
/// ```
///
/// Partial JSON keeps defaults for anything omitted:
///
/// ```
/// use ihex2spi_core::config::{Config, Mode};
///
/// let json = r#"{ "mode": "Timed", "timing": { "interwrite_interval": 50000 } }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.mode, Mode::Timed);
/// assert_eq!(config.timing.interwrite_interval, 50_000);
/// assert_eq!(config.timing.txn_interval, 2_000);
/// assert_eq!(config.input, "Blink.ino.hex");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the Intel HEX image (set from the command line)
    #[serde(skip, default = "Config::default_input")]
    pub input: String,
    /// Output flavour
    #[serde(default)]
    pub mode: Mode,
    /// Chunk geometry (bootloader constants)
    #[serde(skip)]
    pub chunk: ChunkConfig,
    /// Cycle schedule for timed output
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    fn default_input() -> String {
        defaults::INPUT.to_string()
    }

    /// Reads and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, otherwise whatever [`Config::from_json`]
    /// reports.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&text)
    }

    /// Parses and validates a JSON configuration string.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for malformed JSON, unknown keys, or values rejected by
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the emitters rely on.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        if self.chunk.chunk_len == 0 || self.chunk.chunk_len > constants::MAX_CHUNK_LEN {
            return Err(Error::Config(format!(
                "chunk_len must be in 1..={}, got {}",
                constants::MAX_CHUNK_LEN,
                self.chunk.chunk_len
            )));
        }
        if self.chunk.addr_stride == 0 {
            return Err(Error::Config("addr_stride must be non-zero".to_string()));
        }
        if self.input.is_empty() {
            return Err(Error::Config("input path is empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: Self::default_input(),
            mode: Mode::default(),
            chunk: ChunkConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

/// How segments are split into write chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    /// Source bytes per chunk (last chunk of a segment may be shorter)
    pub chunk_len: u16,

    /// Destination address advance per chunk, independent of chunk length
    pub addr_stride: u32,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_len: defaults::CHUNK_LEN,
            addr_stride: defaults::ADDR_STRIDE,
        }
    }
}

/// Cycle schedule used by the timed emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingConfig {
    /// Cycle stamped on the first transaction
    #[serde(default = "TimingConfig::default_start_cycle")]
    pub start_cycle: u64,

    /// Cycles after each command header
    #[serde(default = "TimingConfig::default_txn_interval")]
    pub txn_interval: u64,

    /// Cycles after each 4-byte data group
    #[serde(default = "TimingConfig::default_interbyte_interval")]
    pub interbyte_interval: u64,

    /// Cycles after each chunk's synchronization line (flash page write time)
    #[serde(default = "TimingConfig::default_interwrite_interval")]
    pub interwrite_interval: u64,
}

impl TimingConfig {
    fn default_start_cycle() -> u64 {
        defaults::START_CYCLE
    }

    fn default_txn_interval() -> u64 {
        defaults::TXN_INTERVAL
    }

    fn default_interbyte_interval() -> u64 {
        defaults::INTERBYTE_INTERVAL
    }

    fn default_interwrite_interval() -> u64 {
        defaults::INTERWRITE_INTERVAL
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_cycle: defaults::START_CYCLE,
            txn_interval: defaults::TXN_INTERVAL,
            interbyte_interval: defaults::INTERBYTE_INTERVAL,
            interwrite_interval: defaults::INTERWRITE_INTERVAL,
        }
    }
}
