//! Intel HEX to SPI stimulus conversion library.
//!
//! This crate turns a firmware image into the line-oriented transaction stimulus consumed by
//! the SPI bootloader test bench. It provides:
//! 1. **Loader:** A sparse, segment-aware image built from `ihex`-decoded records.
//! 2. **Chunking:** Splitting segments into page-sized write chunks with a separate destination stride.
//! 3. **Emitters:** Sequenced (chip-select flagged) and timed (cycle stamped) stimulus generation.
//! 4. **Reader:** Parsing and validating timed stimulus files as the bench schedules them.
//! 5. **Support:** Configuration, error types, and conversion statistics.

/// Common types and constants (opcodes, strides, errors).
pub mod common;
/// Converter configuration (defaults, modes, chunk geometry, timing).
pub mod config;
/// Intel HEX image loading (records decoded by the `ihex` crate).
pub mod ihex;
/// Conversion statistics collection and reporting.
pub mod stats;
/// Stimulus lines, chunking, emitters, and the stimulus reader.
pub mod stimulus;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Crate-wide error and result types.
pub use crate::common::error::{Error, Result};
/// Loaded firmware image.
pub use crate::ihex::HexImage;
/// Top-level conversion entry point.
pub use crate::stimulus::convert;
