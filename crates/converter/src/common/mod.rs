//! Common utilities and types used throughout the converter.
//!
//! This module provides the building blocks shared by the loader and the emitters:
//! 1. **Constants:** Bootloader command opcodes, chunk geometry, and padding values.
//! 2. **Error Handling:** The crate-wide error enum and record-level error kinds.

/// Bootloader protocol and chunking constants.
pub mod constants;

/// Error types for loading, parsing, and writing stimulus.
pub mod error;

pub use error::{Error, Result};
