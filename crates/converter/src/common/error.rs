//! Error definitions.
//!
//! This module defines every failure the converter reports. It provides:
//! 1. **Record Errors:** Decoder faults in a single Intel HEX record, tagged with its line.
//! 2. **Image Errors:** I/O failures and overlapping data when assembling an image.
//! 3. **Stimulus Errors:** Malformed or out-of-order lines in a stimulus file.
//!
//! Nothing is recovered locally; errors propagate to the binary, which reports them and
//! exits non-zero.

use std::io;
use std::path::PathBuf;

use ::ihex::ReaderError;
use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be read.
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A hex record failed to decode.
    #[error("line {line}: {kind}")]
    Record {
        /// 1-based line number in the hex file.
        line: usize,
        /// What the decoder rejected.
        kind: ReaderError,
    },

    /// Two records wrote the same absolute address.
    #[error("address {address:#x} written more than once")]
    Overlap {
        /// Absolute address written twice.
        address: u32,
    },

    /// A stimulus line could not be parsed.
    #[error("stimulus line {line}: {reason}")]
    Stimulus {
        /// 1-based line number in the stimulus file.
        line: usize,
        /// Description of the fault.
        reason: String,
    },

    /// A scheduled transaction starts before the previous one.
    #[error("stimulus line {line}: cycle {cycle} is backwards in time (previous {previous})")]
    TimeTravel {
        /// 1-based line number in the stimulus file.
        line: usize,
        /// Cycle requested by this line.
        cycle: u64,
        /// Cycle of the preceding transaction.
        previous: u64,
    },

    /// Configuration failed to parse or validate.
    #[error("invalid config: {0}")]
    Config(String),

    /// Writing rendered stimulus failed.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for errors caused by the hex image contents rather than the environment.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::Record { .. } | Self::Overlap { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
