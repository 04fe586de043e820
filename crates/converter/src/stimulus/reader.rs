//! Timed stimulus reader.
//!
//! Parses stimulus files the way the bootloader bench schedules them: one 4-byte
//! transaction per line, each starting at an absolute cycle that must not precede the
//! previous transaction.
//!
//! ```text
//! # SPI Transaction input file
//! 2000000 30 00 00 00 0    # hello, anyone there?
//! 2002000 00 00 00 00 1
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use super::line::TxnLine;
use crate::common::constants::GROUP_LEN;
use crate::common::error::{Error, Result};

/// A transaction with its scheduled start cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTxn {
    /// 1-based source line.
    pub line: usize,
    /// Cycle the transaction starts at.
    pub cycle: u64,
    /// Bytes shifted out.
    pub bytes: [u8; GROUP_LEN],
    /// Raise chip select afterwards.
    pub raise_cs: bool,
    /// Poll until acknowledged.
    pub repeat: bool,
}

/// Reads and parses a stimulus file.
///
/// # Errors
///
/// [`Error::Io`] if the file cannot be read, otherwise whatever [`parse_stimulus`]
/// reports.
pub fn read_stimulus(path: impl AsRef<Path>) -> Result<Vec<ScheduledTxn>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let txns = parse_stimulus(&text)?;
    debug!(path = %path.display(), count = txns.len(), "stimulus parsed");
    Ok(txns)
}

/// Parses stimulus text.
///
/// Blank lines and `#` comments (whole-line or trailing) are skipped.
///
/// # Errors
///
/// [`Error::Stimulus`] for a malformed or untimed line, [`Error::TimeTravel`] when a
/// cycle is lower than its predecessor's.
pub fn parse_stimulus(text: &str) -> Result<Vec<ScheduledTxn>> {
    let mut txns: Vec<ScheduledTxn> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let parsed: TxnLine = content
            .parse()
            .map_err(|reason| Error::Stimulus { line, reason })?;
        let Some(cycle) = parsed.cycle else {
            return Err(Error::Stimulus {
                line,
                reason: "missing cycle".to_string(),
            });
        };

        if let Some(prev) = txns.last() {
            if cycle < prev.cycle {
                return Err(Error::TimeTravel {
                    line,
                    cycle,
                    previous: prev.cycle,
                });
            }
        }

        txns.push(ScheduledTxn {
            line,
            cycle,
            bytes: parsed.bytes,
            raise_cs: parsed.raise_cs,
            repeat: parsed.repeat,
        });
    }

    Ok(txns)
}
