//! SPI stimulus generation.
//!
//! This module turns a [`HexImage`] into bench stimulus. It provides:
//! 1. **Lines:** The 4-byte transaction encoding and its text form.
//! 2. **Chunking:** Page-sized slices of each segment with an independent address stride.
//! 3. **Emitters:** Sequenced (write + read-back) and timed (cycle stamped) generators.
//! 4. **Reader:** Parsing and ordering checks for timed stimulus files.

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::common::error::Result;
use crate::config::{Config, Mode};
use crate::ihex::{HexImage, Segment};
use crate::stats::ConversionStats;

/// Segment chunking.
pub mod chunk;
/// Transaction line encoding and parsing.
pub mod line;
/// Timed stimulus file reader.
pub mod reader;
/// Untimed write/read-back emitter.
pub mod sequenced;
/// Cycle-stamped write emitter.
pub mod timed;

pub use chunk::{Chunk, chunks};
pub use line::TxnLine;
pub use reader::{ScheduledTxn, parse_stimulus, read_stimulus};
pub use sequenced::SequencedEmitter;
pub use timed::{CycleClock, TimedEmitter};

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `# ...` annotation; ignored by the bench.
    Comment(String),
    /// `Start: <start> Stop: <stop>` line (decimal) opening a sequenced segment.
    Banner(Segment),
    /// SPI transaction.
    Txn(TxnLine),
}

impl Entry {
    /// The transaction, if this entry is one.
    pub const fn txn(&self) -> Option<&TxnLine> {
        match self {
            Self::Txn(line) => Some(line),
            Self::Comment(_) | Self::Banner(_) => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "# {text}"),
            Self::Banner(segment) => {
                write!(f, "Start: {} Stop: {}", segment.start, segment.stop)
            }
            Self::Txn(line) => fmt::Display::fmt(line, f),
        }
    }
}

/// A stimulus generator driven one segment at a time.
pub trait Emitter {
    /// Appends the stimulus for `segment`, including its opening banner, to `out`.
    fn emit_segment(&mut self, image: &HexImage, segment: Segment, out: &mut Vec<Entry>);

    /// Consumes the emitter and returns what it produced.
    fn finish(self: Box<Self>) -> ConversionStats;
}

/// Complete conversion output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stimulus {
    /// Lines in output order.
    pub entries: Vec<Entry>,
    /// Counters gathered while emitting.
    pub stats: ConversionStats,
}

impl Stimulus {
    /// Iterates over transaction lines, skipping comments and banners.
    pub fn txns(&self) -> impl Iterator<Item = &TxnLine> {
        self.entries.iter().filter_map(Entry::txn)
    }

    /// Writes one entry per line.
    ///
    /// # Errors
    ///
    /// [`Error::Write`](crate::Error::Write) if the writer fails.
    pub fn render(&self, w: &mut impl Write) -> Result<()> {
        for entry in &self.entries {
            writeln!(w, "{entry}")?;
        }
        w.flush()?;
        Ok(())
    }
}

/// Builds the emitter selected by `config.mode`.
pub fn emitter_for(config: &Config) -> Box<dyn Emitter> {
    match config.mode {
        Mode::Sequenced => Box::new(SequencedEmitter::new(config.chunk)),
        Mode::Timed => Box::new(TimedEmitter::new(config.chunk, config.timing)),
    }
}

/// Converts every segment of `image`, in address order.
pub fn convert(image: &HexImage, config: &Config) -> Stimulus {
    let mut emitter = emitter_for(config);
    let mut entries = Vec::new();

    for segment in image.segments() {
        debug!(
            start = segment.start,
            stop = segment.stop,
            len = segment.len(),
            "converting segment"
        );
        emitter.emit_segment(image, segment, &mut entries);
    }

    let stats = emitter.finish();
    stats.log();
    Stimulus { entries, stats }
}
