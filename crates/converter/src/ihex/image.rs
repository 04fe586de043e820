//! Sparse firmware image assembled from Intel HEX records.
//!
//! The image keeps every written byte keyed by its absolute address, so gaps between
//! records survive and can be reported as separate segments.

use std::collections::BTreeMap;
use std::fs;
use std::ops::Range;
use std::path::Path;

use tracing::{debug, info};

use ::ihex::{Reader, Record};
use crate::common::constants::PADDING_BYTE;
use crate::common::error::{Error, Result};

/// A contiguous address range `[start, stop)` present in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Segment {
    /// First address in the segment.
    pub start: u32,
    /// One past the last address in the segment.
    pub stop: u32,
}

impl Segment {
    /// Creates a segment covering `[start, stop)`.
    pub const fn new(start: u32, stop: u32) -> Self {
        Self { start, stop }
    }

    /// Number of bytes in the segment.
    pub const fn len(&self) -> u32 {
        self.stop - self.start
    }

    /// True if the segment covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.stop <= self.start
    }

    /// The segment as a `Range`.
    pub const fn range(&self) -> Range<u32> {
        self.start..self.stop
    }
}

/// Execution start address carried by record types 03 and 05.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartAddress {
    /// `CS:IP` pair.
    Segment {
        /// Code segment.
        cs: u16,
        /// Instruction pointer.
        ip: u16,
    },
    /// Flat 32-bit entry point.
    Linear(u32),
}

/// Byte-addressable view of a loaded hex file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexImage {
    bytes: BTreeMap<u32, u8>,
    start: Option<StartAddress>,
}

impl HexImage {
    /// Creates an empty image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and decodes an Intel HEX file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Record`] or
    /// [`Error::Overlap`] if its contents are malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let image = Self::parse(&text)?;
        info!(
            path = %path.display(),
            bytes = image.len(),
            segments = image.segments().len(),
            "loaded hex image"
        );
        Ok(image)
    }

    /// Decodes Intel HEX text.
    ///
    /// Blank lines and surrounding whitespace are skipped. Anything after the end-of-file
    /// record is ignored, and a missing end-of-file record is accepted.
    ///
    /// # Errors
    ///
    /// [`Error::Record`] carrying the 1-based line number and the decoder's fault for
    /// the first record that fails to decode, or [`Error::Overlap`] if two data records
    /// cover the same address.
    pub fn parse(text: &str) -> Result<Self> {
        let (line_numbers, records): (Vec<usize>, Vec<&str>) = text
            .lines()
            .enumerate()
            .map(|(idx, raw)| (idx + 1, raw.trim()))
            .filter(|(_, line)| !line.is_empty())
            .unzip();
        let normalized = records.join("\n");

        let mut image = Self::new();
        let mut base: u32 = 0;

        // The reader yields exactly one item per non-blank line until it stops.
        for (record, line) in Reader::new(&normalized).zip(line_numbers) {
            match record.map_err(|kind| Error::Record { line, kind })? {
                Record::Data { offset, value } => {
                    image.insert(base.wrapping_add(u32::from(offset)), &value)?;
                }
                Record::EndOfFile => {
                    debug!(line, "end-of-file record");
                    break;
                }
                Record::ExtendedSegmentAddress(value) => base = u32::from(value) << 4,
                Record::ExtendedLinearAddress(value) => base = u32::from(value) << 16,
                Record::StartSegmentAddress { cs, ip } => {
                    image.start = Some(StartAddress::Segment { cs, ip });
                }
                Record::StartLinearAddress(eip) => {
                    image.start = Some(StartAddress::Linear(eip));
                }
            }
        }

        Ok(image)
    }

    /// Places `data` starting at `address`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overlap`] if any target address already holds a byte.
    pub fn insert(&mut self, address: u32, data: &[u8]) -> Result<()> {
        let mut addr = address;
        for &b in data {
            if self.bytes.insert(addr, b).is_some() {
                return Err(Error::Overlap { address: addr });
            }
            addr = addr.wrapping_add(1);
        }
        Ok(())
    }

    /// Maximal contiguous address ranges, in ascending order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut current: Option<Segment> = None;

        for &addr in self.bytes.keys() {
            current = match current {
                Some(seg) if seg.stop == addr => Some(Segment::new(seg.start, addr.saturating_add(1))),
                Some(seg) => {
                    segments.push(seg);
                    Some(Segment::new(addr, addr.saturating_add(1)))
                }
                None => Some(Segment::new(addr, addr.saturating_add(1))),
            };
        }
        segments.extend(current);
        segments
    }

    /// Byte at `address`, or the padding value if nothing was written there.
    pub fn get(&self, address: u32) -> u8 {
        self.bytes.get(&address).copied().unwrap_or(PADDING_BYTE)
    }

    /// Copies `len` bytes starting at `start`, padding unset addresses.
    pub fn slice(&self, start: u32, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| self.get(start.wrapping_add(i as u32)))
            .collect()
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no data records were applied.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Start address from a type 03 or 05 record, if present.
    pub const fn start_address(&self) -> Option<StartAddress> {
        self.start
    }
}
