//! Sequenced stimulus: writes followed by read-backs.
//!
//! Each line carries a trailing chip-select flag and no timestamp; the bench plays the
//! lines back-to-back. For every segment the write section is emitted in full before the
//! read-back section, so a verify pass sees every page after it has been programmed.

use tracing::trace;

use super::chunk::chunks;
use super::line::{TxnLine, groups};
use super::{Emitter, Entry};
use crate::config::ChunkConfig;
use crate::ihex::{HexImage, Segment};
use crate::stats::ConversionStats;

/// Emitter for untimed write and read-back transactions.
#[derive(Debug, Clone)]
pub struct SequencedEmitter {
    geometry: ChunkConfig,
    stats: ConversionStats,
}

impl SequencedEmitter {
    /// Creates an emitter with the given chunk geometry.
    pub fn new(geometry: ChunkConfig) -> Self {
        Self {
            geometry,
            stats: ConversionStats::default(),
        }
    }

    fn emit_writes(&mut self, image: &HexImage, segment: Segment, out: &mut Vec<Entry>) {
        for chunk in chunks(segment, self.geometry) {
            trace!(src = chunk.src, addr = chunk.addr, len = chunk.len, "write chunk");
            out.push(Entry::Txn(TxnLine::set_address(chunk.addr)));
            out.push(Entry::Txn(TxnLine::write_header(chunk.len)));
            let data = image.slice(chunk.src, chunk.len as usize);
            out.extend(groups(&data).map(|g| Entry::Txn(TxnLine::new(g))));

            self.stats.chunks += 1;
            self.stats.payload_bytes += u64::from(chunk.len);
            self.stats.padding_bytes += chunk.padding() as u64;
            self.stats.write_lines += 2 + chunk.groups() as u64;
        }
    }

    /// One zero placeholder per whole word; a trailing partial word gets none.
    fn emit_read_backs(&mut self, segment: Segment, out: &mut Vec<Entry>) {
        for chunk in chunks(segment, self.geometry) {
            out.push(Entry::Txn(TxnLine::set_address(chunk.addr)));
            out.push(Entry::Txn(TxnLine::read_header(chunk.len)));
            out.extend((0..chunk.whole_words()).map(|_| Entry::Txn(TxnLine::zero())));

            self.stats.read_lines += 2 + chunk.whole_words() as u64;
        }
    }
}

impl Emitter for SequencedEmitter {
    fn emit_segment(&mut self, image: &HexImage, segment: Segment, out: &mut Vec<Entry>) {
        self.stats.segments += 1;
        out.push(Entry::Banner(segment));
        self.emit_writes(image, segment, out);
        self.emit_read_backs(segment, out);
    }

    fn finish(self: Box<Self>) -> ConversionStats {
        self.stats
    }
}
