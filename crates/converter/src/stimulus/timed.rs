//! Timed stimulus: writes stamped with absolute simulation cycles.
//!
//! A single [`CycleClock`] runs across the whole output, so timestamps never decrease,
//! even across segment boundaries.

use tracing::trace;

use super::chunk::chunks;
use super::line::{TxnLine, groups};
use super::{Emitter, Entry};
use crate::config::{ChunkConfig, TimingConfig};
use crate::ihex::{HexImage, Segment};
use crate::stats::ConversionStats;

/// Monotonic simulation cycle counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleClock {
    now: u64,
}

impl CycleClock {
    /// Starts the clock at `start`.
    pub const fn new(start: u64) -> Self {
        Self { now: start }
    }

    /// Current cycle.
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Returns the current cycle, then advances by `interval`.
    pub fn stamp(&mut self, interval: u64) -> u64 {
        let at = self.now;
        self.now = self.now.saturating_add(interval);
        at
    }
}

/// Emitter for cycle-stamped write transactions.
#[derive(Debug, Clone)]
pub struct TimedEmitter {
    geometry: ChunkConfig,
    timing: TimingConfig,
    clock: CycleClock,
    stats: ConversionStats,
}

impl TimedEmitter {
    /// Creates an emitter whose clock starts at `timing.start_cycle`.
    pub fn new(geometry: ChunkConfig, timing: TimingConfig) -> Self {
        Self {
            geometry,
            timing,
            clock: CycleClock::new(timing.start_cycle),
            stats: ConversionStats::default(),
        }
    }
}

impl Emitter for TimedEmitter {
    fn emit_segment(&mut self, image: &HexImage, segment: Segment, out: &mut Vec<Entry>) {
        let TimingConfig {
            txn_interval,
            interbyte_interval,
            interwrite_interval,
            ..
        } = self.timing;
        self.stats.segments += 1;
        out.push(Entry::Comment(format!(
            "segment start={:#06x} stop={:#06x}",
            segment.start, segment.stop
        )));

        for chunk in chunks(segment, self.geometry) {
            trace!(cycle = self.clock.now(), addr = chunk.addr, len = chunk.len, "timed chunk");
            let at = self.clock.stamp(txn_interval);
            out.push(Entry::Txn(TxnLine::set_address(chunk.addr).at(at)));
            let at = self.clock.stamp(txn_interval);
            out.push(Entry::Txn(TxnLine::write_header(chunk.len).at(at)));

            let data = image.slice(chunk.src, chunk.len as usize);
            for group in groups(&data) {
                let at = self.clock.stamp(interbyte_interval);
                out.push(Entry::Txn(TxnLine::new(group).at(at)));
            }

            // Poll until the page write finishes, then leave the device alone for the
            // programming time.
            let at = self.clock.stamp(interwrite_interval);
            out.push(Entry::Txn(TxnLine::zero().at(at).repeating()));

            self.stats.chunks += 1;
            self.stats.payload_bytes += u64::from(chunk.len);
            self.stats.padding_bytes += chunk.padding() as u64;
            self.stats.write_lines += 2 + chunk.groups() as u64;
            self.stats.sync_lines += 1;
        }
    }

    fn finish(self: Box<Self>) -> ConversionStats {
        ConversionStats {
            final_cycle: Some(self.clock.now()),
            ..self.stats
        }
    }
}
