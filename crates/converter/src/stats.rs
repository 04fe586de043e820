//! Conversion statistics collection and reporting.
//!
//! Tracks what a conversion produced:
//! 1. **Image coverage:** Segments and chunks walked, payload and padding bytes.
//! 2. **Output volume:** Write, read-back, and synchronization lines emitted.
//! 3. **Timing:** Final cycle reached by the timed schedule.

use std::io::{self, Write};

use tracing::info;

/// Counters accumulated by an emitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Segments converted.
    pub segments: u64,
    /// Write chunks emitted.
    pub chunks: u64,
    /// Image bytes carried in write chunks.
    pub payload_bytes: u64,
    /// Zero bytes added to complete 4-byte groups.
    pub padding_bytes: u64,
    /// Lines in the write section (headers and data).
    pub write_lines: u64,
    /// Lines in the read-back section (headers and placeholders).
    pub read_lines: u64,
    /// Synchronization polls appended after chunks.
    pub sync_lines: u64,
    /// Cycle counter value after the last line, timed output only.
    pub final_cycle: Option<u64>,
}

impl ConversionStats {
    /// Total transaction lines emitted.
    pub const fn total_lines(&self) -> u64 {
        self.write_lines + self.read_lines + self.sync_lines
    }

    /// Records the counters as a structured `info` event.
    pub fn log(&self) {
        info!(
            segments = self.segments,
            chunks = self.chunks,
            payload_bytes = self.payload_bytes,
            padding_bytes = self.padding_bytes,
            lines = self.total_lines(),
            final_cycle = ?self.final_cycle,
            "conversion complete"
        );
    }

    /// Writes a human-readable summary.
    ///
    /// # Errors
    ///
    /// Propagates any error from the writer.
    pub fn write_summary(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "==========================================================")?;
        writeln!(w, "SPI STIMULUS CONVERSION")?;
        writeln!(w, "==========================================================")?;
        writeln!(w, "segments                 {}", self.segments)?;
        writeln!(w, "chunks                   {}", self.chunks)?;
        writeln!(w, "payload_bytes            {}", self.payload_bytes)?;
        writeln!(w, "padding_bytes            {}", self.padding_bytes)?;
        writeln!(w, "----------------------------------------------------------")?;
        writeln!(w, "lines.write              {}", self.write_lines)?;
        writeln!(w, "lines.read               {}", self.read_lines)?;
        writeln!(w, "lines.sync               {}", self.sync_lines)?;
        writeln!(w, "lines.total              {}", self.total_lines())?;
        if let Some(cycle) = self.final_cycle {
            writeln!(w, "final_cycle              {cycle}")?;
        }
        writeln!(w, "----------------------------------------------------------")
    }
}
