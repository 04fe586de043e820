//! Segment chunking.
//!
//! Source bytes are consumed `chunk_len` at a time while the destination address the
//! bootloader is told advances by `addr_stride` per chunk. The two strides are independent.

use crate::config::ChunkConfig;
use crate::ihex::Segment;

use super::line::group_count;

/// One write (or read-back) unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Absolute source address in the image.
    pub src: u32,
    /// Destination address sent in the `'U'` header.
    pub addr: u32,
    /// Payload length in bytes.
    pub len: u16,
}

impl Chunk {
    /// 4-byte groups needed for the payload.
    pub const fn groups(&self) -> usize {
        group_count(self.len as usize)
    }

    /// Whole 4-byte words in the payload; a trailing partial word is not counted.
    pub const fn whole_words(&self) -> usize {
        self.len as usize / crate::common::constants::GROUP_LEN
    }

    /// Zero bytes appended to fill the last group.
    pub const fn padding(&self) -> usize {
        self.groups() * crate::common::constants::GROUP_LEN - self.len as usize
    }
}

/// Iterator over the chunks of one segment.
#[derive(Debug, Clone)]
pub struct Chunks {
    next_src: u32,
    stop: u32,
    addr: u32,
    chunk_len: u32,
    addr_stride: u32,
}

impl Iterator for Chunks {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        if self.next_src >= self.stop {
            return None;
        }
        let len = self.chunk_len.min(self.stop - self.next_src);
        let chunk = Chunk {
            src: self.next_src,
            addr: self.addr,
            len: len as u16,
        };
        self.next_src += len;
        self.addr = self.addr.wrapping_add(self.addr_stride);
        Some(chunk)
    }
}

/// Splits `segment` according to `geometry`, starting the destination at the segment start.
pub fn chunks(segment: Segment, geometry: ChunkConfig) -> Chunks {
    Chunks {
        next_src: segment.start,
        stop: segment.stop,
        addr: segment.start,
        chunk_len: u32::from(geometry.chunk_len.max(1)),
        addr_stride: geometry.addr_stride,
    }
}
