//! Transaction line encoding.
//!
//! Every stimulus line describes one 4-byte SPI exchange:
//!
//! ```text
//! [CYCLE] B0 B1 B2 B3 CS [REPEAT]
//! ```
//!
//! `CYCLE` is present only in timed output. `CS` is `1` when chip select is raised after
//! the exchange. `REPEAT` marks a synchronization poll the bench re-issues until the
//! bootloader acknowledges.

use std::fmt;
use std::str::FromStr;

use crate::common::constants::{GROUP_LEN, OP_READ, OP_SET_ADDRESS, OP_WRITE, REPEAT_MARKER};

/// One 4-byte SPI transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxnLine {
    /// Absolute simulation cycle, timed output only.
    pub cycle: Option<u64>,
    /// Bytes shifted out to the device.
    pub bytes: [u8; GROUP_LEN],
    /// Raise chip select once the exchange completes.
    pub raise_cs: bool,
    /// Re-issue until acknowledged.
    pub repeat: bool,
}

impl TxnLine {
    /// Untimed transaction that raises chip select afterwards.
    pub const fn new(bytes: [u8; GROUP_LEN]) -> Self {
        Self {
            cycle: None,
            bytes,
            raise_cs: true,
            repeat: false,
        }
    }

    /// All-zero transaction, used for read-back placeholders and polls.
    pub const fn zero() -> Self {
        Self::new([0; GROUP_LEN])
    }

    /// Stamps the line with a cycle.
    #[must_use]
    pub const fn at(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    /// Marks the line as a repeating synchronization poll.
    #[must_use]
    pub const fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// `'U'` header: 16-bit destination address, low byte first.
    pub const fn set_address(addr: u32) -> Self {
        Self::new([OP_SET_ADDRESS, addr as u8, (addr >> 8) as u8, 0])
    }

    /// `'d'` header announcing `len` data bytes.
    pub const fn write_header(len: u16) -> Self {
        Self::command(OP_WRITE, len)
    }

    /// `'t'` header requesting `len` bytes back.
    pub const fn read_header(len: u16) -> Self {
        Self::command(OP_READ, len)
    }

    const fn command(op: u8, len: u16) -> Self {
        // The bootloader assembles the length from bytes 1 and 2, high byte first.
        let [hi, lo] = len.to_be_bytes();
        Self::new([op, hi, lo, 0])
    }
}

/// Splits `data` into 4-byte groups, zero-padding the last one.
pub fn groups(data: &[u8]) -> impl Iterator<Item = [u8; GROUP_LEN]> + '_ {
    data.chunks(GROUP_LEN).map(|chunk| {
        let mut group = [0u8; GROUP_LEN];
        group[..chunk.len()].copy_from_slice(chunk);
        group
    })
}

/// Number of 4-byte groups needed to carry `len` bytes.
pub const fn group_count(len: usize) -> usize {
    len.div_ceil(GROUP_LEN)
}

impl fmt::Display for TxnLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cycle) = self.cycle {
            write!(f, "{cycle} ")?;
        }
        let [b0, b1, b2, b3] = self.bytes;
        write!(
            f,
            "{b0:02x} {b1:02x} {b2:02x} {b3:02x} {}",
            u8::from(self.raise_cs)
        )?;
        if self.repeat {
            write!(f, " {REPEAT_MARKER}")?;
        }
        Ok(())
    }
}

impl FromStr for TxnLine {
    type Err = String;

    /// Parses either the sequenced (`B0 B1 B2 B3 CS`) or timed (`CYCLE B0 B1 B2 B3 CS`)
    /// layout, each optionally followed by `REPEAT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens: Vec<&str> = s.split_whitespace().collect();

        let repeat = tokens.last() == Some(&REPEAT_MARKER);
        if repeat {
            let _ = tokens.pop();
        }

        let (cycle, rest) = match tokens.len() {
            5 => (None, &tokens[..]),
            6 => {
                let tok = tokens[0];
                if !tok.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(format!("bad cycle '{tok}'"));
                }
                let cycle = tok
                    .parse::<u64>()
                    .map_err(|_| format!("bad cycle '{tok}'"))?;
                (Some(cycle), &tokens[1..])
            }
            n => return Err(format!("expected 5 or 6 fields, found {n}")),
        };

        let mut bytes = [0u8; GROUP_LEN];
        for (slot, tok) in bytes.iter_mut().zip(&rest[..GROUP_LEN]) {
            // from_str_radix alone would accept a leading '+'.
            if tok.is_empty() || tok.len() > 2 || !tok.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(format!("bad byte '{tok}'"));
            }
            *slot = u8::from_str_radix(tok, 16).map_err(|_| format!("bad byte '{tok}'"))?;
        }

        let raise_cs = match rest[GROUP_LEN] {
            "0" => false,
            "1" => true,
            other => return Err(format!("bad chip-select flag '{other}'")),
        };

        Ok(Self {
            cycle,
            bytes,
            raise_cs,
            repeat,
        })
    }
}
