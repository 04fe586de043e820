//! Bootloader protocol and stimulus constants.
//!
//! Opcodes match the command bytes the SPI bootloader switches on; geometry values
//! are fixed by the bootloader protocol.

/// Set-address command (`'U'`). Payload: 16-bit address, little endian.
pub const OP_SET_ADDRESS: u8 = b'U';

/// Write-memory command (`'d'`). Payload: 16-bit length, high byte first.
pub const OP_WRITE: u8 = b'd';

/// Read-memory command (`'t'`). Payload: 16-bit length, high byte first.
pub const OP_READ: u8 = b't';

/// Number of bytes clocked per SPI transaction line.
pub const GROUP_LEN: usize = 4;

/// Source bytes consumed per write chunk.
pub const CHUNK_LEN: u16 = 128;

/// Largest chunk the bootloader page buffer accepts.
pub const MAX_CHUNK_LEN: u16 = 256;

/// Destination address advance per chunk.
pub const ADDR_STRIDE: u32 = 64;

/// Value returned for addresses not present in a hex image.
pub const PADDING_BYTE: u8 = 0xFF;

/// Default firmware image read when no input is given.
pub const DEFAULT_INPUT: &str = "Blink.ino.hex";

/// Literal marker appended to synchronization lines in timed output.
pub const REPEAT_MARKER: &str = "REPEAT";
