//! Shared fixtures for building hex text, temporary files, and images.

use ihex::Record;
use ihex2spi_core::HexImage;
use std::io::Write;
use tempfile::NamedTempFile;

/// Formats one record, checksum included.
pub fn record(record: &Record) -> String {
    record.to_record_string().unwrap()
}

/// Formats a data record placing `data` at `offset`.
pub fn data(offset: u16, data: &[u8]) -> String {
    record(&Record::Data {
        offset,
        value: data.to_vec(),
    })
}

/// The canonical end-of-file record.
pub const EOF: &str = ":00000001FF";

/// Data records (16 bytes each) placing `data` at a 16-bit `offset`, followed by EOF.
pub fn hex_text(offset: u16, data: &[u8]) -> String {
    let mut lines: Vec<String> = data
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| self::data(offset + (i as u16) * 16, chunk))
        .collect();
    lines.push(EOF.to_string());
    lines.join("\n") + "\n"
}

/// Writes `contents` to a temporary file that lives as long as the handle.
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Builds an image from `(address, bytes)` pairs.
pub fn image_with(parts: &[(u32, Vec<u8>)]) -> HexImage {
    let mut image = HexImage::new();
    for (addr, bytes) in parts {
        image.insert(*addr, bytes).unwrap();
    }
    image
}

/// `len` bytes counting up from zero (wrapping).
pub fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}
