//! Intel HEX loading.
//!
//! Record decoding and checksum validation come from the `ihex` crate; this module
//! assembles the decoded records into a sparse image and exposes the contiguous
//! segments the emitters walk over.

/// Sparse image, segments, and start address.
pub mod image;

pub use image::{HexImage, Segment, StartAddress};
