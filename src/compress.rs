//! Block compression
//!
//! Every data block in an SCBF file is compressed with zlib (deflate) as a
//! single in-memory unit; there is no streaming interface. The round-trip
//! guarantee `decompress(compress(b)) == b` holds for all inputs, including
//! the empty block of a zero-row column.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::Result;

/// Compress one block at the given zlib level (0..=9).
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress one block.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}
