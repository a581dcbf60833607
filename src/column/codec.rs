//! Per-type column codecs
//!
//! Encode: parse text cells as the column's committed type, pack them into a
//! raw little-endian buffer, and compress the buffer into a block. Decode is
//! symmetric: decompress, then unpack exactly `count` values.
//!
//! Utf8 columns produce two blocks: a `(count + 1)`-entry u32 offset table
//! and the concatenated string bytes. Both are compressed independently.

use crate::compress;
use crate::error::{Result, ScbfError};
use crate::format::{Block, EncodedColumn};
use crate::schema::ColumnType;

use super::ColumnData;

// =============================================================================
// Encoding
// =============================================================================

/// Encode all values of one column into compressed block(s).
///
/// `values` are the column's text cells in row order; `name` is used only in
/// error messages.
pub fn encode_column(
    name: &str,
    column_type: ColumnType,
    values: &[&str],
    level: u32,
) -> Result<EncodedColumn> {
    match column_type {
        ColumnType::Int32 => {
            let mut buf = Vec::with_capacity(values.len() * 4);
            for (row, value) in values.iter().enumerate() {
                let parsed: i32 = value.parse().map_err(|_| parse_error(name, row, value, column_type))?;
                buf.extend_from_slice(&parsed.to_le_bytes());
            }
            Ok(EncodedColumn::Int32 {
                data: make_block(buf, level)?,
            })
        }
        ColumnType::Float64 => {
            let mut buf = Vec::with_capacity(values.len() * 8);
            for (row, value) in values.iter().enumerate() {
                let parsed: f64 = value.parse().map_err(|_| parse_error(name, row, value, column_type))?;
                buf.extend_from_slice(&parsed.to_le_bytes());
            }
            Ok(EncodedColumn::Float64 {
                data: make_block(buf, level)?,
            })
        }
        ColumnType::Utf8 => {
            let mut strings = Vec::new();
            let mut offsets = Vec::with_capacity((values.len() + 1) * 4);
            offsets.extend_from_slice(&0u32.to_le_bytes());
            for value in values {
                strings.extend_from_slice(value.as_bytes());
                let end = u32::try_from(strings.len()).map_err(|_| {
                    ScbfError::Encoding(format!(
                        "column '{}': string data exceeds the u32 offset range",
                        name
                    ))
                })?;
                offsets.extend_from_slice(&end.to_le_bytes());
            }
            Ok(EncodedColumn::Utf8 {
                offsets: make_block(offsets, level)?,
                strings: make_block(strings, level)?,
            })
        }
    }
}

fn make_block(raw: Vec<u8>, level: u32) -> Result<Block> {
    let compressed = compress::compress(&raw, level)?;
    Ok(Block {
        uncompressed_size: raw.len() as u64,
        data: compressed,
    })
}

fn parse_error(name: &str, row: usize, value: &str, column_type: ColumnType) -> ScbfError {
    ScbfError::Encoding(format!(
        "column '{}' row {}: cannot parse {:?} as {}",
        name, row, value, column_type
    ))
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a fixed-width or variable-width column from its compressed block(s).
pub fn decode_column(
    column_type: ColumnType,
    count: u64,
    blocks: CompressedBlocks<'_>,
) -> Result<ColumnData> {
    match (column_type, blocks) {
        (ColumnType::Int32, CompressedBlocks::Single(data)) => {
            Ok(ColumnData::Int32(decode_int32(data, count)?))
        }
        (ColumnType::Float64, CompressedBlocks::Single(data)) => {
            Ok(ColumnData::Float64(decode_float64(data, count)?))
        }
        (ColumnType::Utf8, CompressedBlocks::Dual { offsets, strings }) => {
            Ok(ColumnData::Utf8(decode_utf8(offsets, strings, count)?))
        }
        // ColumnMeta ties each type to its block shape, so this is unreachable
        // through the reader; reject it rather than panic.
        _ => Err(ScbfError::Format(
            "column type does not match its block shape".to_string(),
        )),
    }
}

/// Compressed input block(s) for one column
pub enum CompressedBlocks<'a> {
    /// Fixed-width types: one data block
    Single(&'a [u8]),
    /// Utf8: offset table block + string bytes block
    Dual { offsets: &'a [u8], strings: &'a [u8] },
}

fn decode_int32(compressed: &[u8], count: u64) -> Result<Vec<i32>> {
    let raw = compress::decompress(compressed)?;
    expect_len(&raw, count, 4, "int32")?;
    Ok(raw
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes(c.try_into().unwrap()))
        .collect())
}

fn decode_float64(compressed: &[u8], count: u64) -> Result<Vec<f64>> {
    let raw = compress::decompress(compressed)?;
    expect_len(&raw, count, 8, "float64")?;
    Ok(raw
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes(c.try_into().unwrap()))
        .collect())
}

fn decode_utf8(offsets_compressed: &[u8], strings_compressed: &[u8], count: u64) -> Result<Vec<String>> {
    let offsets_raw = compress::decompress(offsets_compressed)?;
    let strings_raw = compress::decompress(strings_compressed)?;

    expect_len(&offsets_raw, count.saturating_add(1), 4, "utf8 offset")?;
    let offsets: Vec<u32> = offsets_raw
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect();

    // Offset-table invariant: starts at 0, ends at the blob length,
    // non-decreasing throughout.
    if offsets.first() != Some(&0) {
        return Err(ScbfError::Format("utf8 offset table does not start at 0".to_string()));
    }
    if offsets.last().copied() != Some(strings_raw.len() as u32) {
        return Err(ScbfError::Format(format!(
            "utf8 offset table ends at {} but string blob is {} bytes",
            offsets.last().copied().unwrap_or(0),
            strings_raw.len()
        )));
    }

    let mut values = Vec::with_capacity(count as usize);
    for pair in offsets.windows(2) {
        let (start, end) = (pair[0] as usize, pair[1] as usize);
        if end < start || end > strings_raw.len() {
            return Err(ScbfError::Format("utf8 offset table is not non-decreasing".to_string()));
        }
        let bytes = &strings_raw[start..end];
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ScbfError::Format(format!("invalid UTF-8 in string block: {}", e)))?;
        values.push(text.to_string());
    }
    Ok(values)
}

fn expect_len(raw: &[u8], count: u64, width: u64, what: &str) -> Result<()> {
    let expected = count.checked_mul(width).ok_or_else(|| {
        ScbfError::Format(format!("{} count {} overflows the block size", what, count))
    })?;
    if raw.len() as u64 != expected {
        return Err(ScbfError::Format(format!(
            "{} block is {} bytes, expected {} ({} values)",
            what,
            raw.len(),
            expected,
            count
        )));
    }
    Ok(())
}
