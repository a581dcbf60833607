//! Column Module
//!
//! In-memory representation of decoded columns, type inference, and the
//! per-type encode/decode codecs.
//!
//! ## Responsibilities
//! - Infer a column's storage type from its text values
//! - Pack typed values into raw little-endian byte buffers and compress them
//! - Decompress and unpack byte buffers back into typed values
//!
//! Type dispatch is a tagged union with one variant per storage type, so an
//! unrecognized type code on the read path is rejected before any decoding
//! starts.

mod codec;
mod infer;

pub use codec::{decode_column, encode_column, CompressedBlocks};
pub use infer::infer_column_type;

use crate::schema::ColumnType;

// =============================================================================
// Decoded Values
// =============================================================================

/// All decoded values of one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int32(Vec<i32>),
    Float64(Vec<f64>),
    Utf8(Vec<String>),
}

impl ColumnData {
    /// Number of values in the column
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int32(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
            ColumnData::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage type of this column
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Int32(_) => ColumnType::Int32,
            ColumnData::Float64(_) => ColumnType::Float64,
            ColumnData::Utf8(_) => ColumnType::Utf8,
        }
    }

    /// Value at row `i`; panics if out of range (callers index within
    /// `0..len()`, which the reader has already checked against `total_rows`).
    pub fn value(&self, i: usize) -> Value {
        match self {
            ColumnData::Int32(v) => Value::Int32(v[i]),
            ColumnData::Float64(v) => Value::Float64(v[i]),
            ColumnData::Utf8(v) => Value::Utf8(v[i].clone()),
        }
    }
}

/// One decoded cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int32(i32),
    Float64(f64),
    Utf8(String),
}

impl std::fmt::Display for Value {
    /// Text rendering used when converting back to tabular text. Numeric
    /// formatting is canonical, not literal-preserving: `"88.0"` round-trips
    /// as `88`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Utf8(v) => write!(f, "{}", v),
        }
    }
}
