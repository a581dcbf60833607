//! Schema types and the schema blob codec
//!
//! The schema is the ordered column-name/type list. It is stored in the file
//! header as a length-prefixed JSON blob:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────────────────┐
//! │ BlobLen: u32 │ UTF-8 JSON: {"columns":[{name, type}..]} │
//! └──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The blob is descriptive metadata for external consumers; type dispatch on
//! the read path uses the type codes in the metadata table, not this blob.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScbfError};

/// Maximum accepted schema blob size (16 MB)
pub const MAX_SCHEMA_LEN: u32 = 16 * 1024 * 1024;

// =============================================================================
// Column Types
// =============================================================================

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 4-byte little-endian signed integer
    Int32,
    /// 8-byte little-endian IEEE-754 double
    Float64,
    /// Variable-width UTF-8 text with an offset table
    Utf8,
}

impl ColumnType {
    /// On-disk type code used in the metadata table
    pub fn code(self) -> u8 {
        match self {
            ColumnType::Int32 => 1,
            ColumnType::Float64 => 2,
            ColumnType::Utf8 => 3,
        }
    }

    /// Parse an on-disk type code; unknown codes are a format error.
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ColumnType::Int32),
            2 => Ok(ColumnType::Float64),
            3 => Ok(ColumnType::Utf8),
            _ => Err(ScbfError::Format(format!("unknown type code {}", code))),
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Int32 => write!(f, "int32"),
            ColumnType::Float64 => write!(f, "float64"),
            ColumnType::Utf8 => write!(f, "utf8"),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// One column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

/// Ordered column list. Column order is authoritative and matches the order
/// in which columns are written to and read from the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Encode as the length-prefixed JSON blob stored in the file header.
    pub fn encode_blob(&self) -> Result<Vec<u8>> {
        let json = serde_json::to_vec(self)?;
        let mut blob = Vec::with_capacity(4 + json.len());
        blob.extend_from_slice(&(json.len() as u32).to_le_bytes());
        blob.extend_from_slice(&json);
        Ok(blob)
    }

    /// Decode a length-prefixed JSON blob from a stream.
    pub fn decode_blob<R: Read>(reader: &mut R) -> Result<Self> {
        let mut len_bytes = [0u8; 4];
        reader.read_exact(&mut len_bytes)?;
        let blob_len = u32::from_le_bytes(len_bytes);

        if blob_len > MAX_SCHEMA_LEN {
            return Err(ScbfError::Format(format!(
                "schema blob too large: {} bytes (max {})",
                blob_len, MAX_SCHEMA_LEN
            )));
        }

        let mut json = vec![0u8; blob_len as usize];
        reader.read_exact(&mut json)?;

        Ok(serde_json::from_slice(&json)?)
    }
}
