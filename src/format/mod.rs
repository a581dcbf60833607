//! SCBF File Format
//!
//! Compressed, typed columnar binary format. One file holds one table:
//! a header, a schema blob, a per-column metadata table, and the compressed
//! data blocks.
//!
//! ## File Layout (all multi-byte integers little-endian)
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header                                                   │
//! │   Magic: "SCBFv1\0\0" (8)                                │
//! │   SchemaLen: u32 | Schema JSON blob (UTF-8)              │
//! │   NumColumns: u32 | TotalRows: u64 | MetaTableOffset: u64│
//! ├──────────────────────────────────────────────────────────┤
//! │ Metadata Table (at MetaTableOffset, one entry per column)│
//! │   NameLen: u16 | Name | TypeCode: u8 | Count: u64        │
//! │   type 1/2: UncompSize u64 | CompSize u64 | Offset u64   │
//! │   type 3:   two such triples (offset table, string bytes)│
//! ├──────────────────────────────────────────────────────────┤
//! │ Data Blocks (zlib-compressed, in column order)           │
//! │   [int32/float64: one block] [utf8: offsets + strings]   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Block offsets inside the metadata table point at the first compressed
//! byte of each block. They are written as zero placeholders and
//! back-patched once the block's real position is known (see `writer`).

mod reader;
mod writer;

pub use reader::ScbfReader;
pub use writer::ScbfWriter;

use crate::schema::ColumnType;

// =============================================================================
// Shared Constants (used by writer and reader)
// =============================================================================

/// Magic bytes identifying an SCBF file
pub(crate) const MAGIC: &[u8; 8] = b"SCBFv1\x00\x00";

// =============================================================================
// Encoded Blocks (write path)
// =============================================================================

/// One compressed data block ready to be placed in the file
#[derive(Debug, Clone)]
pub struct Block {
    /// Size of the raw packed bytes before compression
    pub uncompressed_size: u64,
    /// Compressed bytes; `data.len()` is the recorded compressed size
    pub data: Vec<u8>,
}

/// A fully encoded column, ready for layout
#[derive(Debug, Clone)]
pub enum EncodedColumn {
    Int32 { data: Block },
    Float64 { data: Block },
    Utf8 { offsets: Block, strings: Block },
}

impl EncodedColumn {
    pub fn column_type(&self) -> ColumnType {
        match self {
            EncodedColumn::Int32 { .. } => ColumnType::Int32,
            EncodedColumn::Float64 { .. } => ColumnType::Float64,
            EncodedColumn::Utf8 { .. } => ColumnType::Utf8,
        }
    }
}

// =============================================================================
// Column Metadata (read path)
// =============================================================================

/// Sizing and placement of one data block, as recorded in the metadata table
#[derive(Debug, Clone, Copy)]
pub struct BlockMeta {
    pub uncompressed_size: u64,
    pub compressed_size: u64,
    /// Absolute file offset of the block's first compressed byte
    pub offset: u64,
}

/// Per-type block layout of a column
#[derive(Debug, Clone, Copy)]
pub enum ColumnBlocks {
    Int32 { data: BlockMeta },
    Float64 { data: BlockMeta },
    Utf8 { offsets: BlockMeta, strings: BlockMeta },
}

/// One metadata-table entry
#[derive(Debug, Clone)]
pub struct ColumnMeta {
    pub name: String,
    /// Number of values; identical across all columns and equal to the
    /// header's `total_rows`
    pub count: u64,
    pub blocks: ColumnBlocks,
}

impl ColumnMeta {
    pub fn column_type(&self) -> ColumnType {
        match self.blocks {
            ColumnBlocks::Int32 { .. } => ColumnType::Int32,
            ColumnBlocks::Float64 { .. } => ColumnType::Float64,
            ColumnBlocks::Utf8 { .. } => ColumnType::Utf8,
        }
    }
}
