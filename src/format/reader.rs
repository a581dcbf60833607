//! SCBF Reader
//!
//! Opens an SCBF file, validates the header, and parses the metadata table.
//! Columns decode independently: reading one column costs one or two
//! seek-and-read operations sized by that column's blocks, regardless of the
//! rest of the file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::column::{self, ColumnData, CompressedBlocks, Value};
use crate::error::{Result, ScbfError};
use crate::schema::{ColumnType, Schema};

use super::{BlockMeta, ColumnBlocks, ColumnMeta, MAGIC};

/// Reader for SCBF files
pub struct ScbfReader {
    /// File handle, exclusively owned for the lifetime of this reader
    file: File,
    file_len: u64,
    /// Schema parsed from the header blob
    schema: Schema,
    total_rows: u64,
    /// Metadata table, in written (schema) order
    metas: Vec<ColumnMeta>,
}

impl ScbfReader {
    /// Open an SCBF file: validate the magic, parse the header and the
    /// metadata table.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let file_len = file.metadata()?.len();

        // ---- Header ----
        let mut magic = [0u8; 8];
        file.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(ScbfError::Format(format!(
                "bad magic: not an SCBF file (got {:?})",
                magic
            )));
        }

        let schema = Schema::decode_blob(&mut file)?;
        let num_columns = read_u32(&mut file)?;
        let total_rows = read_u64(&mut file)?;
        let meta_table_offset = read_u64(&mut file)?;

        if num_columns as usize != schema.len() {
            return Err(ScbfError::Format(format!(
                "header declares {} columns but schema blob lists {}",
                num_columns,
                schema.len()
            )));
        }

        // ---- Metadata table ----
        let metas = read_meta_table(&mut file, meta_table_offset, num_columns)?;

        tracing::debug!(
            path = %path.display(),
            columns = metas.len(),
            rows = total_rows,
            "opened SCBF file"
        );

        Ok(Self {
            file,
            file_len,
            schema,
            total_rows,
            metas,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn num_columns(&self) -> usize {
        self.metas.len()
    }

    /// Metadata-table entries, in written order
    pub fn column_metas(&self) -> &[ColumnMeta] {
        &self.metas
    }

    /// Column names, in written order
    pub fn column_names(&self) -> Vec<String> {
        self.metas.iter().map(|m| m.name.clone()).collect()
    }

    // =========================================================================
    // Column Reads
    // =========================================================================

    /// Decode one column by name.
    ///
    /// Seeks directly to the column's recorded block offset(s) and reads
    /// exactly the recorded compressed sizes.
    pub fn read_column(&mut self, name: &str) -> Result<ColumnData> {
        let index = self
            .metas
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| ScbfError::ColumnNotFound(name.to_string()))?;
        self.read_column_at(index)
    }

    /// Decode several columns by name, in the requested order.
    ///
    /// Fails on the first name absent from the schema; nothing is skipped.
    pub fn read_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<Vec<(String, ColumnData)>> {
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let data = self.read_column(name)?;
            out.push((name.to_string(), data));
        }
        Ok(out)
    }

    /// Decode every column and reconstruct rows by index zip.
    pub fn read_all(&mut self) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
        let names = self.column_names();

        let mut columns = Vec::with_capacity(self.metas.len());
        for index in 0..self.metas.len() {
            let data = self.read_column_at(index)?;
            if data.len() as u64 != self.total_rows {
                return Err(ScbfError::Format(format!(
                    "column '{}' decoded {} values, expected {}",
                    self.metas[index].name,
                    data.len(),
                    self.total_rows
                )));
            }
            columns.push(data);
        }

        let mut rows = Vec::with_capacity(self.total_rows as usize);
        for i in 0..self.total_rows as usize {
            rows.push(columns.iter().map(|c| c.value(i)).collect());
        }

        Ok((names, rows))
    }

    fn read_column_at(&mut self, index: usize) -> Result<ColumnData> {
        let meta = self.metas[index].clone();
        match meta.blocks {
            ColumnBlocks::Int32 { data } | ColumnBlocks::Float64 { data } => {
                let compressed = self.read_block(&data)?;
                column::decode_column(
                    meta.column_type(),
                    meta.count,
                    CompressedBlocks::Single(&compressed),
                )
            }
            ColumnBlocks::Utf8 { offsets, strings } => {
                let offsets_compressed = self.read_block(&offsets)?;
                let strings_compressed = self.read_block(&strings)?;
                column::decode_column(
                    ColumnType::Utf8,
                    meta.count,
                    CompressedBlocks::Dual {
                        offsets: &offsets_compressed,
                        strings: &strings_compressed,
                    },
                )
            }
        }
    }

    fn read_block(&mut self, block: &BlockMeta) -> Result<Vec<u8>> {
        // Recorded sizes must point inside the file before we allocate
        if block.offset.checked_add(block.compressed_size).map_or(true, |end| end > self.file_len) {
            return Err(ScbfError::Format(format!(
                "block at offset {} with {} compressed bytes exceeds file length {}",
                block.offset, block.compressed_size, self.file_len
            )));
        }

        self.file.seek(SeekFrom::Start(block.offset))?;
        let mut compressed = vec![0u8; block.compressed_size as usize];
        self.file.read_exact(&mut compressed)?;
        Ok(compressed)
    }
}

// =============================================================================
// Metadata Table Parsing
// =============================================================================

/// Parse the metadata table, strictly in written order.
fn read_meta_table(file: &mut File, meta_table_offset: u64, num_columns: u32) -> Result<Vec<ColumnMeta>> {
    file.seek(SeekFrom::Start(meta_table_offset))?;

    let mut metas = Vec::with_capacity(num_columns as usize);
    for _ in 0..num_columns {
        let name_len = read_u16(file)?;
        let mut name_bytes = vec![0u8; name_len as usize];
        file.read_exact(&mut name_bytes)?;
        let name = String::from_utf8(name_bytes)
            .map_err(|e| ScbfError::Format(format!("column name is not UTF-8: {}", e)))?;

        let type_code = read_u8(file)?;
        let column_type = ColumnType::from_code(type_code)?;
        let count = read_u64(file)?;

        let blocks = match column_type {
            ColumnType::Int32 => ColumnBlocks::Int32 {
                data: read_block_meta(file)?,
            },
            ColumnType::Float64 => ColumnBlocks::Float64 {
                data: read_block_meta(file)?,
            },
            ColumnType::Utf8 => ColumnBlocks::Utf8 {
                offsets: read_block_meta(file)?,
                strings: read_block_meta(file)?,
            },
        };

        metas.push(ColumnMeta { name, count, blocks });
    }

    Ok(metas)
}

fn read_block_meta(file: &mut File) -> Result<BlockMeta> {
    Ok(BlockMeta {
        uncompressed_size: read_u64(file)?,
        compressed_size: read_u64(file)?,
        offset: read_u64(file)?,
    })
}

// =============================================================================
// Little-endian read helpers
// =============================================================================

fn read_u8(file: &mut File) -> Result<u8> {
    let mut buf = [0u8; 1];
    file.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u16(file: &mut File) -> Result<u16> {
    let mut buf = [0u8; 2];
    file.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_u32(file: &mut File) -> Result<u32> {
    let mut buf = [0u8; 4];
    file.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64(file: &mut File) -> Result<u64> {
    let mut buf = [0u8; 8];
    file.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
