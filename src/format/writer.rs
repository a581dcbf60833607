//! SCBF Writer
//!
//! Two-pass, seek-based file layout engine.
//!
//! Pass one writes the header and the metadata table with zero placeholders
//! at every position that will hold a block offset. Pass two appends the
//! compressed blocks at the growing end of the file and back-patches each
//! placeholder with the block's true starting offset immediately after the
//! block is written. Finally the header's metadata-table offset is patched.
//!
//! The whole protocol runs against a temporary file in the destination's
//! directory; the file is persisted to the final path only on success, so a
//! failed write never leaves a partial file behind.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, ScbfError};
use crate::schema::Schema;

use super::{Block, EncodedColumn, MAGIC};

/// Writer for creating a new SCBF file
pub struct ScbfWriter {
    /// Final output path
    dest: PathBuf,
    /// Staging file; dropped (and deleted) if the write fails
    temp: NamedTempFile,
}

impl ScbfWriter {
    /// Stage a new SCBF file next to `path`.
    ///
    /// The temporary file lives in the destination's directory so the final
    /// persist is an atomic rename on the same filesystem.
    pub fn create(path: &Path) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;

        Ok(Self {
            dest: path.to_path_buf(),
            temp,
        })
    }

    /// Write the whole table and persist the file.
    ///
    /// `columns` must match `schema` in order and type; every column holds
    /// `total_rows` values.
    pub fn write(mut self, schema: &Schema, total_rows: u64, columns: &[EncodedColumn]) -> Result<()> {
        if columns.len() != schema.len() {
            return Err(ScbfError::Encoding(format!(
                "schema declares {} columns but {} were encoded",
                schema.len(),
                columns.len()
            )));
        }

        let file = self.temp.as_file_mut();

        // ---- Pass 1a: header with a placeholder metadata-table offset ----
        file.write_all(MAGIC)?;
        file.write_all(&schema.encode_blob()?)?;
        file.write_all(&(schema.len() as u32).to_le_bytes())?;
        file.write_all(&total_rows.to_le_bytes())?;

        let meta_offset_pos = file.stream_position()?;
        file.write_all(&0u64.to_le_bytes())?;

        // ---- Pass 1b: metadata table with per-block offset placeholders ----
        let meta_start = file.stream_position()?;

        // Blocks flattened into write order; each paired with the file
        // position of its offset placeholder.
        let mut pending: Vec<(u64, &Block)> = Vec::new();

        for (spec, column) in schema.columns.iter().zip(columns) {
            if column.column_type() != spec.column_type {
                return Err(ScbfError::Encoding(format!(
                    "column '{}' encoded as {} but declared {}",
                    spec.name,
                    column.column_type(),
                    spec.column_type
                )));
            }

            let name = spec.name.as_bytes();
            let name_len = u16::try_from(name.len()).map_err(|_| {
                ScbfError::Encoding(format!("column name '{}' exceeds 65535 bytes", spec.name))
            })?;

            file.write_all(&name_len.to_le_bytes())?;
            file.write_all(name)?;
            file.write_all(&[column.column_type().code()])?;
            file.write_all(&total_rows.to_le_bytes())?;

            match column {
                EncodedColumn::Int32 { data } | EncodedColumn::Float64 { data } => {
                    write_block_sizes(file, data, &mut pending)?;
                }
                EncodedColumn::Utf8 { offsets, strings } => {
                    write_block_sizes(file, offsets, &mut pending)?;
                    write_block_sizes(file, strings, &mut pending)?;
                }
            }
        }

        // ---- Pass 2: append blocks, back-patching each offset ----
        for (placeholder_pos, block) in pending {
            let block_start = file.stream_position()?;
            file.write_all(&block.data)?;
            let block_end = file.stream_position()?;

            file.seek(SeekFrom::Start(placeholder_pos))?;
            file.write_all(&block_start.to_le_bytes())?;
            file.seek(SeekFrom::Start(block_end))?;
        }

        // ---- Finalize: patch the metadata-table offset, flush, persist ----
        file.seek(SeekFrom::Start(meta_offset_pos))?;
        file.write_all(&meta_start.to_le_bytes())?;

        file.flush()?;
        file.sync_all()?;

        self.temp.persist(&self.dest).map_err(|e| ScbfError::Io(e.error))?;

        tracing::debug!(
            path = %self.dest.display(),
            columns = schema.len(),
            rows = total_rows,
            "SCBF file written"
        );

        Ok(())
    }
}

/// Write a block's size fields plus a zero offset placeholder, remembering
/// the placeholder's position for back-patching.
fn write_block_sizes<'a>(
    file: &mut File,
    block: &'a Block,
    pending: &mut Vec<(u64, &'a Block)>,
) -> Result<()> {
    file.write_all(&block.uncompressed_size.to_le_bytes())?;
    file.write_all(&(block.data.len() as u64).to_le_bytes())?;
    let placeholder_pos = file.stream_position()?;
    file.write_all(&0u64.to_le_bytes())?;
    pending.push((placeholder_pos, block));
    Ok(())
}
