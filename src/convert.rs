//! Conversion Module
//!
//! Coordinates the external tabular-text codec with the SCBF engine: the two
//! command operations (CSV → SCBF, SCBF → CSV) live here as library
//! functions so the binary is a thin dispatcher.

use std::path::Path;

use crate::column::{encode_column, infer_column_type, Value};
use crate::config::Config;
use crate::error::{Result, ScbfError};
use crate::format::{ScbfReader, ScbfWriter};
use crate::schema::{ColumnSpec, Schema};

/// Convert a CSV file (one header row, then data rows) into an SCBF file.
///
/// Column types are inferred per column from the first non-empty value in
/// row order; a later value that fails to parse as the committed type fails
/// the whole conversion.
pub fn csv_to_scbf(csv_path: &Path, out_path: &Path, config: &Config) -> Result<()> {
    // ---- Read the whole CSV table ----
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .from_path(csv_path)?;

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Err(ScbfError::Encoding("input CSV has no header row".to_string()));
    }

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    let total_rows = rows.len() as u64;

    // ---- Infer schema, then encode each column ----
    let mut specs = Vec::with_capacity(header.len());
    let mut columns = Vec::with_capacity(header.len());

    for (index, name) in header.iter().enumerate() {
        let values: Vec<&str> = rows.iter().map(|r| r.get(index).unwrap_or("")).collect();
        let column_type = infer_column_type(values.iter().copied());

        columns.push(encode_column(name, column_type, &values, config.compression_level)?);
        specs.push(ColumnSpec {
            name: name.clone(),
            column_type,
        });
    }

    let schema = Schema::new(specs);

    // ---- Lay out the file ----
    ScbfWriter::create(out_path)?.write(&schema, total_rows, &columns)?;

    tracing::info!(
        input = %csv_path.display(),
        output = %out_path.display(),
        columns = schema.len(),
        rows = total_rows,
        "converted CSV to SCBF"
    );

    Ok(())
}

/// Convert an SCBF file back to CSV.
///
/// With `columns`, only the named columns are decoded and written, in the
/// requested order; an unknown name fails the whole conversion. Without it,
/// the full table is reconstructed.
pub fn scbf_to_csv(
    scbf_path: &Path,
    out_path: &Path,
    columns: Option<&[String]>,
    config: &Config,
) -> Result<()> {
    let mut reader = ScbfReader::open(scbf_path)?;
    let total_rows = reader.total_rows();

    let (names, rows) = match columns {
        Some(names) => {
            let decoded = reader.read_columns(names)?;
            for (name, data) in &decoded {
                if data.len() as u64 != total_rows {
                    return Err(ScbfError::Format(format!(
                        "column '{}' decoded {} values, expected {}",
                        name,
                        data.len(),
                        total_rows
                    )));
                }
            }

            let mut rows: Vec<Vec<Value>> = Vec::with_capacity(total_rows as usize);
            for i in 0..total_rows as usize {
                rows.push(decoded.iter().map(|(_, data)| data.value(i)).collect());
            }
            let names = decoded.into_iter().map(|(name, _)| name).collect();
            (names, rows)
        }
        None => reader.read_all()?,
    };

    // ---- Render to tabular text ----
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_path(out_path)?;

    writer.write_record(&names)?;
    for row in &rows {
        writer.write_record(row.iter().map(Value::to_string))?;
    }
    writer.flush()?;

    tracing::info!(
        input = %scbf_path.display(),
        output = %out_path.display(),
        columns = names.len(),
        rows = rows.len(),
        "converted SCBF to CSV"
    );

    Ok(())
}
