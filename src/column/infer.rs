//! Type inference
//!
//! Single-sample policy: the first non-empty value in row order decides the
//! column's storage type. Later values are never consulted, so a column that
//! starts numeric and turns textual fails later, during encoding. A column
//! whose values are all empty is classified Utf8.

use crate::schema::ColumnType;

/// Infer the storage type of one column from its text values, in row order.
pub fn infer_column_type<'a, I>(values: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    for value in values {
        if value.is_empty() {
            continue;
        }
        return infer_value_type(value);
    }
    ColumnType::Utf8
}

/// Classify a single non-empty value: integer parse first, then float,
/// then fall back to text.
fn infer_value_type(value: &str) -> ColumnType {
    if value.parse::<i32>().is_ok() {
        ColumnType::Int32
    } else if value.parse::<f64>().is_ok() {
        ColumnType::Float64
    } else {
        ColumnType::Utf8
    }
}
