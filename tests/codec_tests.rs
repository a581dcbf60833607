//! Tests for the leaf components: compressor, type inference, schema blob,
//! and the per-type column codecs.

use scbf::column::{decode_column, encode_column, infer_column_type, ColumnData, CompressedBlocks};
use scbf::compress;
use scbf::format::EncodedColumn;
use scbf::schema::{ColumnSpec, ColumnType, Schema};

// =============================================================================
// Compressor Tests
// =============================================================================

#[test]
fn test_compress_roundtrip() {
    let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
    let compressed = compress::compress(&data, 6).unwrap();
    assert!(compressed.len() < data.len());

    let decompressed = compress::decompress(&compressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_compress_empty_input() {
    let compressed = compress::compress(b"", 6).unwrap();
    let decompressed = compress::decompress(&compressed).unwrap();
    assert!(decompressed.is_empty());
}

#[test]
fn test_compress_incompressible_input() {
    // Pseudo-random bytes still round-trip even when compression gains nothing
    let data: Vec<u8> = (0u32..4096).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
    let compressed = compress::compress(&data, 9).unwrap();
    assert_eq!(compress::decompress(&compressed).unwrap(), data);
}

#[test]
fn test_compress_level_zero_roundtrip() {
    let data = b"stored, not deflated";
    let compressed = compress::compress(data, 0).unwrap();
    assert_eq!(compress::decompress(&compressed).unwrap(), data.to_vec());
}

// =============================================================================
// Type Inference Tests
// =============================================================================

#[test]
fn test_infer_int32() {
    assert_eq!(infer_column_type(["1", "2", "3"]), ColumnType::Int32);
    assert_eq!(infer_column_type(["-17"]), ColumnType::Int32);
}

#[test]
fn test_infer_float64() {
    assert_eq!(infer_column_type(["91.5", "88.0"]), ColumnType::Float64);
    assert_eq!(infer_column_type(["1e-3"]), ColumnType::Float64);
}

#[test]
fn test_infer_utf8() {
    assert_eq!(infer_column_type(["Alice", "Bob"]), ColumnType::Utf8);
}

#[test]
fn test_infer_skips_leading_empty_values() {
    // The first NON-EMPTY value decides
    assert_eq!(infer_column_type(["", "", "42", "x"]), ColumnType::Int32);
}

#[test]
fn test_infer_all_empty_is_utf8() {
    assert_eq!(infer_column_type(["", "", ""]), ColumnType::Utf8);
    assert_eq!(infer_column_type(std::iter::empty::<&str>()), ColumnType::Utf8);
}

#[test]
fn test_infer_is_single_sample() {
    // Later values never refine the decision, even when they contradict it
    assert_eq!(infer_column_type(["7", "not a number"]), ColumnType::Int32);
    assert_eq!(infer_column_type(["oops", "1", "2"]), ColumnType::Utf8);
}

#[test]
fn test_infer_out_of_range_integer_falls_to_float() {
    // Too wide for i32, but parses as f64
    assert_eq!(infer_column_type(["5000000000"]), ColumnType::Float64);
}

// =============================================================================
// Schema Blob Tests
// =============================================================================

#[test]
fn test_schema_blob_roundtrip() {
    let schema = Schema::new(vec![
        ColumnSpec { name: "id".to_string(), column_type: ColumnType::Int32 },
        ColumnSpec { name: "name".to_string(), column_type: ColumnType::Utf8 },
        ColumnSpec { name: "score".to_string(), column_type: ColumnType::Float64 },
    ]);

    let blob = schema.encode_blob().unwrap();

    // Length prefix covers exactly the JSON payload
    let prefix = u32::from_le_bytes(blob[0..4].try_into().unwrap()) as usize;
    assert_eq!(prefix, blob.len() - 4);

    let decoded = Schema::decode_blob(&mut &blob[..]).unwrap();
    assert_eq!(decoded, schema);
}

#[test]
fn test_schema_blob_is_json_with_type_names() {
    let schema = Schema::new(vec![ColumnSpec {
        name: "score".to_string(),
        column_type: ColumnType::Float64,
    }]);

    let blob = schema.encode_blob().unwrap();
    let json = std::str::from_utf8(&blob[4..]).unwrap();
    assert!(json.contains("\"columns\""));
    assert!(json.contains("\"float64\""));
}

#[test]
fn test_type_codes() {
    assert_eq!(ColumnType::Int32.code(), 1);
    assert_eq!(ColumnType::Float64.code(), 2);
    assert_eq!(ColumnType::Utf8.code(), 3);

    assert_eq!(ColumnType::from_code(2).unwrap(), ColumnType::Float64);
    assert!(ColumnType::from_code(0).is_err());
    assert!(ColumnType::from_code(9).is_err());
}

// =============================================================================
// Column Codec Tests
// =============================================================================

#[test]
fn test_int32_column_roundtrip() {
    let encoded = encode_column("id", ColumnType::Int32, &["1", "-2", "2147483647"], 6).unwrap();

    let EncodedColumn::Int32 { data } = &encoded else {
        panic!("expected int32 encoding");
    };
    assert_eq!(data.uncompressed_size, 12);

    let decoded = decode_column(ColumnType::Int32, 3, CompressedBlocks::Single(&data.data)).unwrap();
    assert_eq!(decoded, ColumnData::Int32(vec![1, -2, i32::MAX]));
}

#[test]
fn test_float64_column_roundtrip() {
    let encoded = encode_column("score", ColumnType::Float64, &["91.5", "88.0", "79.25"], 6).unwrap();

    let EncodedColumn::Float64 { data } = &encoded else {
        panic!("expected float64 encoding");
    };
    assert_eq!(data.uncompressed_size, 24);

    let decoded = decode_column(ColumnType::Float64, 3, CompressedBlocks::Single(&data.data)).unwrap();
    assert_eq!(decoded, ColumnData::Float64(vec![91.5, 88.0, 79.25]));
}

#[test]
fn test_utf8_column_roundtrip() {
    let values = ["Alice", "", "Bob", "héllo wörld"];
    let encoded = encode_column("name", ColumnType::Utf8, &values, 6).unwrap();

    let EncodedColumn::Utf8 { offsets, strings } = &encoded else {
        panic!("expected utf8 encoding");
    };

    let decoded = decode_column(
        ColumnType::Utf8,
        4,
        CompressedBlocks::Dual { offsets: &offsets.data, strings: &strings.data },
    )
    .unwrap();
    let expected: Vec<String> = values.iter().map(|s| s.to_string()).collect();
    assert_eq!(decoded, ColumnData::Utf8(expected));
}

#[test]
fn test_utf8_offset_table_invariant() {
    let values = ["a", "", "bcd", "ef"];
    let encoded = encode_column("col", ColumnType::Utf8, &values, 6).unwrap();

    let EncodedColumn::Utf8 { offsets, strings } = &encoded else {
        panic!("expected utf8 encoding");
    };

    let raw = compress::decompress(&offsets.data).unwrap();
    let table: Vec<u32> = raw
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect();

    // count + 1 entries, starts at 0, ends at the blob length, non-decreasing
    assert_eq!(table.len(), values.len() + 1);
    assert_eq!(table[0], 0);
    assert_eq!(*table.last().unwrap() as u64, strings.uncompressed_size);
    assert!(table.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(table, vec![0, 1, 1, 4, 6]);
}

#[test]
fn test_encode_rejects_unparseable_value() {
    let result = encode_column("id", ColumnType::Int32, &["1", "two", "3"], 6);
    let err = result.unwrap_err();
    assert!(matches!(err, scbf::ScbfError::Encoding(_)));
    // The message names the column and the offending row
    let msg = err.to_string();
    assert!(msg.contains("'id'"));
    assert!(msg.contains("row 1"));
}

#[test]
fn test_encode_rejects_empty_numeric_cell() {
    assert!(encode_column("score", ColumnType::Float64, &["1.0", ""], 6).is_err());
}

#[test]
fn test_decode_rejects_truncated_block() {
    let encoded = encode_column("id", ColumnType::Int32, &["1", "2", "3"], 6).unwrap();
    let EncodedColumn::Int32 { data } = &encoded else {
        panic!("expected int32 encoding");
    };

    // Claiming a different count than the block holds is a format error
    let result = decode_column(ColumnType::Int32, 5, CompressedBlocks::Single(&data.data));
    assert!(matches!(result, Err(scbf::ScbfError::Format(_))));
}

#[test]
fn test_zero_row_columns() {
    let encoded = encode_column("name", ColumnType::Utf8, &[], 6).unwrap();
    let EncodedColumn::Utf8 { offsets, strings } = &encoded else {
        panic!("expected utf8 encoding");
    };

    // Offsets still hold the single leading zero entry
    assert_eq!(offsets.uncompressed_size, 4);
    assert_eq!(strings.uncompressed_size, 0);

    let decoded = decode_column(
        ColumnType::Utf8,
        0,
        CompressedBlocks::Dual { offsets: &offsets.data, strings: &strings.data },
    )
    .unwrap();
    assert_eq!(decoded, ColumnData::Utf8(vec![]));
}
