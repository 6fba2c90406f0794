//! Tests for table module

use super::*;
use crate::types::FlatRecord;
use arrow::array::{Array, BooleanArray, Int64Array, ListArray, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{json, Value};
use tempfile::tempdir;

fn row(value: Value) -> FlatRecord {
    value.as_object().cloned().unwrap()
}

fn users() -> Table {
    Table::from_rows(vec![
        row(json!({"id": 1, "screen_name": "ferris", "verified": true})),
        row(json!({"id": 2, "name": "Corro", "entities.urls": ["https://a"]})),
    ])
}

// ============================================================================
// Table Tests
// ============================================================================

#[test]
fn test_columns_are_sorted_union() {
    let table = users();
    assert_eq!(
        table.columns(),
        &["entities.urls", "id", "name", "screen_name", "verified"]
    );
    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
    assert!(table.has_column("name"));
    assert!(!table.has_column("location"));
}

#[test]
fn test_missing_keys_read_as_absent() {
    let table = users();
    assert_eq!(table.get(0, "name"), None);
    assert_eq!(table.get(1, "name"), Some(&json!("Corro")));
    assert_eq!(table.column("screen_name"), vec![Some(&json!("ferris")), None]);
    assert_eq!(table.get(5, "id"), None);
}

#[test]
fn test_rows_keep_order() {
    let table: Table = (0..5).map(|i| row(json!({"n": i}))).collect();
    let ns: Vec<i64> = table.rows().iter().map(|r| r["n"].as_i64().unwrap()).collect();
    assert_eq!(ns, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_empty_table() {
    let table = Table::empty();
    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    let batch = table.to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 0);
}

#[test]
fn test_filter_recomputes_columns() {
    let table = users().filter(|r| r.get("verified") == Some(&json!(true)));
    assert_eq!(table.len(), 1);
    assert_eq!(table.columns(), &["id", "screen_name", "verified"]);
}

#[test]
fn test_to_json_lines() {
    let table = Table::from(vec![row(json!({"a": 1})), row(json!({"b": "x"}))]);
    assert_eq!(table.to_json_lines().unwrap(), "{\"a\":1}\n{\"b\":\"x\"}\n");
}

// ============================================================================
// Schema Inference Tests
// ============================================================================

#[test]
fn test_infer_schema_types() {
    let schema = infer_schema(users().rows());
    assert_eq!(schema.field_with_name("id").unwrap().data_type(), &DataType::Int64);
    assert_eq!(
        schema.field_with_name("verified").unwrap().data_type(),
        &DataType::Boolean
    );
    assert_eq!(schema.field_with_name("name").unwrap().data_type(), &DataType::Utf8);
    assert!(matches!(
        schema.field_with_name("entities.urls").unwrap().data_type(),
        DataType::List(_)
    ));
    assert!(schema.fields().iter().all(|f| f.is_nullable()));
}

#[test]
fn test_infer_schema_field_order_is_sorted() {
    let schema = infer_schema(&[row(json!({"z": 1, "a": 2, "m": 3}))]);
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["a", "m", "z"]);
}

#[test]
fn test_infer_schema_mixed_numbers() {
    let schema = infer_schema(&[row(json!({"v": 42})), row(json!({"v": 2.5}))]);
    assert_eq!(schema.field_with_name("v").unwrap().data_type(), &DataType::Float64);
}

#[test]
fn test_infer_schema_null_then_value() {
    let schema = infer_schema(&[row(json!({"v": null})), row(json!({"v": "x"}))]);
    assert_eq!(schema.field_with_name("v").unwrap().data_type(), &DataType::Utf8);
}

#[test]
fn test_infer_schema_conflict_falls_back_to_string() {
    let schema = infer_schema(&[row(json!({"v": true})), row(json!({"v": 3}))]);
    assert_eq!(schema.field_with_name("v").unwrap().data_type(), &DataType::Utf8);
}

#[test]
fn test_infer_schema_merges_list_items() {
    let schema = infer_schema(&[row(json!({"tags": []})), row(json!({"tags": ["rust"]}))]);
    let DataType::List(item) = schema.field_with_name("tags").unwrap().data_type() else {
        panic!("expected list");
    };
    assert_eq!(item.data_type(), &DataType::Utf8);
}

// ============================================================================
// RecordBatch Tests
// ============================================================================

#[test]
fn test_rows_to_arrow_values() {
    let batch = users().to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 5);

    let schema = batch.schema();
    let id_idx = schema.index_of("id").unwrap();
    let ids = batch
        .column(id_idx)
        .as_any()
        .downcast_ref::<Int64Array>()
        .unwrap();
    assert_eq!(ids.value(0), 1);
    assert_eq!(ids.value(1), 2);

    let name_idx = schema.index_of("name").unwrap();
    let names = batch
        .column(name_idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert!(names.is_null(0));
    assert_eq!(names.value(1), "Corro");

    let verified_idx = schema.index_of("verified").unwrap();
    let verified = batch
        .column(verified_idx)
        .as_any()
        .downcast_ref::<BooleanArray>()
        .unwrap();
    assert!(verified.value(0));
    assert!(verified.is_null(1));

    let urls_idx = schema.index_of("entities.urls").unwrap();
    let urls = batch
        .column(urls_idx)
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    assert_eq!(urls.value_length(0), 0);
    assert_eq!(urls.value_length(1), 1);
}

#[test]
fn test_rows_to_arrow_nested_structs_in_lists() {
    let rows = vec![row(json!({
        "entities.user_mentions": [
            {"id_str": "1", "screen_name": "a"},
            {"id_str": "2", "screen_name": "b"}
        ]
    }))];
    let batch = rows_to_arrow(&rows).unwrap();
    let DataType::List(item) = batch.schema().field(0).data_type().clone() else {
        panic!("expected list");
    };
    assert!(matches!(item.data_type(), DataType::Struct(_)));
}

#[test]
fn test_rows_to_arrow_rows_without_columns() {
    let batch = rows_to_arrow(&[FlatRecord::new(), FlatRecord::new()]).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 0);
}

#[test]
fn test_empty_object_becomes_string() {
    let batch = rows_to_arrow(&[row(json!({"o": {}}))]).unwrap();
    assert_eq!(batch.schema().field(0).data_type(), &DataType::Utf8);
}

// ============================================================================
// Parquet Writer Tests
// ============================================================================

#[test]
fn test_parquet_writer_config() {
    let config = ParquetWriterConfig::new()
        .with_compression(Compression::Zstd)
        .with_row_group_size(10);
    assert_eq!(config.compression(), Compression::Zstd);
    assert_eq!(config.row_group_size(), 10);
    assert_eq!(ParquetWriterConfig::default().compression(), Compression::Snappy);
}

#[test]
fn test_compression_deserialize() {
    let c: Compression = serde_yaml::from_str("gzip").unwrap();
    assert_eq!(c, Compression::Gzip);
}

#[test]
fn test_write_parquet_roundtrip_row_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.parquet");

    let written = users().write_parquet(&path, None).unwrap();
    assert_eq!(written, 2);

    let file = std::fs::File::open(&path).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)
        .unwrap()
        .build()
        .unwrap();
    let total: usize = reader.map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(total, 2);
}

#[test]
fn test_parquet_writer_counts_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.parquet");
    let batch = users().to_record_batch().unwrap();

    let config = ParquetWriterConfig::new().with_compression(Compression::None);
    let mut writer = ParquetWriter::new(&path, batch.schema().as_ref(), &config).unwrap();
    writer.write(&batch).unwrap();
    writer.write(&batch).unwrap();
    assert_eq!(writer.rows_written(), 4);
    assert_eq!(writer.close().unwrap(), 4);
}
