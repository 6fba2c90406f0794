//! Tests for decoder module

use super::*;
use serde_json::json;

// ============================================================================
// DecoderFormat Tests
// ============================================================================

#[test]
fn test_decoder_format_default() {
    assert_eq!(DecoderFormat::default(), DecoderFormat::Json);
}

#[test]
fn test_decoder_format_from_path() {
    assert_eq!(DecoderFormat::from_path("dump.jsonl"), DecoderFormat::Jsonl);
    assert_eq!(DecoderFormat::from_path("dump.ndjson"), DecoderFormat::Jsonl);
    assert_eq!(DecoderFormat::from_path("dump.json"), DecoderFormat::Json);
    assert_eq!(DecoderFormat::from_path("dump"), DecoderFormat::Json);
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_array() {
    let records = JsonDecoder::new().decode(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_json_decoder_single_object() {
    let records = JsonDecoder::new().decode(r#"{"id": 1}"#).unwrap();
    assert_eq!(records, vec![json!({"id": 1})]);
}

#[test]
fn test_json_decoder_record_path() {
    let body = r#"{"users": [{"id": 1}], "next_cursor": 0}"#;
    let records = JsonDecoder::with_path("users").decode(body).unwrap();
    assert_eq!(records, vec![json!({"id": 1})]);

    let body = r#"{"data": {"items": [{"id": 1}, {"id": 2}]}}"#;
    let records = JsonDecoder::with_path("$.data.items").decode(body).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_json_decoder_missing_path() {
    let err = JsonDecoder::with_path("statuses")
        .decode(r#"{"users": []}"#)
        .unwrap_err();
    assert!(err.to_string().contains("statuses"));
}

#[test]
fn test_json_decoder_null_is_empty() {
    let records = JsonDecoder::new().decode("null").unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_json_decoder_invalid() {
    let err = JsonDecoder::new().decode("{not json").unwrap_err();
    assert!(err.to_string().contains("Failed to parse JSON"));
}

// ============================================================================
// JSONL Decoder Tests
// ============================================================================

#[test]
fn test_jsonl_decoder() {
    let body = "{\"id\": 1}\n\n{\"id\": 2}\n";
    let records = JsonlDecoder::new().decode(body).unwrap();
    assert_eq!(records, vec![json!({"id": 1}), json!({"id": 2})]);
}

#[test]
fn test_jsonl_decoder_reports_line() {
    let body = "{\"id\": 1}\n{broken\n";
    let err = JsonlDecoder::new().decode(body).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn test_decoder_for() {
    let decoder = decoder_for(DecoderFormat::Json, Some("items"));
    let records = decoder.decode(r#"{"items": [1, 2, 3]}"#).unwrap();
    assert_eq!(records.len(), 3);

    let decoder = decoder_for(DecoderFormat::Jsonl, Some("ignored"));
    let records = decoder.decode("1\n2\n").unwrap();
    assert_eq!(records.len(), 2);
}
