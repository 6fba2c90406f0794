//! Decoder implementations
//!
//! Each decoder handles a specific input format.

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// Dotted path to the records
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract records from a JSON value using the record path
    fn extract_records(&self, value: Value) -> Result<Vec<Value>> {
        let target = match &self.record_path {
            Some(path) => extract_path(value, path).ok_or_else(|| Error::RecordExtraction {
                path: path.clone(),
                message: "path not found".to_string(),
            })?,
            None => value,
        };

        match target {
            Value::Array(arr) => Ok(arr),
            Value::Null => Ok(Vec::new()),
            other => Ok(vec![other]),
        }
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        self.extract_records(value)
    }
}

/// Follow a dotted path (`$.` prefix optional) through objects
fn extract_path(value: Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    path.split('.').try_fold(value, |current, part| match current {
        Value::Object(mut map) => map.remove(part),
        _ => None,
    })
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Value>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| {
                Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
            })?;

            records.push(value);
        }

        Ok(records)
    }
}
