//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use super::decoders::{JsonDecoder, JsonlDecoder};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Format of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl DecoderFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "ndjson") => DecoderFormat::Jsonl,
            _ => DecoderFormat::Json,
        }
    }
}

/// Trait for decoding input text into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the input into a list of records
    fn decode(&self, body: &str) -> Result<Vec<Value>>;
}

/// Build the decoder for `format`
///
/// The record path only applies to JSON input.
pub fn decoder_for(format: DecoderFormat, record_path: Option<&str>) -> Box<dyn RecordDecoder> {
    match format {
        DecoderFormat::Json => match record_path {
            Some(path) => Box::new(JsonDecoder::with_path(path)),
            None => Box::new(JsonDecoder::new()),
        },
        DecoderFormat::Jsonl => Box::new(JsonlDecoder::new()),
    }
}
