//! Input decoder module
//!
//! Supports: JSON, JSONL
//!
//! # Overview
//!
//! Decoders turn a saved API response (or a dump of them) into a list of
//! records ready for flattening. A JSON decoder can dig the records out of
//! an envelope with a dotted record path (`users`, `data.items`).

mod decoders;
mod types;

pub use decoders::{JsonDecoder, JsonlDecoder};
pub use types::{decoder_for, DecoderFormat, RecordDecoder};

#[cfg(test)]
mod tests;
