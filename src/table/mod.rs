//! Table module
//!
//! The tabular result every public operation returns, and its Arrow and
//! Parquet renderings.
//!
//! # Overview
//!
//! - [`Table`] - ordered flat records with a unified, sorted column set
//! - [`infer_schema`] / [`rows_to_arrow`] - Arrow schema inference and
//!   RecordBatch construction
//! - [`ParquetWriter`] - Parquet output

mod frame;
mod schema;
mod writer;

pub use frame::Table;
pub use schema::{infer_schema, rows_to_arrow};
pub use writer::{write_record_batch, Compression, ParquetWriter, ParquetWriterConfig};

#[cfg(test)]
mod tests;
