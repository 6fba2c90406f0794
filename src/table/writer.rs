//! Parquet output for tables

use crate::error::{Error, Result};
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression as ParquetCompression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Compression codec, as named in settings files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Snappy,
    Zstd,
    Gzip,
    None,
}

impl From<Compression> for ParquetCompression {
    fn from(codec: Compression) -> Self {
        match codec {
            Compression::Snappy => Self::SNAPPY,
            Compression::Zstd => Self::ZSTD(ZstdLevel::default()),
            Compression::Gzip => Self::GZIP(GzipLevel::default()),
            Compression::None => Self::UNCOMPRESSED,
        }
    }
}

/// Codec and row-group sizing for Parquet files
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Snappy,
            row_group_size: 1024 * 1024,
        }
    }
}

impl ParquetWriterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    fn properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression.into())
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Writes record batches sharing one schema to a Parquet file
pub struct ParquetWriter {
    path: PathBuf,
    inner: ArrowWriter<File>,
    rows_written: usize,
}

impl ParquetWriter {
    /// Create (or truncate) `path` and prepare a writer for `schema`
    pub fn new(
        path: impl AsRef<Path>,
        schema: &Schema,
        config: &ParquetWriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .map_err(|e| Error::output(format!("Cannot create '{}': {e}", path.display())))?;

        let inner = ArrowWriter::try_new(file, Arc::new(schema.clone()), Some(config.properties()))?;
        Ok(Self {
            path,
            inner,
            rows_written: 0,
        })
    }

    /// Append a batch
    pub fn write(&mut self, batch: &RecordBatch) -> Result<()> {
        self.inner.write(batch)?;
        self.rows_written += batch.num_rows();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush the footer; returns the total rows written
    pub fn close(self) -> Result<usize> {
        self.inner.close().map_err(|e| {
            Error::output(format!("Cannot finish '{}': {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), rows = self.rows_written, "Closed Parquet file");
        Ok(self.rows_written)
    }
}

/// Write one batch to a new Parquet file, with default settings when
/// `config` is `None`
pub fn write_record_batch(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    config: Option<&ParquetWriterConfig>,
) -> Result<usize> {
    let config = config.cloned().unwrap_or_default();
    let mut writer = ParquetWriter::new(path, &batch.schema(), &config)?;
    writer.write(batch)?;
    writer.close()
}
