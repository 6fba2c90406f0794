//! Tabular result type

use super::schema::rows_to_arrow;
use super::writer::{write_record_batch, ParquetWriterConfig};
use crate::error::Result;
use crate::types::{FlatRecord, JsonValue};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Ordered flat records sharing one column set.
///
/// Columns are the union of keys across all rows, sorted by name. A row
/// without a given key reads as absent (null).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<FlatRecord>,
}

impl Table {
    /// Build a table from rows, unifying their columns
    pub fn from_rows(rows: Vec<FlatRecord>) -> Self {
        let columns: BTreeSet<&String> = rows.iter().flat_map(|r| r.keys()).collect();
        let columns = columns.into_iter().cloned().collect();
        Self { columns, rows }
    }

    /// Table with no rows and no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Column names, sorted
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order
    pub fn rows(&self) -> &[FlatRecord] {
        &self.rows
    }

    /// Consume the table, returning its rows
    pub fn into_rows(self) -> Vec<FlatRecord> {
        self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.binary_search_by(|c| c.as_str().cmp(name)).is_ok()
    }

    /// Row at `index`
    pub fn row(&self, index: usize) -> Option<&FlatRecord> {
        self.rows.get(index)
    }

    /// Cell at (`row`, `column`); `None` when the row lacks the key
    pub fn get(&self, row: usize, column: &str) -> Option<&JsonValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// All values of a column, one entry per row
    pub fn column(&self, name: &str) -> Vec<Option<&JsonValue>> {
        self.rows.iter().map(|r| r.get(name)).collect()
    }

    /// Keep only the rows matching `predicate`
    #[must_use]
    pub fn filter<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&FlatRecord) -> bool,
    {
        Self::from_rows(self.rows.into_iter().filter(|r| predicate(r)).collect())
    }

    /// Convert to an Arrow RecordBatch with an inferred schema
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        rows_to_arrow(&self.rows)
    }

    /// Write the table to a Parquet file, returning rows written
    pub fn write_parquet(
        &self,
        path: impl AsRef<Path>,
        config: Option<&ParquetWriterConfig>,
    ) -> Result<usize> {
        let batch = self.to_record_batch()?;
        write_record_batch(path, &batch, config)
    }

    /// One JSON object per line
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&serde_json::to_string(row)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl From<Vec<FlatRecord>> for Table {
    fn from(rows: Vec<FlatRecord>) -> Self {
        Self::from_rows(rows)
    }
}

impl FromIterator<FlatRecord> for Table {
    fn from_iter<I: IntoIterator<Item = FlatRecord>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
