//! Pagination module
//!
//! Walks a cursor-paged source lazily and collects rows up to a limit.
//!
//! # Overview
//!
//! A [`PageSource`] hands out one [`Page`] per call, given the cursor
//! returned by the previous page. [`items`] turns that into a lazy stream
//! of records; [`collect_rows`] drives the stream, transforms each record
//! and stops fetching as soon as the row limit is reached.

mod collect;
mod types;

pub use collect::{apply_limit, collect_rows, items, warn_if_over_cap};
pub use types::{Cursor, Page, PageSource};

#[cfg(test)]
mod tests;
