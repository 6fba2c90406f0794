//! Flatten module
//!
//! Collapses nested JSON objects into flat records keyed by dotted paths.
//!
//! # Overview
//!
//! Flattening runs a fixed number of passes. Each pass merges one level of
//! nested objects into its parent (`parent.child`). Objects still nested
//! after the last pass are either dropped or kept as-is. Arrays are never
//! descended into.

mod flattener;

pub use flattener::{flatten, prefix_keys, FlattenOptions};
