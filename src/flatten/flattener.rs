//! Bounded-depth dictionary flattening

use crate::types::{FlatRecord, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// How deep to flatten and what to do with objects left over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenOptions {
    /// Number of flattening passes
    #[serde(default = "default_layers")]
    pub layers: usize,
    /// Drop values that are still objects after all passes
    #[serde(default = "default_drop_deeper")]
    pub drop_deeper: bool,
}

fn default_layers() -> usize {
    1
}

fn default_drop_deeper() -> bool {
    true
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            drop_deeper: default_drop_deeper(),
        }
    }
}

impl FlattenOptions {
    /// Create options with an explicit depth
    pub fn new(layers: usize, drop_deeper: bool) -> Self {
        Self {
            layers,
            drop_deeper,
        }
    }

    /// One pass, deeper objects dropped
    pub fn shallow() -> Self {
        Self::default()
    }

    /// Three passes, deeper objects dropped. Used for full API objects
    /// (users, statuses, lists).
    pub fn full() -> Self {
        Self::new(3, true)
    }

    /// Keep objects nested deeper than `layers` instead of dropping them
    #[must_use]
    pub fn keep_deeper(mut self) -> Self {
        self.drop_deeper = false;
        self
    }

    /// Flatten a record with these options
    pub fn apply(&self, record: &JsonObject) -> FlatRecord {
        flatten(record, self.layers, self.drop_deeper)
    }
}

/// Flatten `record` by `layers` passes of `parent.child` key composition.
///
/// Within a pass, composed children are merged first and pass-through
/// entries second, so when two entries land on the same key the later one
/// wins: a pass-through key beats a composed one, and among composed keys
/// the one from the later parent (in key order) wins.
///
/// With `drop_deeper`, entries still holding an object afterwards are
/// removed. Arrays are left untouched either way.
///
/// ```
/// use serde_json::json;
/// use twitter_tables::flatten::flatten;
///
/// let record = json!({"a": 1, "b": {"c": 2, "d": {"e": 3}}});
/// let flat = flatten(record.as_object().unwrap(), 1, true);
/// assert_eq!(serde_json::Value::Object(flat), json!({"a": 1, "b.c": 2}));
/// ```
pub fn flatten(record: &JsonObject, layers: usize, drop_deeper: bool) -> FlatRecord {
    let mut data = record.clone();

    for _ in 0..layers {
        if !data.values().any(JsonValue::is_object) {
            break;
        }
        data = flatten_pass(data);
    }

    if drop_deeper {
        data.retain(|_, value| !value.is_object());
    }

    data
}

/// Merge one level of nested objects into the parent
fn flatten_pass(data: JsonObject) -> JsonObject {
    let mut composed = Vec::new();
    let mut passthrough = Vec::new();

    for (key, value) in data {
        match value {
            JsonValue::Object(children) => composed.extend(
                children
                    .into_iter()
                    .map(|(child, v)| (format!("{key}.{child}"), v)),
            ),
            other => passthrough.push((key, other)),
        }
    }

    // collect() inserts in order, so later duplicates overwrite earlier ones
    composed.into_iter().chain(passthrough).collect()
}

/// Prefix every key that does not already contain `prefix`
pub fn prefix_keys(record: FlatRecord, prefix: &str) -> FlatRecord {
    record
        .into_iter()
        .map(|(key, value)| {
            if key.contains(prefix) {
                (key, value)
            } else {
                (format!("{prefix}{key}"), value)
            }
        })
        .collect()
}
