//! Pagination types and traits
//!
//! Defines the page-fetch capability consumed by the page walker.

use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque position marker handed back by the API client
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from its raw value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw cursor value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cursor {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One page of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Records on this page, in API order
    pub items: Vec<JsonValue>,
    /// Cursor for the following page; `None` on the last page
    pub next: Option<Cursor>,
}

impl Page {
    /// A final page
    pub fn last(items: Vec<JsonValue>) -> Self {
        Self { items, next: None }
    }

    /// A page followed by another
    pub fn with_next(items: Vec<JsonValue>, next: impl Into<Cursor>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

/// Fetches pages on demand
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page at `cursor`, or the first page when `cursor` is `None`
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page>;
}
