//! Common types used throughout twitter-tables
//!
//! This module contains shared type definitions, type aliases,
//! and the selector types passed through to the API client.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// One flattened row: dotted-path keys to scalar or sequence values
pub type FlatRecord = JsonObject;

// ============================================================================
// User Selector
// ============================================================================

/// Identifies a user the way the API does
///
/// `Id` accepts either a numeric id or a screen name; the other two
/// variants disambiguate when a valid user id is also a valid screen name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRef {
    /// The authenticated user (no selector sent)
    #[default]
    Me,
    /// ID or screen name
    Id(String),
    /// Numeric user ID
    UserId(String),
    /// Screen name
    ScreenName(String),
}

impl UserRef {
    /// Select by ID or screen name
    pub fn id(id: impl ToString) -> Self {
        Self::Id(id.to_string())
    }

    /// Select by numeric user ID
    pub fn user_id(id: impl ToString) -> Self {
        Self::UserId(id.to_string())
    }

    /// Select by screen name
    pub fn screen_name(name: impl Into<String>) -> Self {
        Self::ScreenName(name.into())
    }

    /// Parameter name and value for this selector, with an optional key prefix
    /// (`source_` / `target_` for friendship lookups)
    pub fn param(&self, prefix: &str) -> Option<(String, String)> {
        match self {
            Self::Me => None,
            Self::Id(v) => Some((format!("{prefix}id"), v.clone())),
            Self::UserId(v) => Some((format!("{prefix}user_id"), v.clone())),
            Self::ScreenName(v) => Some((format!("{prefix}screen_name"), v.clone())),
        }
    }
}

// ============================================================================
// Status Window
// ============================================================================

/// `since_id` / `max_id` bounds for timeline-style calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusWindow {
    /// Only statuses with an ID greater than this
    pub since_id: Option<u64>,
    /// Only statuses with an ID less than or equal to this
    pub max_id: Option<u64>,
}

impl StatusWindow {
    /// Unbounded window
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound (exclusive)
    #[must_use]
    pub fn since(mut self, id: u64) -> Self {
        self.since_id = Some(id);
        self
    }

    /// Set the upper bound (inclusive)
    #[must_use]
    pub fn until(mut self, id: u64) -> Self {
        self.max_id = Some(id);
        self
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for CLI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
