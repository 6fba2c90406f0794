//! Error types for twitter-tables
//!
//! This module defines the error hierarchy for the crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Failures raised by the injected API client are not translated: they
//! travel inside [`Error::Client`] and can be downcast back to the
//! client's own error type.

use thiserror::Error;

/// Boxed error produced by an injected API client
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for twitter-tables
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // API Client Errors (passed through unchanged)
    // ============================================================================
    #[error(transparent)]
    Client(ClientError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    #[error("Failed to decode input: {message}")]
    Decode { message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Wrap an error raised by an API client
    pub fn client(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Client(Box::new(err))
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Borrow the client error, if this error came from the API client
    pub fn as_client_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Client(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }

    /// Downcast a client error to its concrete type
    pub fn downcast_client<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.as_client_error().and_then(|e| e.downcast_ref::<E>())
    }
}

/// Result type alias for twitter-tables
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to local errors
///
/// Client errors are returned untouched so callers can still downcast them.
pub trait ResultExt<T> {
    /// Prefix a local error with `message`
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Prefix a local error with a lazily built message
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| match e.into() {
            client @ Error::Client(_) => client,
            local => Error::Other(format!("{}: {local}", f())),
        })
    }
}
