//! Replay client
//!
//! An [`ApiClient`] that serves recorded responses. Responses can be
//! registered in memory or loaded from a fixture directory holding one
//! `<endpoint>.json` file per endpoint:
//!
//! - single-shot endpoints: the response body as-is
//! - paged endpoints: a JSON array of pages, each page an array of items
//!
//! Cursors are page indices. Every call is recorded for inspection.

use super::client::ApiClient;
use super::types::{Endpoint, Params};
use crate::error::{Error, Result, ResultExt};
use crate::pagination::{Cursor, Page};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;
use tracing::debug;

/// Errors raised by the replay client itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("No recorded response for '{endpoint}'")]
    MissingFixture { endpoint: Endpoint },

    #[error("Request to '{endpoint}' failed: {message}")]
    Injected { endpoint: Endpoint, message: String },

    #[error("Cursor '{cursor}' does not address a recorded page of '{endpoint}'")]
    UnknownCursor { endpoint: Endpoint, cursor: String },
}

/// One recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Endpoint requested
    pub endpoint: Endpoint,
    /// Parameters forwarded
    pub params: Params,
    /// Cursor for paged requests
    pub cursor: Option<Cursor>,
}

/// Client serving recorded responses
#[derive(Debug, Default)]
pub struct ReplayClient {
    responses: HashMap<Endpoint, JsonValue>,
    pages: HashMap<Endpoint, Vec<Vec<JsonValue>>>,
    failures: HashMap<Endpoint, String>,
    calls: Mutex<Vec<Call>>,
}

impl ReplayClient {
    /// Create an empty replay client
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the single-shot response for `endpoint`
    #[must_use]
    pub fn with_response(mut self, endpoint: Endpoint, response: JsonValue) -> Self {
        self.responses.insert(endpoint, response);
        self
    }

    /// Record the pages for a paged `endpoint`
    #[must_use]
    pub fn with_pages(mut self, endpoint: Endpoint, pages: Vec<Vec<JsonValue>>) -> Self {
        self.pages.insert(endpoint, pages);
        self
    }

    /// Make every request to `endpoint` fail
    #[must_use]
    pub fn with_failure(mut self, endpoint: Endpoint, message: impl Into<String>) -> Self {
        self.failures.insert(endpoint, message.into());
        self
    }

    /// Load fixtures from a directory of `<endpoint>.json` files
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::FileNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut client = Self::new();
        for endpoint in Endpoint::ALL {
            let path = dir.join(format!("{}.json", endpoint.as_str()));
            if !path.exists() {
                continue;
            }

            let content = std::fs::read_to_string(&path)?;
            let value: JsonValue = serde_json::from_str(&content)
                .with_context(|| format!("Invalid fixture '{}'", path.display()))?;

            if endpoint.is_paged() {
                client.pages.insert(endpoint, parse_pages(endpoint, value)?);
            } else {
                client.responses.insert(endpoint, value);
            }
            debug!(endpoint = endpoint.as_str(), path = %path.display(), "Loaded fixture");
        }

        Ok(client)
    }

    /// All requests made so far, in order
    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    /// Number of requests made to `endpoint`
    pub async fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    async fn record(&self, endpoint: Endpoint, params: &Params, cursor: Option<&Cursor>) {
        self.calls.lock().await.push(Call {
            endpoint,
            params: params.clone(),
            cursor: cursor.cloned(),
        });
    }

    fn check_failure(&self, endpoint: Endpoint) -> Result<()> {
        match self.failures.get(&endpoint) {
            Some(message) => Err(Error::client(ReplayError::Injected {
                endpoint,
                message: message.clone(),
            })),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApiClient for ReplayClient {
    async fn fetch_one(&self, endpoint: Endpoint, params: &Params) -> Result<JsonValue> {
        self.record(endpoint, params, None).await;
        self.check_failure(endpoint)?;

        self.responses
            .get(&endpoint)
            .cloned()
            .ok_or_else(|| Error::client(ReplayError::MissingFixture { endpoint }))
    }

    async fn fetch_page(
        &self,
        endpoint: Endpoint,
        params: &Params,
        cursor: Option<&Cursor>,
    ) -> Result<Page> {
        self.record(endpoint, params, cursor).await;
        self.check_failure(endpoint)?;

        let pages = self
            .pages
            .get(&endpoint)
            .ok_or_else(|| Error::client(ReplayError::MissingFixture { endpoint }))?;

        let index = match cursor {
            None => 0,
            Some(c) => c
                .as_str()
                .parse::<usize>()
                .ok()
                .filter(|i| *i < pages.len())
                .ok_or_else(|| {
                    Error::client(ReplayError::UnknownCursor {
                        endpoint,
                        cursor: c.to_string(),
                    })
                })?,
        };

        let items = pages.get(index).cloned().unwrap_or_default();
        if index + 1 < pages.len() {
            Ok(Page::with_next(items, (index + 1).to_string()))
        } else {
            Ok(Page::last(items))
        }
    }
}

/// Split a fixture body into pages
fn parse_pages(endpoint: Endpoint, value: JsonValue) -> Result<Vec<Vec<JsonValue>>> {
    let JsonValue::Array(pages) = value else {
        return Err(Error::decode(format!(
            "fixture for '{endpoint}' must be an array of pages"
        )));
    };

    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| match page {
            JsonValue::Array(items) => Ok(items),
            _ => Err(Error::decode(format!(
                "page {i} of '{endpoint}' fixture is not an array"
            ))),
        })
        .collect()
}
