//! Endpoint operations
//!
//! [`TwitterTables`] wraps an injected [`ApiClient`] and turns each API
//! resource into a [`Table`]. Every operation follows the same shape:
//! fetch (single-shot or paged), flatten each returned object, truncate
//! to the optional limit, assemble the table.
//!
//! Operations are grouped by resource:
//!
//! | Group            | Operations                                                       |
//! |------------------|------------------------------------------------------------------|
//! | account          | `rate_limit_status`, `me`, `api_id`, `api_screen_name`, ...      |
//! | trends           | `trends_available`, `trends_place`, `trends_closest`             |
//! | users            | `followers`, `search_users`, `get_user`                          |
//! | timelines        | `home_timeline`, `user_timeline`, `retweets_of_me`, `favorites`  |
//! | statuses         | `statuses_lookup`, `get_status`, `retweets`                      |
//! | saved searches   | `saved_searches`, `get_saved_search`                             |
//! | direct messages  | `direct_messages`, `sent_direct_messages`, `get_direct_message`  |
//! | friendships      | `exists_friendship`, `show_friendship`, `friends_ids`, ...       |
//! | lists            | `list_timeline`, `get_list`, `list_members`, `list_subscribers`  |

mod account;
mod friendships;
mod lists;
mod messages;
mod saved_searches;
mod timelines;
mod trends;
mod users;

pub use messages::DirectMessageQuery;
pub use saved_searches::SAVED_SEARCH_FIELDS;

use crate::api::{ApiClient, Endpoint, EndpointPages, Params};
use crate::config::{Settings, DEFAULT_SEARCH_LIMIT_CAP};
use crate::error::Result;
use crate::flatten::FlattenOptions;
use crate::pagination::{apply_limit, collect_rows};
use crate::table::Table;
use crate::types::{FlatRecord, JsonValue};
use tracing::info;

/// Table-producing client over an injected [`ApiClient`]
#[derive(Debug, Clone)]
pub struct TwitterTables<C> {
    client: C,
    flatten: FlattenOptions,
    search_limit_cap: usize,
}

impl<C: ApiClient> TwitterTables<C> {
    /// Wrap an authenticated client with default settings
    pub fn new(client: C) -> Self {
        Self {
            client,
            flatten: FlattenOptions::full(),
            search_limit_cap: DEFAULT_SEARCH_LIMIT_CAP,
        }
    }

    /// Wrap a client using loaded settings
    pub fn with_settings(client: C, settings: &Settings) -> Self {
        Self {
            client,
            flatten: settings.flatten,
            search_limit_cap: settings.search_limit_cap,
        }
    }

    /// Override flattening for full API objects
    #[must_use]
    pub fn with_flatten(mut self, options: FlattenOptions) -> Self {
        self.flatten = options;
        self
    }

    /// The wrapped client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Flattening applied to full API objects
    pub fn flatten_options(&self) -> FlattenOptions {
        self.flatten
    }

    /// Walk a paged endpoint, flattening each item, up to `limit` rows
    async fn paged(&self, endpoint: Endpoint, params: Params, limit: Option<usize>) -> Result<Table> {
        let source = EndpointPages::new(&self.client, endpoint, params);
        let options = self.flatten;
        let rows = collect_rows(&source, limit, |item| flatten_item(&item, &options)).await?;
        info!(endpoint = endpoint.as_str(), rows = rows.len(), "Collected rows");
        Ok(Table::from_rows(rows))
    }

    /// Single-shot call; an array response yields one row per element
    async fn fetched(
        &self,
        endpoint: Endpoint,
        params: Params,
        options: FlattenOptions,
        limit: Option<usize>,
    ) -> Result<Table> {
        let response = self.client.fetch_one(endpoint, &params).await?;
        let rows = apply_limit(flatten_response(&response, &options), limit);
        info!(endpoint = endpoint.as_str(), rows = rows.len(), "Collected rows");
        Ok(Table::from_rows(rows))
    }
}

/// Flatten one item; a non-object item becomes a single `value` column
fn flatten_item(item: &JsonValue, options: &FlattenOptions) -> FlatRecord {
    match item {
        JsonValue::Object(obj) => options.apply(obj),
        other => {
            let mut row = FlatRecord::new();
            row.insert("value".to_string(), other.clone());
            row
        }
    }
}

/// Rows for a single-shot response
fn flatten_response(response: &JsonValue, options: &FlattenOptions) -> Vec<FlatRecord> {
    match response {
        JsonValue::Array(items) => items.iter().map(|i| flatten_item(i, options)).collect(),
        JsonValue::Null => Vec::new(),
        other => vec![flatten_item(other, options)],
    }
}
