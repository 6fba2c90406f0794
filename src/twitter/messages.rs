//! Direct message operations
//!
//! Messages are reduced to a fixed set of columns. Of each entity list only
//! the last element is kept, hoisted into `<list>_<field>` columns.

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::flatten::{prefix_keys, FlattenOptions};
use crate::table::Table;
use crate::types::{FlatRecord, JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Selection for direct message listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessageQuery {
    pub since_id: Option<u64>,
    pub max_id: Option<u64>,
    pub count: Option<u32>,
    pub page: Option<u32>,
    /// Ask the API for untruncated text
    pub full_text: bool,
    /// Add `sender_` and `recipient_` columns
    pub include_user_data: bool,
}

impl Default for DirectMessageQuery {
    fn default() -> Self {
        Self {
            since_id: None,
            max_id: None,
            count: Some(1),
            page: Some(1),
            full_text: false,
            include_user_data: false,
        }
    }
}

impl DirectMessageQuery {
    fn params(&self) -> Params {
        Params::new()
            .set_opt("since_id", self.since_id)
            .set_opt("max_id", self.max_id)
            .set_opt("count", self.count)
            .set_opt("page", self.page)
            .set("full_text", self.full_text)
    }
}

/// (entity list, fields hoisted from its last element)
const HOISTED: [(&str, &[&str]); 3] = [
    ("entities.urls", &["url"]),
    ("entities.user_mentions", &["id_str", "name", "screen_name"]),
    ("entities.hashtags", &["text"]),
];

impl<C: ApiClient> TwitterTables<C> {
    /// Direct messages received by the authenticated user
    pub async fn direct_messages(&self, query: &DirectMessageQuery) -> Result<Table> {
        self.messages(Endpoint::DirectMessages, query).await
    }

    /// Direct messages sent by the authenticated user
    pub async fn sent_direct_messages(&self, query: &DirectMessageQuery) -> Result<Table> {
        self.messages(Endpoint::SentDirectMessages, query).await
    }

    /// A single direct message
    pub async fn get_direct_message(&self, id: u64, include_user_data: bool) -> Result<Table> {
        let params = Params::new().set("id", id);
        let response = self
            .client
            .fetch_one(Endpoint::GetDirectMessage, &params)
            .await?;
        let rows = response
            .as_object()
            .map(|msg| message_row(msg, include_user_data))
            .into_iter()
            .collect();
        Ok(Table::from_rows(rows))
    }

    async fn messages(&self, endpoint: Endpoint, query: &DirectMessageQuery) -> Result<Table> {
        let response = self.client.fetch_one(endpoint, &query.params()).await?;
        let rows = response
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(JsonValue::as_object)
            .map(|msg| message_row(msg, query.include_user_data))
            .collect();
        Ok(Table::from_rows(rows))
    }
}

/// Reduce one message to its row
pub(super) fn message_row(message: &JsonObject, include_user_data: bool) -> FlatRecord {
    let flat = FlattenOptions::shallow().apply(message);
    let mut row = FlatRecord::new();

    for key in ["created_at", "id", "id_str"] {
        row.insert(key.to_string(), flat.get(key).cloned().unwrap_or(JsonValue::Null));
    }

    for (list, fields) in HOISTED {
        let last = flat
            .get(list)
            .and_then(JsonValue::as_array)
            .and_then(|items| items.last());
        if let Some(last) = last {
            for field in fields {
                let value = last.get(field).cloned().unwrap_or(JsonValue::Null);
                row.insert(format!("{list}_{field}"), value);
            }
        }
    }

    let text = message
        .get("text")
        .or_else(|| message.get("full_text"))
        .and_then(JsonValue::as_str)
        .map_or(JsonValue::Null, |t| JsonValue::String(replace_non_bmp(t)));
    row.insert("full_text".to_string(), text);

    if !include_user_data {
        return row;
    }

    let mut merged = party_columns(message, "sender");
    merged.extend(party_columns(message, "recipient"));
    merged.extend(row);
    merged
}

/// Shallow flatten of the `sender` / `recipient` object, keys prefixed
fn party_columns(message: &JsonObject, party: &str) -> FlatRecord {
    message
        .get(party)
        .and_then(JsonValue::as_object)
        .map(|user| prefix_keys(FlattenOptions::shallow().apply(user), &format!("{party}_")))
        .unwrap_or_default()
}

/// Replace characters outside the Basic Multilingual Plane with U+FFFD
pub(super) fn replace_non_bmp(text: &str) -> String {
    text.chars()
        .map(|c| if u32::from(c) > 0xFFFF { char::REPLACEMENT_CHARACTER } else { c })
        .collect()
}
