//! Saved search operations

use super::{flatten_response, TwitterTables};
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::flatten::FlattenOptions;
use crate::table::Table;
use crate::types::JsonValue;

/// Fields kept from a saved search
pub const SAVED_SEARCH_FIELDS: [&str; 6] = ["created_at", "id", "id_str", "name", "position", "query"];

impl<C: ApiClient> TwitterTables<C> {
    /// Saved searches of the authenticated user
    pub async fn saved_searches(&self) -> Result<Table> {
        let response = self
            .client
            .fetch_one(Endpoint::SavedSearches, &Params::new())
            .await?;
        Ok(Table::from_rows(flatten_response(
            &select_fields(response),
            &self.flatten,
        )))
    }

    /// One saved search
    pub async fn get_saved_search(&self, id: u64) -> Result<Table> {
        let params = Params::new().set("id", id);
        let response = self.client.fetch_one(Endpoint::GetSavedSearch, &params).await?;
        Ok(Table::from_rows(flatten_response(
            &select_fields(response),
            &FlattenOptions::shallow(),
        )))
    }
}

/// Restrict every object in the response to [`SAVED_SEARCH_FIELDS`]
fn select_fields(response: JsonValue) -> JsonValue {
    match response {
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(select_fields).collect()),
        JsonValue::Object(mut obj) => {
            obj.retain(|key, _| SAVED_SEARCH_FIELDS.contains(&key.as_str()));
            JsonValue::Object(obj)
        }
        other => other,
    }
}
