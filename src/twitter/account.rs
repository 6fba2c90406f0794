//! Account operations: rate limits, the authenticated user, credentials

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::table::Table;
use crate::types::{FlatRecord, JsonObject, JsonValue};
use chrono::{DateTime, SecondsFormat};

impl<C: ApiClient> TwitterTables<C> {
    /// One row per rate-limited resource path
    ///
    /// Columns: `resource`, `endpoint`, `limit`, `remaining`, `reset`. `reset` is the
    /// RFC 3339 UTC time the window resets.
    pub async fn rate_limit_status(&self) -> Result<Table> {
        let response = self
            .client
            .fetch_one(Endpoint::RateLimitStatus, &Params::new())
            .await?;

        let mut rows = Vec::new();
        let families = response.get("resources").and_then(JsonValue::as_object);
        for (resource, family) in families.into_iter().flat_map(JsonObject::iter) {
            let Some(family) = family.as_object() else {
                continue;
            };
            for (path, status) in family {
                rows.push(rate_limit_row(resource, path, status));
            }
        }
        Ok(Table::from_rows(rows))
    }

    /// The authenticated user, fully flattened
    pub async fn me(&self) -> Result<Table> {
        self.fetched(Endpoint::Me, Params::new(), self.flatten, None)
            .await
    }

    /// ID of the authenticated user
    pub async fn api_id(&self) -> Result<Option<u64>> {
        let me = self.me().await?;
        Ok(me.get(0, "id").and_then(JsonValue::as_u64))
    }

    /// Screen name of the authenticated user
    pub async fn api_screen_name(&self) -> Result<Option<String>> {
        let me = self.me().await?;
        Ok(me
            .get(0, "screen_name")
            .and_then(JsonValue::as_str)
            .map(str::to_string))
    }

    /// Whether the client's credentials verify
    ///
    /// A `null` or `false` answer means invalid; transport failures
    /// propagate as errors.
    pub async fn credentials_valid(&self) -> Result<bool> {
        let response = self
            .client
            .fetch_one(Endpoint::VerifyCredentials, &Params::new())
            .await?;
        Ok(!matches!(response, JsonValue::Null | JsonValue::Bool(false)))
    }

    /// Human readable identification of the client
    pub async fn describe(&self) -> Result<String> {
        let name = self.api_screen_name().await?;
        Ok(format!(
            "TwitterTables client for u={}",
            name.as_deref().unwrap_or("unknown")
        ))
    }
}

fn rate_limit_row(resource: &str, path: &str, status: &JsonValue) -> FlatRecord {
    let field = |name: &str| status.get(name).cloned().unwrap_or(JsonValue::Null);
    let reset = status
        .get("reset")
        .and_then(JsonValue::as_i64)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map_or(JsonValue::Null, |at| {
            JsonValue::String(at.to_rfc3339_opts(SecondsFormat::Secs, true))
        });

    let mut row = FlatRecord::new();
    row.insert("endpoint".to_string(), JsonValue::String(path.to_string()));
    row.insert("limit".to_string(), field("limit"));
    row.insert("remaining".to_string(), field("remaining"));
    row.insert("reset".to_string(), reset);
    row.insert("resource".to_string(), JsonValue::String(resource.to_string()));
    row
}
