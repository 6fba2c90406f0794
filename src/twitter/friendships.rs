//! Friendship operations

use super::{flatten_item, TwitterTables};
use crate::api::{ApiClient, Endpoint, EndpointPages, Params};
use crate::error::Result;
use crate::flatten::FlattenOptions;
use crate::pagination::collect_rows;
use crate::table::Table;
use crate::types::{FlatRecord, JsonValue, UserRef};
use tracing::info;

impl<C: ApiClient> TwitterTables<C> {
    /// Whether `source` follows `target`
    ///
    /// A relationship without a `following` flag reads as `false`.
    pub async fn exists_friendship(&self, source: &UserRef, target: &UserRef) -> Result<bool> {
        let sides = self.relationship(source, target).await?;
        Ok(sides
            .first()
            .and_then(|s| s.get("following"))
            .and_then(JsonValue::as_bool)
            .unwrap_or(false))
    }

    /// Relationship between two users: a `source` row then a `target` row
    pub async fn show_friendship(&self, source: &UserRef, target: &UserRef) -> Result<Table> {
        let options = FlattenOptions::shallow();
        let rows = self
            .relationship(source, target)
            .await?
            .iter()
            .map(|side| flatten_item(side, &options))
            .collect();
        Ok(Table::from_rows(rows))
    }

    /// IDs of users `user` follows, one `id` column
    pub async fn friends_ids(&self, user: &UserRef, limit: Option<usize>) -> Result<Table> {
        self.ids(Endpoint::FriendsIds, user, limit).await
    }

    /// IDs of users following `user`, one `id` column
    pub async fn followers_ids(&self, user: &UserRef, limit: Option<usize>) -> Result<Table> {
        self.ids(Endpoint::FollowersIds, user, limit).await
    }

    /// `[source, target]` sides of a friendship lookup
    ///
    /// Accepts `{"relationship": {"source": .., "target": ..}}` or a bare
    /// two-element array.
    async fn relationship(&self, source: &UserRef, target: &UserRef) -> Result<Vec<JsonValue>> {
        let params = Params::new().user("source_", source).user("target_", target);
        let response = self.client.fetch_one(Endpoint::ShowFriendship, &params).await?;

        let sides = match response {
            JsonValue::Array(items) => items,
            other => {
                let relationship = other.get("relationship").unwrap_or(&other);
                ["source", "target"]
                    .into_iter()
                    .filter_map(|side| relationship.get(side).cloned())
                    .collect()
            }
        };
        Ok(sides)
    }

    async fn ids(&self, endpoint: Endpoint, user: &UserRef, limit: Option<usize>) -> Result<Table> {
        let source = EndpointPages::new(&self.client, endpoint, Params::new().user("", user));
        let options = self.flatten;
        let rows = collect_rows(&source, limit, |item| match item {
            JsonValue::Object(_) => flatten_item(&item, &options),
            id => {
                let mut row = FlatRecord::new();
                row.insert("id".to_string(), id);
                row
            }
        })
        .await?;
        info!(endpoint = endpoint.as_str(), rows = rows.len(), "Collected rows");
        Ok(Table::from_rows(rows))
    }
}
