//! Trend operations

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::table::Table;
use crate::types::{FlatRecord, JsonValue};

impl<C: ApiClient> TwitterTables<C> {
    /// Locations with trending topic information
    pub async fn trends_available(&self) -> Result<Table> {
        self.fetched(Endpoint::TrendsAvailable, Params::new(), self.flatten, None)
            .await
    }

    /// Trending topics for a WOEID, one row per topic
    ///
    /// `exclude = Some("hashtags")` drops hashtags from the list.
    pub async fn trends_place(&self, woeid: u64, exclude: Option<&str>) -> Result<Table> {
        let params = Params::new().set("id", woeid).set_opt("exclude", exclude);
        let response = self.client.fetch_one(Endpoint::TrendsPlace, &params).await?;

        let rows = response
            .as_array()
            .into_iter()
            .flatten()
            .flat_map(topic_rows)
            .collect();
        Ok(Table::from_rows(rows))
    }

    /// Locations closest to a coordinate pair, nearest first
    pub async fn trends_closest(&self, lat: Option<f64>, long: Option<f64>) -> Result<Table> {
        let params = Params::new().set_opt("lat", lat).set_opt("long", long);
        self.fetched(Endpoint::TrendsClosest, params, self.flatten, None)
            .await
    }
}

/// Rows for one trend block; block metadata is repeated on every topic
fn topic_rows(block: &JsonValue) -> Vec<FlatRecord> {
    let field = |v: &JsonValue, name: &str| v.get(name).cloned().unwrap_or(JsonValue::Null);
    let location = block
        .get("locations")
        .and_then(JsonValue::as_array)
        .and_then(|l| l.first())
        .cloned()
        .unwrap_or(JsonValue::Null);

    let topics = block.get("trends").and_then(JsonValue::as_array);
    topics
        .into_iter()
        .flatten()
        .map(|topic| {
            let mut row = FlatRecord::new();
            row.insert("as_of".to_string(), field(block, "as_of"));
            row.insert("created_at".to_string(), field(block, "created_at"));
            row.insert("woeid".to_string(), field(&location, "woeid"));
            row.insert("location_name".to_string(), field(&location, "name"));
            for key in ["name", "promoted_content", "query", "tweet_volume", "url"] {
                row.insert(key.to_string(), field(topic, key));
            }
            row
        })
        .collect()
}
