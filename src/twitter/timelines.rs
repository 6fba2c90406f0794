//! Timeline, status and favorite operations

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::table::Table;
use crate::types::{StatusWindow, UserRef};

/// Window bounds plus the `count` hint
fn window_params(window: StatusWindow, limit: Option<usize>) -> Params {
    Params::new()
        .set_opt("since_id", window.since_id)
        .set_opt("max_id", window.max_id)
        .set_opt("count", limit)
}

impl<C: ApiClient> TwitterTables<C> {
    /// Statuses from the authenticated user's home timeline
    pub async fn home_timeline(&self, window: StatusWindow, limit: Option<usize>) -> Result<Table> {
        self.paged(Endpoint::HomeTimeline, window_params(window, limit), limit)
            .await
    }

    /// Statuses posted by `user`
    pub async fn user_timeline(
        &self,
        user: &UserRef,
        window: StatusWindow,
        limit: Option<usize>,
    ) -> Result<Table> {
        let params = window_params(window, limit).user("", user);
        self.paged(Endpoint::UserTimeline, params, limit).await
    }

    /// The authenticated user's statuses that others retweeted
    pub async fn retweets_of_me(&self, window: StatusWindow, limit: Option<usize>) -> Result<Table> {
        self.paged(Endpoint::RetweetsOfMe, window_params(window, limit), limit)
            .await
    }

    /// Up to 100 statuses by ID in one request
    pub async fn statuses_lookup(
        &self,
        ids: &[u64],
        include_entities: Option<bool>,
        trim_user: Option<bool>,
        limit: Option<usize>,
    ) -> Result<Table> {
        let ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let params = Params::new()
            .set("id", ids)
            .set_opt("include_entities", include_entities)
            .set_opt("trim_user", trim_user);
        self.fetched(Endpoint::StatusesLookup, params, self.flatten, limit)
            .await
    }

    /// A single status
    pub async fn get_status(&self, id: u64) -> Result<Table> {
        let params = Params::new().set("id", id);
        self.fetched(Endpoint::GetStatus, params, self.flatten, None)
            .await
    }

    /// First retweets of a status
    pub async fn retweets(&self, id: u64, count: Option<u32>) -> Result<Table> {
        let params = Params::new().set("id", id).set_opt("count", count);
        self.fetched(Endpoint::Retweets, params, self.flatten, None)
            .await
    }

    /// Statuses `user` liked
    pub async fn favorites(&self, user: &UserRef, limit: Option<usize>) -> Result<Table> {
        let params = Params::new().user("", user);
        self.paged(Endpoint::Favorites, params, limit).await
    }
}
