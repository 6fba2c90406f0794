//! List operations

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::table::Table;
use crate::types::StatusWindow;

fn list_params(owner: &str, slug: &str) -> Params {
    Params::new()
        .set("owner_screen_name", owner)
        .set("slug", slug)
}

impl<C: ApiClient> TwitterTables<C> {
    /// Statuses from members of a list
    pub async fn list_timeline(
        &self,
        owner: &str,
        slug: &str,
        window: StatusWindow,
        limit: Option<usize>,
    ) -> Result<Table> {
        let params = list_params(owner, slug)
            .set_opt("since_id", window.since_id)
            .set_opt("max_id", window.max_id);
        self.fetched(Endpoint::ListTimeline, params, self.flatten, limit)
            .await
    }

    /// A single list
    pub async fn get_list(&self, owner: &str, slug: &str) -> Result<Table> {
        self.fetched(Endpoint::GetList, list_params(owner, slug), self.flatten, None)
            .await
    }

    /// Members of a list
    pub async fn list_members(&self, owner: &str, slug: &str, limit: Option<usize>) -> Result<Table> {
        self.paged(Endpoint::ListMembers, list_params(owner, slug), limit)
            .await
    }

    /// Subscribers of a list
    pub async fn list_subscribers(
        &self,
        owner: &str,
        slug: &str,
        limit: Option<usize>,
    ) -> Result<Table> {
        self.paged(Endpoint::ListSubscribers, list_params(owner, slug), limit)
            .await
    }
}
