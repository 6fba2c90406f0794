//! User operations

use super::TwitterTables;
use crate::api::{ApiClient, Endpoint, Params};
use crate::error::Result;
use crate::pagination::warn_if_over_cap;
use crate::table::Table;
use crate::types::UserRef;

impl<C: ApiClient> TwitterTables<C> {
    /// Followers of `user`, up to `limit` rows
    pub async fn followers(&self, user: &UserRef, limit: Option<usize>) -> Result<Table> {
        let params = Params::new().user("", user);
        self.paged(Endpoint::Followers, params, limit).await
    }

    /// Users matching `query`, up to `limit` rows
    ///
    /// The search endpoint serves at most `search_limit_cap` results; a
    /// larger limit logs a warning and the request proceeds anyway.
    pub async fn search_users(&self, query: &str, limit: Option<usize>) -> Result<Table> {
        warn_if_over_cap("search_users", limit, self.search_limit_cap);
        let params = Params::new().set("q", query);
        self.paged(Endpoint::SearchUsers, params, limit).await
    }

    /// A single user, fully flattened
    pub async fn get_user(&self, user: &UserRef) -> Result<Table> {
        let params = Params::new().user("", user);
        self.fetched(Endpoint::GetUser, params, self.flatten, None)
            .await
    }
}
