//! Endpoint and parameter types

use crate::error::{Error, Result};
use crate::types::UserRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Endpoint
// ============================================================================

/// API resources this crate knows how to reshape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    // Account
    RateLimitStatus,
    VerifyCredentials,
    Me,
    // Trends
    TrendsAvailable,
    TrendsPlace,
    TrendsClosest,
    // Users
    Followers,
    SearchUsers,
    GetUser,
    // Timelines
    HomeTimeline,
    UserTimeline,
    RetweetsOfMe,
    StatusesLookup,
    // Favorites
    Favorites,
    // Saved searches
    SavedSearches,
    GetSavedSearch,
    // Direct messages
    DirectMessages,
    SentDirectMessages,
    GetDirectMessage,
    // Friendships
    ShowFriendship,
    FriendsIds,
    FollowersIds,
    // Lists
    ListTimeline,
    GetList,
    ListMembers,
    ListSubscribers,
    // Statuses
    GetStatus,
    Retweets,
}

impl Endpoint {
    /// Every endpoint, in declaration order
    pub const ALL: [Endpoint; 28] = [
        Endpoint::RateLimitStatus,
        Endpoint::VerifyCredentials,
        Endpoint::Me,
        Endpoint::TrendsAvailable,
        Endpoint::TrendsPlace,
        Endpoint::TrendsClosest,
        Endpoint::Followers,
        Endpoint::SearchUsers,
        Endpoint::GetUser,
        Endpoint::HomeTimeline,
        Endpoint::UserTimeline,
        Endpoint::RetweetsOfMe,
        Endpoint::StatusesLookup,
        Endpoint::Favorites,
        Endpoint::SavedSearches,
        Endpoint::GetSavedSearch,
        Endpoint::DirectMessages,
        Endpoint::SentDirectMessages,
        Endpoint::GetDirectMessage,
        Endpoint::ShowFriendship,
        Endpoint::FriendsIds,
        Endpoint::FollowersIds,
        Endpoint::ListTimeline,
        Endpoint::GetList,
        Endpoint::ListMembers,
        Endpoint::ListSubscribers,
        Endpoint::GetStatus,
        Endpoint::Retweets,
    ];

    /// Snake-case name, also used as the fixture file stem
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::RateLimitStatus => "rate_limit_status",
            Endpoint::VerifyCredentials => "verify_credentials",
            Endpoint::Me => "me",
            Endpoint::TrendsAvailable => "trends_available",
            Endpoint::TrendsPlace => "trends_place",
            Endpoint::TrendsClosest => "trends_closest",
            Endpoint::Followers => "followers",
            Endpoint::SearchUsers => "search_users",
            Endpoint::GetUser => "get_user",
            Endpoint::HomeTimeline => "home_timeline",
            Endpoint::UserTimeline => "user_timeline",
            Endpoint::RetweetsOfMe => "retweets_of_me",
            Endpoint::StatusesLookup => "statuses_lookup",
            Endpoint::Favorites => "favorites",
            Endpoint::SavedSearches => "saved_searches",
            Endpoint::GetSavedSearch => "get_saved_search",
            Endpoint::DirectMessages => "direct_messages",
            Endpoint::SentDirectMessages => "sent_direct_messages",
            Endpoint::GetDirectMessage => "get_direct_message",
            Endpoint::ShowFriendship => "show_friendship",
            Endpoint::FriendsIds => "friends_ids",
            Endpoint::FollowersIds => "followers_ids",
            Endpoint::ListTimeline => "list_timeline",
            Endpoint::GetList => "get_list",
            Endpoint::ListMembers => "list_members",
            Endpoint::ListSubscribers => "list_subscribers",
            Endpoint::GetStatus => "get_status",
            Endpoint::Retweets => "retweets",
        }
    }

    /// Whether the endpoint is read through `fetch_page`
    pub fn is_paged(&self) -> bool {
        matches!(
            self,
            Endpoint::Followers
                | Endpoint::SearchUsers
                | Endpoint::HomeTimeline
                | Endpoint::UserTimeline
                | Endpoint::RetweetsOfMe
                | Endpoint::Favorites
                | Endpoint::FriendsIds
                | Endpoint::FollowersIds
                | Endpoint::ListMembers
                | Endpoint::ListSubscribers
        )
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Endpoint::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| Error::invalid_value("endpoint", format!("unknown endpoint '{s}'")))
    }
}

// ============================================================================
// Params
// ============================================================================

/// Selector parameters passed through to the client unvalidated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    /// Empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Set a parameter when a value is present
    #[must_use]
    pub fn set_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Set the user selector, with an optional key prefix
    #[must_use]
    pub fn user(self, prefix: &str, user: &UserRef) -> Self {
        match user.param(prefix) {
            Some((key, value)) => self.set(key, value),
            None => self,
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Check if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
