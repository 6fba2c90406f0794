//! CLI commands and argument parsing

use crate::types::{StatusWindow, UserRef};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Flatten Twitter API objects into tables
#[derive(Parser, Debug)]
#[command(name = "twitter-tables")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (stdout when omitted; required for parquet)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten records read from a JSON or JSON Lines file
    Flatten {
        /// Input file
        input: PathBuf,

        /// Nesting levels to merge (overrides settings)
        #[arg(long)]
        layers: Option<usize>,

        /// Keep values still nested after the last layer
        #[arg(long)]
        keep_deeper: bool,

        /// Dotted path to the record array inside the document
        #[arg(long)]
        record_path: Option<String>,

        /// Treat the input as JSON Lines regardless of extension
        #[arg(long)]
        jsonl: bool,
    },

    /// Run an endpoint operation against recorded responses
    Query {
        /// Operation name (see `operations`)
        operation: Operation,

        /// Fixture directory (overrides settings)
        #[arg(long)]
        fixtures: Option<PathBuf>,

        #[command(flatten)]
        selectors: Selectors,
    },

    /// List operation names
    Operations,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one row per line)
    Json,
    /// Human-readable output
    Pretty,
    /// Parquet file
    Parquet,
}

/// Endpoint operations reachable from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum Operation {
    RateLimitStatus,
    Me,
    ApiId,
    ApiScreenName,
    CredentialsValid,
    Describe,
    TrendsAvailable,
    TrendsPlace,
    TrendsClosest,
    Followers,
    SearchUsers,
    GetUser,
    HomeTimeline,
    UserTimeline,
    RetweetsOfMe,
    StatusesLookup,
    GetStatus,
    Retweets,
    Favorites,
    SavedSearches,
    GetSavedSearch,
    DirectMessages,
    SentDirectMessages,
    GetDirectMessage,
    ExistsFriendship,
    ShowFriendship,
    FriendsIds,
    FollowersIds,
    ListTimeline,
    GetList,
    ListMembers,
    ListSubscribers,
}

impl Operation {
    /// Name as typed on the command line
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

/// Selectors forwarded to the operation
#[derive(Args, Debug, Clone, Default)]
pub struct Selectors {
    /// User ID or screen name; numeric object ID for status, search, message calls
    #[arg(long)]
    pub id: Option<String>,

    /// Numeric user ID
    #[arg(long)]
    pub user_id: Option<String>,

    /// User screen name
    #[arg(long)]
    pub screen_name: Option<String>,

    /// Second user of a friendship lookup, by ID
    #[arg(long)]
    pub target_id: Option<String>,

    /// Second user of a friendship lookup, by screen name
    #[arg(long)]
    pub target_screen_name: Option<String>,

    /// Comma-separated status IDs for `statuses_lookup`
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<u64>,

    /// Search query
    #[arg(long)]
    pub query: Option<String>,

    /// List owner screen name
    #[arg(long)]
    pub owner: Option<String>,

    /// List slug
    #[arg(long)]
    pub slug: Option<String>,

    #[arg(long)]
    pub since_id: Option<u64>,

    #[arg(long)]
    pub max_id: Option<u64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub long: Option<f64>,

    /// `exclude` filter for `trends_place`
    #[arg(long)]
    pub exclude: Option<String>,

    /// `count` request parameter
    #[arg(long)]
    pub count: Option<u32>,

    /// Maximum rows returned
    #[arg(long)]
    pub limit: Option<usize>,

    /// Page number for direct message listings
    #[arg(long)]
    pub page: Option<u32>,

    /// Ask for untruncated direct message text
    #[arg(long)]
    pub full_text: bool,

    /// Add sender and recipient columns to direct messages
    #[arg(long)]
    pub include_user_data: bool,
}

impl Selectors {
    /// Primary user: `--id`, then `--user-id`, then `--screen-name`
    pub fn user(&self) -> UserRef {
        if let Some(id) = &self.id {
            UserRef::id(id)
        } else if let Some(id) = &self.user_id {
            UserRef::user_id(id)
        } else if let Some(name) = &self.screen_name {
            UserRef::screen_name(name)
        } else {
            UserRef::Me
        }
    }

    /// Target user of a friendship lookup
    pub fn target(&self) -> UserRef {
        if let Some(id) = &self.target_id {
            UserRef::id(id)
        } else if let Some(name) = &self.target_screen_name {
            UserRef::screen_name(name)
        } else {
            UserRef::Me
        }
    }

    pub fn window(&self) -> StatusWindow {
        StatusWindow {
            since_id: self.since_id,
            max_id: self.max_id,
        }
    }
}
