// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # twitter-tables
//!
//! Turns Twitter REST API responses into tables.
//!
//! ## Features
//!
//! - **Bounded flattening**: nested objects become dotted columns, up to a
//!   chosen depth; anything deeper is dropped or kept
//! - **Lazy pagination**: cursored endpoints are walked page by page and
//!   stop as soon as the row limit is met
//! - **Tabular output**: Arrow RecordBatch, Parquet, or JSON lines
//! - **Injected client**: any [`ApiClient`] works; [`ReplayClient`] serves
//!   recorded responses offline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use twitter_tables::{ReplayClient, Result, TwitterTables, UserRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ReplayClient::from_dir("fixtures")?;
//!     let tables = TwitterTables::new(client);
//!
//!     let followers = tables
//!         .followers(&UserRef::screen_name("ferris"), Some(100))
//!         .await?;
//!     followers.write_parquet("followers.parquet", None)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 TwitterTables<C: ApiClient>                  │
//! │  followers()  home_timeline()  direct_messages()  ...        │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴───┬──────────────┬─────────────┐
//! │     API      │    Paginate      │   Flatten    │    Table    │
//! ├──────────────┼──────────────────┼──────────────┼─────────────┤
//! │ ApiClient    │ PageSource       │ layers       │ columns     │
//! │ Endpoint     │ Cursor           │ drop_deeper  │ Arrow       │
//! │ ReplayClient │ limit            │ prefix_keys  │ Parquet     │
//! └──────────────┴──────────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Bounded-depth record flattening
pub mod flatten;

/// Cursor pagination and row limits
pub mod pagination;

/// API client abstraction and the replay client
pub mod api;

/// Tabular results with Arrow/Parquet output
pub mod table;

/// Input decoders (JSON, JSONL)
pub mod decode;

/// Settings
pub mod config;

/// Endpoint operations
pub mod twitter;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use api::{ApiClient, Endpoint, Params, ReplayClient};
pub use config::Settings;
pub use error::{Error, Result};
pub use flatten::{flatten, FlattenOptions};
pub use table::Table;
pub use twitter::{DirectMessageQuery, TwitterTables};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
