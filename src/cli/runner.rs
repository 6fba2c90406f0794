//! CLI runner - executes commands

use crate::api::{ApiClient, ReplayClient};
use crate::cli::commands::{Cli, Commands, Operation, OutputFormat, Selectors};
use crate::config::Settings;
use crate::decode::{decoder_for, DecoderFormat};
use crate::error::{Error, Result};
use crate::table::Table;
use crate::twitter::{DirectMessageQuery, TwitterTables};
use crate::types::{FlatRecord, JsonValue};
use clap::ValueEnum;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    settings: Settings,
}

impl Runner {
    /// Create a runner, loading the settings file when one is given
    pub fn new(cli: Cli) -> Result<Self> {
        let settings = match &cli.settings {
            Some(path) => Settings::from_file(path)?,
            None => Settings::default(),
        };
        Ok(Self { cli, settings })
    }

    /// Effective log level: debug with `--verbose`, else the configured level
    pub fn log_level(&self) -> tracing::Level {
        if self.cli.verbose {
            tracing::Level::DEBUG
        } else {
            self.settings.log_level.into()
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let table = match &self.cli.command {
            Commands::Flatten {
                input,
                layers,
                keep_deeper,
                record_path,
                jsonl,
            } => self.flatten(input, *layers, *keep_deeper, record_path.as_deref(), *jsonl)?,
            Commands::Query {
                operation,
                fixtures,
                selectors,
            } => {
                self.query(*operation, fixtures.as_deref(), selectors)
                    .await?
            }
            Commands::Operations => Self::operations(),
        };
        self.emit(&table)
    }

    /// Decode a file and flatten each record
    fn flatten(
        &self,
        input: &Path,
        layers: Option<usize>,
        keep_deeper: bool,
        record_path: Option<&str>,
        jsonl: bool,
    ) -> Result<Table> {
        let body = fs::read_to_string(input).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: input.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let format = if jsonl {
            DecoderFormat::Jsonl
        } else {
            DecoderFormat::from_path(input)
        };
        let records = decoder_for(format, record_path).decode(&body)?;

        let mut options = self.settings.flatten;
        if let Some(layers) = layers {
            options.layers = layers;
        }
        if keep_deeper {
            options.drop_deeper = false;
        }
        debug!(records = records.len(), ?options, "Flattening records");

        let rows: Vec<FlatRecord> = records
            .iter()
            .filter_map(JsonValue::as_object)
            .map(|record| options.apply(record))
            .collect();
        Ok(Table::from_rows(rows))
    }

    /// Run an operation against the replay client
    async fn query(
        &self,
        operation: Operation,
        fixtures: Option<&Path>,
        selectors: &Selectors,
    ) -> Result<Table> {
        let dir = fixtures
            .or(self.settings.fixtures.as_deref())
            .ok_or_else(|| {
                Error::config("No fixture directory (use --fixtures or set `fixtures` in settings)")
            })?;

        let client = ReplayClient::from_dir(dir)?;
        let tables = TwitterTables::with_settings(client, &self.settings);
        let table = run_operation(&tables, operation, selectors).await?;
        info!(operation = %operation.name(), rows = table.len(), "Operation complete");
        Ok(table)
    }

    /// One row per operation name
    fn operations() -> Table {
        Operation::value_variants()
            .iter()
            .map(|op| scalar_row("operation", JsonValue::String(op.name())))
            .collect()
    }

    /// Write a table in the selected format
    fn emit(&self, table: &Table) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Parquet => {
                let path = self
                    .cli
                    .output
                    .as_ref()
                    .ok_or_else(|| Error::config("Parquet format requires --output file"))?;
                let rows = table.write_parquet(path, Some(&self.settings.parquet_config()))?;
                info!(rows, path = %path.display(), "Wrote Parquet file");
                return Ok(());
            }
            OutputFormat::Json => table.to_json_lines()?,
            OutputFormat::Pretty => {
                let mut text = serde_json::to_string_pretty(table.rows())?;
                text.push('\n');
                text
            }
        };

        match &self.cli.output {
            Some(path) => fs::write(path, text)?,
            None => std::io::stdout().lock().write_all(text.as_bytes())?,
        }
        Ok(())
    }
}

/// Dispatch `operation` with the given selectors
///
/// Operations answering a single value produce a one-row table whose
/// column is the operation name.
pub async fn run_operation<C: ApiClient>(
    tables: &TwitterTables<C>,
    operation: Operation,
    sel: &Selectors,
) -> Result<Table> {
    let limit = sel.limit;
    let table = match operation {
        Operation::RateLimitStatus => tables.rate_limit_status().await?,
        Operation::Me => tables.me().await?,
        Operation::ApiId => {
            let id = tables.api_id().await?;
            Table::from_rows(vec![scalar_row("api_id", id.into())])
        }
        Operation::ApiScreenName => {
            let name = tables.api_screen_name().await?;
            Table::from_rows(vec![scalar_row("api_screen_name", name.into())])
        }
        Operation::CredentialsValid => {
            let valid = tables.credentials_valid().await?;
            Table::from_rows(vec![scalar_row("credentials_valid", valid.into())])
        }
        Operation::Describe => {
            let text = tables.describe().await?;
            Table::from_rows(vec![scalar_row("describe", text.into())])
        }
        Operation::TrendsAvailable => tables.trends_available().await?,
        Operation::TrendsPlace => {
            let woeid = numeric_id(sel)?;
            tables.trends_place(woeid, sel.exclude.as_deref()).await?
        }
        Operation::TrendsClosest => tables.trends_closest(sel.lat, sel.long).await?,
        Operation::Followers => tables.followers(&sel.user(), limit).await?,
        Operation::SearchUsers => {
            let query = sel
                .query
                .as_deref()
                .ok_or_else(|| Error::config("search_users requires --query"))?;
            tables.search_users(query, limit).await?
        }
        Operation::GetUser => tables.get_user(&sel.user()).await?,
        Operation::HomeTimeline => tables.home_timeline(sel.window(), limit).await?,
        Operation::UserTimeline => {
            tables
                .user_timeline(&sel.user(), sel.window(), limit)
                .await?
        }
        Operation::RetweetsOfMe => tables.retweets_of_me(sel.window(), limit).await?,
        Operation::StatusesLookup => {
            tables
                .statuses_lookup(&sel.ids, None, None, limit)
                .await?
        }
        Operation::GetStatus => tables.get_status(numeric_id(sel)?).await?,
        Operation::Retweets => tables.retweets(numeric_id(sel)?, sel.count).await?,
        Operation::Favorites => tables.favorites(&sel.user(), limit).await?,
        Operation::SavedSearches => tables.saved_searches().await?,
        Operation::GetSavedSearch => tables.get_saved_search(numeric_id(sel)?).await?,
        Operation::DirectMessages => tables.direct_messages(&message_query(sel)).await?,
        Operation::SentDirectMessages => {
            tables
                .sent_direct_messages(&message_query(sel))
                .await?
        }
        Operation::GetDirectMessage => {
            tables
                .get_direct_message(numeric_id(sel)?, sel.include_user_data)
                .await?
        }
        Operation::ExistsFriendship => {
            let exists = tables.exists_friendship(&sel.user(), &sel.target()).await?;
            Table::from_rows(vec![scalar_row("exists_friendship", exists.into())])
        }
        Operation::ShowFriendship => tables.show_friendship(&sel.user(), &sel.target()).await?,
        Operation::FriendsIds => tables.friends_ids(&sel.user(), limit).await?,
        Operation::FollowersIds => tables.followers_ids(&sel.user(), limit).await?,
        Operation::ListTimeline => {
            let (owner, slug) = list_selector(sel)?;
            tables
                .list_timeline(owner, slug, sel.window(), limit)
                .await?
        }
        Operation::GetList => {
            let (owner, slug) = list_selector(sel)?;
            tables.get_list(owner, slug).await?
        }
        Operation::ListMembers => {
            let (owner, slug) = list_selector(sel)?;
            tables.list_members(owner, slug, limit).await?
        }
        Operation::ListSubscribers => {
            let (owner, slug) = list_selector(sel)?;
            tables.list_subscribers(owner, slug, limit).await?
        }
    };
    Ok(table)
}

fn scalar_row(column: &str, value: JsonValue) -> FlatRecord {
    let mut row = FlatRecord::new();
    row.insert(column.to_string(), value);
    row
}

/// `--id` as a numeric object ID
fn numeric_id(sel: &Selectors) -> Result<u64> {
    let id = sel
        .id
        .as_deref()
        .ok_or_else(|| Error::config("This operation requires --id"))?;
    id.parse()
        .map_err(|_| Error::invalid_value("id", format!("'{id}' is not a numeric ID")))
}

fn list_selector(sel: &Selectors) -> Result<(&str, &str)> {
    match (sel.owner.as_deref(), sel.slug.as_deref()) {
        (Some(owner), Some(slug)) => Ok((owner, slug)),
        _ => Err(Error::config("List operations require --owner and --slug")),
    }
}

fn message_query(sel: &Selectors) -> DirectMessageQuery {
    let defaults = DirectMessageQuery::default();
    DirectMessageQuery {
        since_id: sel.since_id,
        max_id: sel.max_id,
        count: sel.count.or(defaults.count),
        page: sel.page.or(defaults.page),
        full_text: sel.full_text,
        include_user_data: sel.include_user_data,
    }
}
