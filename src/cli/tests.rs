//! Tests for the CLI

use super::*;
use crate::api::{Endpoint, ReplayClient};
use crate::twitter::TwitterTables;
use crate::types::UserRef;
use clap::Parser;
use serde_json::json;
use tempfile::tempdir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("twitter-tables").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_parse_query() {
    let cli = parse(&[
        "query",
        "user_timeline",
        "--screen-name",
        "ferris",
        "--since-id",
        "5",
        "--limit",
        "10",
        "--format",
        "pretty",
    ]);
    assert_eq!(cli.format, OutputFormat::Pretty);
    let Commands::Query {
        operation,
        selectors,
        ..
    } = cli.command
    else {
        panic!("expected query");
    };
    assert_eq!(operation, Operation::UserTimeline);
    assert_eq!(selectors.user(), UserRef::screen_name("ferris"));
    assert_eq!(selectors.window().since_id, Some(5));
    assert_eq!(selectors.limit, Some(10));
}

#[test]
fn test_parse_rejects_unknown_operation() {
    let args = ["twitter-tables", "query", "post_tweet"];
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn test_operation_names_are_snake_case() {
    assert_eq!(Operation::RateLimitStatus.name(), "rate_limit_status");
    assert_eq!(Operation::Me.name(), "me");
}

#[test]
fn test_selector_precedence() {
    let sel = Selectors {
        user_id: Some("7".to_string()),
        screen_name: Some("ferris".to_string()),
        ..Selectors::default()
    };
    assert_eq!(sel.user(), UserRef::user_id(7));
    assert_eq!(Selectors::default().user(), UserRef::Me);
    assert_eq!(Selectors::default().target(), UserRef::Me);
}

#[tokio::test]
async fn test_run_operation_scalar_rows() {
    let client = ReplayClient::new()
        .with_response(Endpoint::Me, json!({"id": 3, "screen_name": "ferris"}))
        .with_response(Endpoint::ShowFriendship, json!({"relationship": {
            "source": {"following": true}, "target": {"following": false}
        }}));
    let tables = TwitterTables::new(client);
    let sel = Selectors::default();

    let table = run_operation(&tables, Operation::ApiId, &sel).await.unwrap();
    assert_eq!(table.get(0, "api_id"), Some(&json!(3)));

    let table = run_operation(&tables, Operation::ExistsFriendship, &sel)
        .await
        .unwrap();
    assert_eq!(table.get(0, "exists_friendship"), Some(&json!(true)));
}

#[tokio::test]
async fn test_run_operation_missing_selectors() {
    let tables = TwitterTables::new(ReplayClient::new());
    let sel = Selectors {
        id: Some("not-a-number".to_string()),
        ..Selectors::default()
    };
    let err = run_operation(&tables, Operation::GetStatus, &sel)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not-a-number"));

    assert!(run_operation(&tables, Operation::GetList, &sel).await.is_err());
    assert!(run_operation(&tables, Operation::SearchUsers, &sel).await.is_err());
    assert_eq!(tables.client().calls().await.len(), 0);
}

#[tokio::test]
async fn test_runner_flatten_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("users.json");
    let output = dir.path().join("out.jsonl");
    std::fs::write(
        &input,
        r#"{"users": [{"id": 1, "status": {"id": 2, "geo": {"lat": 1}}}]}"#,
    )
    .unwrap();

    let cli = parse(&[
        "flatten",
        input.to_str().unwrap(),
        "--record-path",
        "users",
        "--layers",
        "1",
        "--output",
        output.to_str().unwrap(),
    ]);
    Runner::new(cli).unwrap().run().await.unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "{\"id\":1,\"status.id\":2}\n");
}

#[tokio::test]
async fn test_runner_query_fixture_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("followers.json"),
        r#"[[{"id": 1}, {"id": 2}], [{"id": 3}]]"#,
    )
    .unwrap();
    let output = dir.path().join("followers.jsonl");

    let cli = parse(&[
        "query",
        "followers",
        "--fixtures",
        dir.path().to_str().unwrap(),
        "--limit",
        "2",
        "--output",
        output.to_str().unwrap(),
    ]);
    Runner::new(cli).unwrap().run().await.unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().count(), 2);
}

#[tokio::test]
async fn test_runner_parquet_requires_output() {
    let cli = parse(&["operations", "--format", "parquet"]);
    let err = Runner::new(cli).unwrap().run().await.unwrap_err();
    assert!(err.to_string().contains("--output"));
}

#[tokio::test]
async fn test_runner_query_without_fixtures() {
    let cli = parse(&["query", "me"]);
    assert!(Runner::new(cli).unwrap().run().await.is_err());
}

#[test]
fn test_runner_log_level() {
    let runner = Runner::new(parse(&["operations", "--verbose"])).unwrap();
    assert_eq!(runner.log_level(), tracing::Level::DEBUG);
    let runner = Runner::new(parse(&["operations"])).unwrap();
    assert_eq!(runner.log_level(), tracing::Level::INFO);
}
