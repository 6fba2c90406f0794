//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::types::{FlatRecord, JsonValue};
use async_trait::async_trait;
use futures::TryStreamExt;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory source; cursor "n" addresses page n
struct VecSource {
    pages: Vec<Vec<JsonValue>>,
    fetches: AtomicUsize,
    fail_at: Option<usize>,
}

impl VecSource {
    fn new(pages: Vec<Vec<JsonValue>>) -> Self {
        Self {
            pages,
            fetches: AtomicUsize::new(0),
            fail_at: None,
        }
    }

    fn failing_at(mut self, page: usize) -> Self {
        self.fail_at = Some(page);
        self
    }

    /// `pages` pages of `per_page` items numbered from 0
    fn numbered(pages: usize, per_page: usize) -> Self {
        Self::new(
            (0..pages)
                .map(|p| {
                    (0..per_page)
                        .map(|i| json!({"n": p * per_page + i}))
                        .collect()
                })
                .collect(),
        )
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for VecSource {
    async fn fetch_page(&self, cursor: Option<&Cursor>) -> Result<Page> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let index = cursor.map_or(0, |c| c.as_str().parse::<usize>().unwrap());
        if self.fail_at == Some(index) {
            return Err(Error::Other(format!("page {index} unavailable")));
        }
        let items = self.pages.get(index).cloned().unwrap_or_default();
        if index + 1 < self.pages.len() {
            Ok(Page::with_next(items, (index + 1).to_string()))
        } else {
            Ok(Page::last(items))
        }
    }
}

fn as_row(value: JsonValue) -> FlatRecord {
    value.as_object().cloned().unwrap_or_default()
}

fn numbers(rows: &[FlatRecord]) -> Vec<u64> {
    rows.iter().map(|r| r["n"].as_u64().unwrap()).collect()
}

// ============================================================================
// Cursor / Page
// ============================================================================

#[test]
fn test_cursor_roundtrip_display() {
    let cursor = Cursor::from("1234");
    assert_eq!(cursor.as_str(), "1234");
    assert_eq!(cursor.to_string(), "1234");
    assert_eq!(serde_json::to_value(&cursor).unwrap(), json!("1234"));
}

#[test]
fn test_page_constructors() {
    assert!(Page::last(vec![]).is_last());
    let page = Page::with_next(vec![json!(1)], "next");
    assert!(!page.is_last());
    assert_eq!(page.next, Some(Cursor::new("next")));
}

// ============================================================================
// items()
// ============================================================================

#[tokio::test]
async fn test_items_walks_all_pages_in_order() {
    let source = VecSource::numbered(3, 2);
    let all: Vec<JsonValue> = items(&source).try_collect().await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0], json!({"n": 0}));
    assert_eq!(all[5], json!({"n": 5}));
    assert_eq!(source.fetches(), 3);
}

#[tokio::test]
async fn test_items_is_lazy() {
    let source = VecSource::numbered(5, 2);
    let mut stream = items(&source);
    assert_eq!(source.fetches(), 0);

    stream.try_next().await.unwrap();
    assert_eq!(source.fetches(), 1);
    stream.try_next().await.unwrap();
    assert_eq!(source.fetches(), 1);
    stream.try_next().await.unwrap();
    assert_eq!(source.fetches(), 2);
}

#[tokio::test]
async fn test_items_skips_empty_pages() {
    let source = VecSource::new(vec![vec![], vec![json!({"n": 1})], vec![]]);
    let all: Vec<JsonValue> = items(&source).try_collect().await.unwrap();
    assert_eq!(all, vec![json!({"n": 1})]);
    assert_eq!(source.fetches(), 3);
}

// ============================================================================
// collect_rows()
// ============================================================================

#[tokio::test]
async fn test_collect_without_limit_consumes_everything() {
    let source = VecSource::numbered(4, 3);
    let rows = collect_rows(&source, None, as_row).await.unwrap();
    assert_eq!(numbers(&rows), (0..12).collect::<Vec<_>>());
    assert_eq!(source.fetches(), 4);
}

#[tokio::test]
async fn test_collect_limit_returns_prefix() {
    for k in 0..=12 {
        let source = VecSource::numbered(4, 3);
        let rows = collect_rows(&source, Some(k), as_row).await.unwrap();
        assert_eq!(numbers(&rows), (0..k as u64).collect::<Vec<_>>());
    }
}

#[tokio::test]
async fn test_collect_limit_stops_fetching() {
    let source = VecSource::numbered(10, 3);
    let rows = collect_rows(&source, Some(4), as_row).await.unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(source.fetches(), 2);

    // limit reached on a page boundary: the next page is never requested
    let source = VecSource::numbered(10, 3);
    collect_rows(&source, Some(3), as_row).await.unwrap();
    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn test_collect_zero_limit_fetches_nothing() {
    let source = VecSource::numbered(2, 2);
    let rows = collect_rows(&source, Some(0), as_row).await.unwrap();
    assert!(rows.is_empty());
    assert_eq!(source.fetches(), 0);
}

#[tokio::test]
async fn test_collect_limit_larger_than_source() {
    let source = VecSource::numbered(2, 2);
    let rows = collect_rows(&source, Some(100), as_row).await.unwrap();
    assert_eq!(rows.len(), 4);
}

#[tokio::test]
async fn test_collect_applies_transform() {
    let source = VecSource::new(vec![vec![json!(7), json!(8)]]);
    let rows = collect_rows(&source, None, |v| {
        let mut row = FlatRecord::new();
        row.insert("id".to_string(), v);
        row
    })
    .await
    .unwrap();
    assert_eq!(rows[1]["id"], json!(8));
}

#[tokio::test]
async fn test_collect_propagates_source_error() {
    let source = VecSource::numbered(3, 1).failing_at(1);
    let err = collect_rows(&source, None, as_row).await.unwrap_err();
    assert_eq!(err.to_string(), "page 1 unavailable");

    // a limit satisfied before the failing page never sees the error
    let source = VecSource::numbered(3, 1).failing_at(1);
    let rows = collect_rows(&source, Some(1), as_row).await.unwrap();
    assert_eq!(rows.len(), 1);
}

// ============================================================================
// apply_limit / warn_if_over_cap
// ============================================================================

#[test]
fn test_apply_limit() {
    assert_eq!(apply_limit(vec![1, 2, 3], None), vec![1, 2, 3]);
    assert_eq!(apply_limit(vec![1, 2, 3], Some(2)), vec![1, 2]);
    assert_eq!(apply_limit(vec![1, 2, 3], Some(10)), vec![1, 2, 3]);
    assert!(apply_limit(vec![1, 2, 3], Some(0)).is_empty());
}

#[test]
fn test_warn_if_over_cap() {
    assert!(!warn_if_over_cap("search_users", None, 1000));
    assert!(!warn_if_over_cap("search_users", Some(1000), 1000));
    assert!(warn_if_over_cap("search_users", Some(1001), 1000));
}
