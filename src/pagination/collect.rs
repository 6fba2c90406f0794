//! Lazy page walking and limit enforcement

use super::types::{Cursor, PageSource};
use crate::error::{Error, Result};
use crate::types::{FlatRecord, JsonValue};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use tracing::{debug, warn};

/// Where the walk currently stands
enum Walk {
    Start,
    Next(Cursor),
    Done,
}

/// Fetch the page for `walk` and compute the following position
async fn step<S>(source: &S, walk: Walk) -> Result<Option<(Vec<JsonValue>, Walk)>>
where
    S: PageSource + ?Sized,
{
    let cursor = match walk {
        Walk::Done => return Ok(None),
        Walk::Start => None,
        Walk::Next(cursor) => Some(cursor),
    };

    let page = source.fetch_page(cursor.as_ref()).await?;
    debug!(
        cursor = cursor.as_ref().map(Cursor::as_str),
        items = page.items.len(),
        last = page.is_last(),
        "Fetched page"
    );

    let next = match page.next {
        Some(cursor) => Walk::Next(cursor),
        None => Walk::Done,
    };
    Ok(Some((page.items, next)))
}

/// Lazy stream of every record the source yields, in page order.
///
/// A page is requested only when the previous one has been consumed.
pub fn items<'a, S>(source: &'a S) -> BoxStream<'a, Result<JsonValue>>
where
    S: PageSource + ?Sized,
{
    stream::try_unfold(Walk::Start, move |walk| step(source, walk))
        .map_ok(|page| stream::iter(page.into_iter().map(Ok::<JsonValue, Error>)))
        .try_flatten()
        .boxed()
}

/// Walk `source`, transform each record and stop once `limit` rows exist.
///
/// `limit = None` consumes every page; `Some(0)` fetches nothing. Errors
/// from the source are returned as-is.
pub async fn collect_rows<S, F>(
    source: &S,
    limit: Option<usize>,
    mut transform: F,
) -> Result<Vec<FlatRecord>>
where
    S: PageSource + ?Sized,
    F: FnMut(JsonValue) -> FlatRecord + Send,
{
    let mut rows = Vec::new();
    if limit == Some(0) {
        return Ok(rows);
    }

    let mut records = items(source);
    while let Some(record) = records.try_next().await? {
        rows.push(transform(record));
        if limit.is_some_and(|max| rows.len() >= max) {
            break;
        }
    }

    Ok(rows)
}

/// Truncate an already-fetched list to `limit`
pub fn apply_limit<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(max) = limit {
        rows.truncate(max);
    }
    rows
}

/// Warn when a caller asks for more rows than the service will return.
///
/// Advisory only; returns whether the warning fired.
pub fn warn_if_over_cap(operation: &str, limit: Option<usize>, cap: usize) -> bool {
    match limit {
        Some(requested) if requested > cap => {
            warn!(
                operation,
                requested, cap, "The API returns at most {cap} results; the limit has no effect"
            );
            true
        }
        _ => false,
    }
}
