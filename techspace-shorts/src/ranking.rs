use crate::types::NewsItem;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

/// Smallest and largest number of items a short is built from.
pub const MIN_ITEMS: usize = 1;
pub const MAX_ITEMS: usize = 3;

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_ITEMS, MAX_ITEMS)
}

/// Drop repeated titles, keeping the first occurrence in merge order.
///
/// Titles are compared after trimming surrounding whitespace; the comparison is
/// otherwise exact and case-sensitive.
pub fn deduplicate(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let total = items.len();
    let mut seen_titles = HashSet::new();

    let unique: Vec<NewsItem> = items
        .into_iter()
        .filter(|item| {
            let key = item.title.trim().to_string();
            if seen_titles.insert(key) {
                true
            } else {
                debug!("Removing duplicate entry: {} ({})", item.title, item.link);
                false
            }
        })
        .collect();

    let removed_count = total - unique.len();
    if removed_count > 0 {
        info!("Removed {} duplicate entries", removed_count);
    }

    unique
}

/// Publish time used for ordering; missing or unparseable timestamps sort as the epoch.
pub fn publish_timestamp(item: &NewsItem) -> DateTime<Utc> {
    item.published_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Newest first; equal timestamps fall back to ascending title.
pub fn compare_items(a: &NewsItem, b: &NewsItem) -> Ordering {
    publish_timestamp(b)
        .cmp(&publish_timestamp(a))
        .then_with(|| a.title.cmp(&b.title))
}

/// Deduplicate, order by recency and keep the first `limit` items.
///
/// `limit` is clamped to `1..=3`. Non-empty input always yields at least one item.
pub fn rank(items: Vec<NewsItem>, limit: usize) -> Vec<NewsItem> {
    let limit = clamp_limit(limit);
    let mut unique = deduplicate(items);

    unique.sort_by(compare_items);
    unique.truncate(limit);

    debug!("Ranked {} items (limit {})", unique.len(), limit);
    unique
}
