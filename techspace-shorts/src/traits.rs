use crate::types::{NewsItem, Result};
use async_trait::async_trait;

/// Trait for pulling raw news items for one topic query (Google News, fixtures, etc.)
#[async_trait]
pub trait FeedRetriever: Send + Sync {
    /// Human-readable name for this retriever
    fn source_name(&self) -> String;

    /// Retrieve every item the feed currently holds for `query`.
    /// The query is passed through as-is; recency windows are the retriever's concern.
    async fn retrieve(&self, query: &str) -> Result<Vec<NewsItem>>;
}
