use crate::ranking;
use crate::traits::FeedRetriever;
use crate::types::{AggregationPolicy, NewsItem, Result};
use futures::future::{join_all, try_join_all};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Fans topic queries out to a shared retriever and ranks what comes back.
pub struct FeedAggregator {
    retriever: Arc<dyn FeedRetriever>,
    policy: AggregationPolicy,
}

impl FeedAggregator {
    pub fn new(retriever: Arc<dyn FeedRetriever>) -> Self {
        Self {
            retriever,
            policy: AggregationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    /// Retrieve every topic concurrently and merge in topic order, then item order.
    pub async fn fetch_all(&self, topics: &[String]) -> Result<Vec<NewsItem>> {
        info!(
            "Fetching {} topics from {} ({:?})",
            topics.len(),
            self.retriever.source_name(),
            self.policy
        );

        let retrievals = topics.iter().map(|topic| self.retriever.retrieve(topic));

        let per_topic = match self.policy {
            AggregationPolicy::FailFast => try_join_all(retrievals).await.map_err(|e| {
                error!("Topic retrieval failed, aborting aggregation: {}", e);
                e
            })?,
            AggregationPolicy::BestEffort => Self::keep_successes(topics, join_all(retrievals).await)?,
        };

        let merged: Vec<NewsItem> = per_topic.into_iter().flatten().collect();
        info!("Merged {} raw items", merged.len());
        Ok(merged)
    }

    /// Retrieve, deduplicate and rank; at most `limit` items (clamped to `1..=3`).
    pub async fn fetch_top_items(&self, topics: &[String], limit: usize) -> Result<Vec<NewsItem>> {
        let merged = self.fetch_all(topics).await?;
        Ok(ranking::rank(merged, limit))
    }

    fn keep_successes(
        topics: &[String],
        results: Vec<Result<Vec<NewsItem>>>,
    ) -> Result<Vec<Vec<NewsItem>>> {
        let mut succeeded = Vec::new();
        let mut last_error = None;

        for (topic, result) in topics.iter().zip(results) {
            match result {
                Ok(items) => succeeded.push(items),
                Err(e) => {
                    warn!("Skipping topic '{}': {}", topic, e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if succeeded.is_empty() => Err(e),
            _ => Ok(succeeded),
        }
    }
}
