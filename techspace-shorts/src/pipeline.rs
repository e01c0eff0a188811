use crate::aggregator::FeedAggregator;
use crate::composer::ScriptComposer;
use crate::config::ShortsConfig;
use crate::fetcher::Fetcher;
use crate::ranking::{MAX_ITEMS, MIN_ITEMS};
use crate::traits::FeedRetriever;
use crate::types::{AggregatorError, GenerateResponse, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const NO_ITEMS_MESSAGE: &str = "No news items found";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate short";

/// Requested item count as seen by the boundary: missing, zero or NaN
/// means the maximum; anything else is clamped to `1..=3` and floored.
pub fn clamp_limit(requested: Option<f64>) -> usize {
    match requested {
        Some(n) if n != 0.0 && !n.is_nan() => n.clamp(MIN_ITEMS as f64, MAX_ITEMS as f64).floor() as usize,
        _ => MAX_ITEMS,
    }
}

/// Parse a raw `maxItems` parameter; non-numeric input reads as missing.
pub fn parse_max_items(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
}

/// Runs aggregate → rank → compose for one request.
pub struct ShortsPipeline {
    aggregator: FeedAggregator,
    topics: Vec<String>,
}

impl ShortsPipeline {
    pub fn new(retriever: Arc<dyn FeedRetriever>, topics: Vec<String>) -> Self {
        Self {
            aggregator: FeedAggregator::new(retriever),
            topics,
        }
    }

    /// Build the HTTP-backed pipeline described by `config`.
    pub fn from_config(config: ShortsConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch)?;
        let aggregator = FeedAggregator::new(Arc::new(fetcher)).with_policy(config.policy);
        Ok(Self {
            aggregator,
            topics: config.topics,
        })
    }

    pub fn with_aggregator(aggregator: FeedAggregator, topics: Vec<String>) -> Self {
        Self { aggregator, topics }
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub async fn generate(&self, max_items: Option<f64>) -> Result<GenerateResponse> {
        let limit = clamp_limit(max_items);
        info!("Generating short from up to {} items", limit);

        let items = self.aggregator.fetch_top_items(&self.topics, limit).await?;
        if items.is_empty() {
            warn!("Aggregation returned no items");
            return Err(AggregatorError::EmptyResult);
        }

        let bundle = ScriptComposer::compose_bundle(&items);
        info!("Composed short '{}' with {} items", bundle.title, bundle.items.len());
        Ok(GenerateResponse::from(bundle))
    }
}

/// Caller-facing message for a failed generation; internals stay in the logs.
pub fn error_message(err: &AggregatorError) -> &'static str {
    match err {
        AggregatorError::EmptyResult => NO_ITEMS_MESSAGE,
        other => {
            error!("Short generation failed: {}", other);
            GENERATION_FAILED_MESSAGE
        }
    }
}
