use serde::{Deserialize, Serialize};

/// Raw entry produced by a feed retrieval, before dedup and ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub source: Option<String>,
    pub published_at: Option<String>,
    pub snippet: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            source: None,
            published_at: None,
            snippet: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// A ranked item after the composer has trimmed its summary and resolved its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedItem {
    pub title: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedBundle {
    pub title: String,
    pub script: String,
    pub hashtags: Vec<String>,
    pub thumbnail_text: String,
    pub visuals: Vec<String>,
    pub items: Vec<ProcessedItem>,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&ProcessedItem> for Citation {
    fn from(item: &ProcessedItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.link.clone(),
            source: item.source.clone(),
        }
    }
}

/// Envelope handed back to callers: the bundle fields plus their citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub bundle: GeneratedBundle,
    pub citations: Vec<Citation>,
}

impl From<GeneratedBundle> for GenerateResponse {
    fn from(bundle: GeneratedBundle) -> Self {
        let citations = bundle.items.iter().map(Citation::from).collect();
        Self { bundle, citations }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    pub base_url: String,
    /// Google News recency operator appended to every query.
    pub window: String,
    pub language: String,
    pub country: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "TechSpace-Shorts/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            follow_redirects: true,
            max_redirects: 5,
            base_url: "https://news.google.com/rss/search".to_string(),
            window: "when:1d".to_string(),
            language: "en-US".to_string(),
            country: "US".to_string(),
        }
    }
}

/// What the aggregator does when some topic retrievals fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregationPolicy {
    /// Any failed topic fails the whole aggregation.
    #[default]
    FailFast,
    /// Keep the topics that succeeded; fail only if every topic failed.
    BestEffort,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Fetch failed for query '{query}': {reason}")]
    FetchFailed { query: String, reason: String },

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("No news items found")]
    EmptyResult,
}

impl AggregatorError {
    /// True for every variant that stems from a topic retrieval.
    pub fn is_fetch_error(&self) -> bool {
        !matches!(self, Self::EmptyResult)
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
