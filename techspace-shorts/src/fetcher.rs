use crate::parser::FeedParser;
use crate::traits::FeedRetriever;
use crate::types::{AggregatorError, FetchConfig, NewsItem, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Google News RSS search client. Build one and share it across requests.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Search URL for `query`, restricted to the configured recency window.
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let q = format!("{} {}", query, self.config.window);
        let ceid = format!("{}:{}", self.config.country, language_code(&self.config.language));

        let url = Url::parse_with_params(
            &self.config.base_url,
            &[
                ("q", q.as_str()),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.country.as_str()),
                ("ceid", ceid.as_str()),
            ],
        )?;
        Ok(url)
    }

    pub async fn fetch_feed(&self, query: &str) -> Result<String> {
        let url = self.search_url(query)?;
        let start_time = Instant::now();

        debug!("Fetching feed for '{}': {}", query, url);

        let mut response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            error!("Feed request for '{}' returned HTTP {}", query, status);
            return Err(AggregatorError::FetchFailed {
                query: query.to_string(),
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let max_bytes = self.config.max_feed_size_mb * BYTES_PER_MB;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > max_bytes {
                return Err(AggregatorError::FeedTooLarge {
                    size_mb: content_length as usize / BYTES_PER_MB,
                });
            }
        }

        // Chunked and compressed bodies carry no usable length; count as we read
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > max_bytes {
                warn!("Feed for '{}' exceeded {}MB, aborting", query, self.config.max_feed_size_mb);
                return Err(AggregatorError::FeedTooLarge {
                    size_mb: body.len() / BYTES_PER_MB,
                });
            }
        }
        let content = String::from_utf8_lossy(&body).into_owned();

        info!(
            "Fetched feed for '{}' ({} bytes in {}ms)",
            query,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}

#[async_trait]
impl FeedRetriever for Fetcher {
    fn source_name(&self) -> String {
        Url::parse(&self.config.base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| format!("Google News ({})", h)))
            .unwrap_or_else(|| "Google News".to_string())
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<NewsItem>> {
        let content = self.fetch_feed(query).await?;
        if !FeedParser::is_valid_feed_content(&content) {
            return Err(AggregatorError::FetchFailed {
                query: query.to_string(),
                reason: "response is not an RSS or Atom feed".to_string(),
            });
        }
        FeedParser::parse_items(&content)
    }
}

/// "en-US" -> "en"
fn language_code(language: &str) -> &str {
    language.split('-').next().unwrap_or(language)
}
