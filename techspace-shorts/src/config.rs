use crate::types::{AggregationPolicy, FetchConfig};
use std::env;
use tracing::warn;

pub const DEFAULT_TOPICS: [&str; 2] = [
    "technology OR tech OR AI OR artificial intelligence",
    "space exploration OR NASA OR SpaceX OR rocket",
];

#[derive(Debug, Clone)]
pub struct ShortsConfig {
    pub fetch: FetchConfig,
    pub topics: Vec<String>,
    pub policy: AggregationPolicy,
}

impl Default for ShortsConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            policy: AggregationPolicy::FailFast,
        }
    }
}

impl ShortsConfig {
    /// Defaults, overridden by any `SHORTS_*` variables present in the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ShortsConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(user_agent) = lookup("SHORTS_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }
        if let Some(base_url) = lookup("SHORTS_FEED_BASE_URL") {
            config.fetch.base_url = base_url;
        }
        if let Some(raw) = lookup("SHORTS_TIMEOUT_SECONDS") {
            match raw.trim().parse() {
                Ok(seconds) => config.fetch.timeout_seconds = seconds,
                Err(_) => warn!("Ignoring invalid SHORTS_TIMEOUT_SECONDS: {}", raw),
            }
        }
        if let Some(raw) = lookup("SHORTS_TOPICS") {
            let topics = parse_topics(&raw);
            if topics.is_empty() {
                warn!("SHORTS_TOPICS is empty, keeping default topics");
            } else {
                config.topics = topics;
            }
        }
        if let Some(raw) = lookup("SHORTS_POLICY") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "fail-fast" | "fail_fast" => config.policy = AggregationPolicy::FailFast,
                "best-effort" | "best_effort" => config.policy = AggregationPolicy::BestEffort,
                other => warn!("Ignoring unknown SHORTS_POLICY: {}", other),
            }
        }

        config
    }
}

/// `|`-separated topic list; blank entries are dropped.
pub fn parse_topics(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
