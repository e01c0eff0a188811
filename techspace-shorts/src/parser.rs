use crate::types::{AggregatorError, NewsItem, Result};
use crate::utils::text::strip_html;
use feed_rs::parser;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info, warn};
use url::Url;

pub struct FeedParser;

impl FeedParser {
    /// Parse an RSS or Atom document into raw news items, in document order.
    pub fn parse_items(content: &str) -> Result<Vec<NewsItem>> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        // feed-rs drops the RSS <source> element, so read it separately
        let mut item_sources = Self::rss_item_sources(content).into_iter();

        let items: Vec<NewsItem> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let rss_source = item_sources.next().flatten();
                Self::parse_entry(entry, rss_source)
            })
            .collect();

        info!("Parsed feed with {} entries", items.len());
        Ok(items)
    }

    fn parse_entry(entry: feed_rs::model::Entry, rss_source: Option<String>) -> Option<NewsItem> {
        let link = entry.links.first()?.href.clone();
        let title = entry.title.map(|t| t.content).unwrap_or_default();

        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.to_rfc3339());

        // Prefer the summary; fall back to the full content body
        let raw_snippet = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));
        let snippet = raw_snippet
            .map(|s| strip_html(&s))
            .filter(|s| !s.is_empty());

        // Atom puts a feed URI here; only keep human-readable labels
        let source = rss_source.or_else(|| {
            entry
                .source
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty() && Url::parse(s).is_err())
        });

        Some(NewsItem {
            title,
            link,
            source,
            published_at,
            snippet,
        })
    }

    /// Publisher label of every RSS `<item>`, in document order.
    ///
    /// One slot per item, `None` when the item has no non-empty `<source>` text.
    /// Atom documents have no `<item>`s and yield an empty list.
    pub fn rss_item_sources(content: &str) -> Vec<Option<String>> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut sources = Vec::new();
        let mut current: Option<String> = None;
        let mut in_item = false;
        let mut in_source = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"item" => {
                        in_item = true;
                        current = None;
                    }
                    b"source" if in_item => in_source = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"item" => sources.push(None),
                Ok(Event::Text(e)) if in_source => match e.unescape() {
                    Ok(text) => current.get_or_insert_with(String::new).push_str(&text),
                    Err(e) => debug!("Skipping undecodable <source> text: {}", e),
                },
                Ok(Event::CData(e)) if in_source => {
                    current
                        .get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"source" => in_source = false,
                    b"item" if in_item => {
                        in_item = false;
                        let label = current.take().map(|s| s.trim().to_string());
                        sources.push(label.filter(|s| !s.is_empty()));
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    warn!("Stopped reading RSS <source> labels: {}", e);
                    break;
                }
                _ => {}
            }
        }

        sources
    }

    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        let has_feed_indicators = content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<channel");

        has_feed_indicators && content.trim_start().starts_with('<')
    }
}
