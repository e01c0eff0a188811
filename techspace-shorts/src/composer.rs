use crate::types::{GeneratedBundle, NewsItem, ProcessedItem};
use crate::utils::text::{collapse_whitespace, take_chars, trim_to_sentence};
use crate::utils::url::resolve_source;
use tracing::debug;

pub const SUMMARY_MAX_CHARS: usize = 180;
pub const TITLE_MAX_CHARS: usize = 70;
pub const THUMBNAIL_MAX_CHARS: usize = 22;
pub const HASHTAG_COUNT: usize = 7;

const DEFAULT_TITLE: &str = "Today's Tech & Space in 60s";
const DEFAULT_THUMBNAIL_KEYWORD: &str = "Tech & Space";
const INTRO: &str = "Did you know? Here are the hottest tech and space updates in under a minute!";
const OUTRO: &str = "Follow for daily TechSpace AI shorts!";
const BULLET_SEPARATOR: &str = "\u{2013}";

const TAG_POOL: [&str; 9] = [
    "#TechSpaceAI",
    "#TechNews",
    "#Space",
    "#AI",
    "#Science",
    "#NASA",
    "#SpaceX",
    "#Innovation",
    "#Shorts",
];

/// Turns ranked news items into a narrated short: script, title, tags, thumbnail and b-roll prompts.
///
/// Output depends only on the input slice; there is no randomness or clock access.
pub struct ScriptComposer;

impl ScriptComposer {
    pub fn compose_bundle(items: &[NewsItem]) -> GeneratedBundle {
        let processed: Vec<ProcessedItem> = items.iter().map(Self::process_item).collect();
        debug!("Composing bundle from {} items", processed.len());

        let title = Self::compose_title(processed.first());
        let script = Self::compose_script(&processed);
        let thumbnail_text = Self::compose_thumbnail(processed.first());
        let visuals = processed.iter().map(|p| Self::visual_prompt(&p.title)).collect();
        let sources = processed.iter().map(|p| p.link.clone()).collect();

        GeneratedBundle {
            title,
            script,
            hashtags: Self::hashtags(),
            thumbnail_text,
            visuals,
            items: processed,
            sources,
        }
    }

    pub fn process_item(item: &NewsItem) -> ProcessedItem {
        let base = item
            .snippet
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&item.title);

        ProcessedItem {
            title: item.title.clone(),
            link: item.link.clone(),
            source: resolve_source(Some(&item.link), item.source.as_deref()),
            summary: trim_to_sentence(base, SUMMARY_MAX_CHARS),
        }
    }

    /// Same tags for every short.
    pub fn hashtags() -> Vec<String> {
        TAG_POOL
            .iter()
            .take(HASHTAG_COUNT)
            .map(|t| t.to_string())
            .collect()
    }

    fn compose_title(first: Option<&ProcessedItem>) -> String {
        let base = first
            .map(|p| p.title.as_str())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TITLE);

        let title = trim_to_sentence(base, TITLE_MAX_CHARS);
        if title.chars().count() > TITLE_MAX_CHARS {
            // The truncation marker must fit inside the budget
            return trim_to_sentence(base, TITLE_MAX_CHARS - 1);
        }
        title
    }

    fn compose_script(processed: &[ProcessedItem]) -> String {
        let bullets = processed.iter().enumerate().map(|(i, p)| {
            format!(
                "#{}: {} {} {}",
                i + 1,
                collapse_whitespace(&p.title),
                BULLET_SEPARATOR,
                p.summary
            )
        });

        let parts: Vec<String> = std::iter::once(INTRO.to_string())
            .chain(bullets)
            .chain(std::iter::once(OUTRO.to_string()))
            .collect();

        collapse_whitespace(&parts.join(" "))
    }

    fn compose_thumbnail(first: Option<&ProcessedItem>) -> String {
        let keyword = first
            .map(|p| p.title.split_whitespace().take(3).collect::<Vec<_>>().join(" "))
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| DEFAULT_THUMBNAIL_KEYWORD.to_string());

        take_chars(&format!("{} TODAY", keyword).to_uppercase(), THUMBNAIL_MAX_CHARS)
    }

    fn visual_prompt(title: &str) -> String {
        format!(
            "Dynamic 9:16 montage: headline '{}', kinetic type over relevant b-roll \
             (e.g., rockets, labs, circuit boards). Subtle HUD lines, neon accents, \
             deep-space background.",
            title
        )
    }
}
