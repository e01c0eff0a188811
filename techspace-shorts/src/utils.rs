/// Text processing utilities
pub mod text {
    /// Minimum character offset a sentence break must sit past to be used as the cut point.
    const MIN_SENTENCE_CUT: usize = 40;

    /// Collapse every whitespace run to a single space and trim both ends.
    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Bound `text` to `max_chars` characters, preferring to cut after a sentence.
    ///
    /// When no `". "`, `"! "` or `"? "` occurs past the first 40 characters of the
    /// budget, the slice loses any `,:;-` run at its very end, then trailing
    /// whitespace, and gets a `?` marker, so the result may be one character over
    /// `max_chars`.
    pub fn trim_to_sentence(text: &str, max_chars: usize) -> String {
        let clean = collapse_whitespace(text);
        if clean.chars().count() <= max_chars {
            return clean;
        }

        let slice: String = clean.chars().take(max_chars).collect();

        let last_punct = [". ", "! ", "? "]
            .iter()
            .filter_map(|p| slice.rfind(p))
            .max();

        if let Some(idx) = last_punct {
            if slice[..idx].chars().count() > MIN_SENTENCE_CUT {
                return slice[..=idx].trim_end().to_string();
            }
        }

        let stripped = slice
            .trim_end_matches(|c: char| matches!(c, ',' | ':' | ';' | '-'))
            .trim_end();
        format!("{}?", stripped)
    }

    /// First `n` characters of `text`.
    pub fn take_chars(text: &str, n: usize) -> String {
        text.chars().take(n).collect()
    }

    /// Extract clean text content from an HTML fragment
    pub fn strip_html(html: &str) -> String {
        let text = html
            .chars()
            .fold((String::new(), false), |(mut text, in_tag), c| match c {
                '<' => (text, true),
                '>' => {
                    // Keep adjacent tags' text apart
                    text.push(' ');
                    (text, false)
                }
                _ if !in_tag => {
                    text.push(c);
                    (text, in_tag)
                }
                _ => (text, in_tag),
            })
            .0;

        collapse_whitespace(&decode_entities(&text))
    }

    fn decode_entities(text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&apos;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Display label for an item's source.
    ///
    /// A non-empty explicit label wins. Otherwise the link's host with any
    /// leading `www.` removed; `None` when the link is missing or not a URL.
    pub fn resolve_source(link: Option<&str>, explicit_source: Option<&str>) -> Option<String> {
        if let Some(source) = explicit_source.filter(|s| !s.is_empty()) {
            return Some(source.to_string());
        }

        let url = Url::parse(link?).ok()?;
        let host = url.host_str()?;
        Some(host.strip_prefix("www.").unwrap_or(host).to_string())
    }
}
