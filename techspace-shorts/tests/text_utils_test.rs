use techspace_shorts::utils::text::{collapse_whitespace, strip_html, trim_to_sentence};
use techspace_shorts::utils::url::resolve_source;

#[test]
fn test_short_text_is_only_collapsed() {
    assert_eq!(trim_to_sentence("  hello \t  world \n", 180), "hello world");
    assert_eq!(trim_to_sentence("", 10), "");
    assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a b");
}

#[test]
fn test_cuts_at_last_sentence_boundary() {
    let text = "This first sentence is long enough to pass the minimum. \
                Second sentence keeps going and going beyond the limit of the budget.";
    assert_eq!(
        trim_to_sentence(text, 80),
        "This first sentence is long enough to pass the minimum."
    );

    let text = "Breaking: markets rally! Analysts say the surge reflects renewed optimism \
                in chip stocks. More to come later today.";
    assert_eq!(
        trim_to_sentence(text, 100),
        "Breaking: markets rally! Analysts say the surge reflects renewed optimism in chip stocks."
    );
}

#[test]
fn test_boundary_must_be_past_forty_characters() {
    let at_forty = format!("{}. {}", "A".repeat(40), "b".repeat(50));
    assert_eq!(
        trim_to_sentence(&at_forty, 60),
        format!("{}. {}?", "A".repeat(40), "b".repeat(18))
    );

    let at_forty_one = format!("{}. {}", "A".repeat(41), "b".repeat(50));
    assert_eq!(trim_to_sentence(&at_forty_one, 60), format!("{}.", "A".repeat(41)));

    assert_eq!(
        trim_to_sentence("Hi. This opening is short so the early break must be ignored entirely here.", 30),
        "Hi. This opening is short so t?"
    );
}

#[test]
fn test_marks_truncation_without_boundary() {
    assert_eq!(
        trim_to_sentence("Alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu", 20),
        "Alpha beta gamma del?"
    );
    assert_eq!(
        trim_to_sentence("Lorem ipsum dolor sit amet, consectetur adipiscing elit", 27),
        "Lorem ipsum dolor sit amet?"
    );
    assert_eq!(trim_to_sentence("Rates: up; -- down", 13), "Rates: up;?");
}

#[test]
fn test_only_punctuation_at_the_cut_is_stripped() {
    // A space at the cut shields the punctuation before it
    assert_eq!(
        trim_to_sentence("aaaa bbbb cccc dddd, eeee ffff gggg", 21),
        "aaaa bbbb cccc dddd,?"
    );
    assert_eq!(
        trim_to_sentence("aaaa bbbb cccc dddd, eeee ffff gggg", 20),
        "aaaa bbbb cccc dddd?"
    );
    assert_eq!(trim_to_sentence("one two three; - four five six", 15), "one two three;?");
}

#[test]
fn test_output_is_bounded_and_trimmed() {
    let samples = [
        "   Leading and trailing   whitespace around a sentence that runs on and on. And on.   ",
        "No punctuation at all in this fairly long line of words that keeps on going",
        "Short.",
        "Mixed!   Signals?   Everywhere.   In   this   text   that   is   rather   long   indeed.",
    ];

    for text in samples {
        for max in [5usize, 20, 41, 60, 180] {
            let collapsed = collapse_whitespace(text);
            let trimmed = trim_to_sentence(text, max);
            if collapsed.chars().count() <= max {
                assert_eq!(trimmed, collapsed);
            } else {
                assert!(trimmed.chars().count() <= max + 1, "{:?} over budget {}", trimmed, max);
            }
            assert_eq!(trimmed, trimmed.trim());
        }
    }
}

#[test]
fn test_counts_characters_not_bytes() {
    let text = "é".repeat(30);
    assert_eq!(trim_to_sentence(&text, 10), format!("{}?", "é".repeat(10)));
    assert_eq!(trim_to_sentence(&text, 30), text);
}

#[test]
fn test_resolve_source() {
    assert_eq!(
        resolve_source(Some("https://www.example.com/a"), None),
        Some("example.com".to_string())
    );
    assert_eq!(
        resolve_source(Some("https://news.example.org/story?id=1"), None),
        Some("news.example.org".to_string())
    );
    assert_eq!(resolve_source(Some("not a url"), None), None);
    assert_eq!(resolve_source(None, None), None);
    assert_eq!(
        resolve_source(Some("https://www.example.com/a"), Some("CustomSource")),
        Some("CustomSource".to_string())
    );
    assert_eq!(
        resolve_source(Some("not a url"), Some("CustomSource")),
        Some("CustomSource".to_string())
    );
    assert_eq!(
        resolve_source(Some("https://www.example.com/a"), Some("")),
        Some("example.com".to_string())
    );
}

#[test]
fn test_strip_html_keeps_text() {
    let html = "<a href=\"https://x.test\">Rocket lands</a>&nbsp;&nbsp;<font color=\"#6f6f6f\">Space &amp; Sky</font>";
    assert_eq!(strip_html(html), "Rocket lands Space & Sky");
}
