//! HTML → plain text reduction. Pure string functions, no I/O.
//!
//! Step order matters: entities are decoded only after every tag is gone, so
//! an encoded `&lt;script&gt;` survives as literal text instead of being
//! stripped as markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Elements dropped together with everything inside them.
const REMOVED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "header", "aside"];

static REMOVED_ELEMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    REMOVED_ELEMENTS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("element pattern is valid")
        })
        .collect()
});

static BLOCK_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|div|h[1-6]|li|tr|br|hr)\s*>").expect("block pattern is valid")
});

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br pattern is valid"));

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:amp|lt|gt|quot|#39|nbsp);").expect("entity pattern is valid"));

static HORIZONTAL_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]+").expect("space pattern is valid"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("blank-line pattern is valid"));

/// Reduces an HTML document to readable plain text.
///
/// 1. drop script/style/nav/footer/header/aside elements with their contents
/// 2. block-level closing tags and `<br>` variants become newlines
/// 3. strip all remaining tags
/// 4. decode the six common named entities
/// 5. normalise whitespace
pub fn html_to_text(html: &str) -> String {
    let mut text = html.to_string();
    for pattern in REMOVED_ELEMENT_PATTERNS.iter() {
        text = pattern.replace_all(&text, "").into_owned();
    }

    let text = BLOCK_CLOSE.replace_all(&text, "\n");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    normalize_whitespace(&text)
}

/// Single pass, so `&amp;lt;` decodes to `&lt;` rather than `<`.
fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| match &caps[0] {
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            "&#39;" => "'",
            _ => " ",
        })
        .into_owned()
}

/// Collapses space/tab runs to one space, any whitespace run holding two or
/// more newlines to exactly one blank line, and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// First `max_chars` characters of `text`, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
