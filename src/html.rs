//! Small helpers for the HTML fragments stored in cells.

use std::sync::OnceLock;

use regex::Regex;

fn tag_regex() -> Option<&'static Regex> {
    static TAG: OnceLock<Option<Regex>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref()
}

fn line_break_regex() -> Option<&'static Regex> {
    static BREAK: OnceLock<Option<Regex>> = OnceLock::new();
    BREAK
        .get_or_init(|| Regex::new(r"(?i)<br\s*/?>|<div[^>]*>|\n").ok())
        .as_ref()
}

/// Decode the handful of entities that affect whether a cell reads as blank
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", "\u{a0}")
        .replace("&#160;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Text a browser would report as the fragment's `textContent`
pub fn text_content(html: &str) -> String {
    match tag_regex() {
        Some(re) => decode_entities(&re.replace_all(html, "")),
        None => decode_entities(html),
    }
}

/// True if the fragment has no visible text (tags and whitespace only)
pub fn is_blank(html: &str) -> bool {
    text_content(html).trim().is_empty()
}

/// Number of visual lines the fragment occupies, at least one
pub fn line_count(html: &str) -> usize {
    let trimmed = html.trim_end_matches('\n');
    line_break_regex().map_or(0, |re| re.find_iter(trimmed).count()) + 1
}

/// Plain-text lines of the fragment, used by text surfaces to draw a cell
pub fn text_lines(html: &str) -> Vec<String> {
    match line_break_regex() {
        Some(re) => re.split(html).map(text_content).collect(),
        None => vec![text_content(html)],
    }
}
