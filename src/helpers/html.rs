//! HTML helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Default excerpt length in characters
pub const EXCERPT_LENGTH: usize = 150;

/// Marker appended to truncated excerpts
const OMISSION: &str = "...";

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string.
///
/// Entities are left as-is (`&amp;` stays `&amp;`). Every `<` starts a tag
/// that runs to the next `>`, so a stray `<` swallows the text up to the
/// following tag's end.
pub fn strip_html(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Build a plain-text excerpt of at most `max_length` characters
///
/// # Examples
/// ```ignore
/// create_excerpt("<p>Hello <b>World</b></p>", 5) // -> "Hello..."
/// ```
pub fn create_excerpt(content: &str, max_length: usize) -> String {
    let text = strip_html(content);

    if text.chars().count() <= max_length {
        return text;
    }

    let truncated: String = text.chars().take(max_length).collect();
    format!("{}{}", truncated.trim_end(), OMISSION)
}
