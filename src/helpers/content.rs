//! Display values derived from fetched posts

use super::html::strip_html;
use crate::content::{Embedded, Post, Term};

/// Image shown when a post has no featured media
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Byline shown when a post has no embedded author
pub const FALLBACK_AUTHOR: &str = "NewsHub Staff";

/// Average reading speed used for reading-time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// First embedded record of a kind, if the post carries any
fn first_embedded<'a, T>(post: &'a Post, pick: fn(&'a Embedded) -> &'a [T]) -> Option<&'a T> {
    post.embedded.as_ref().and_then(|e| pick(e).first())
}

/// Featured image URL, or the placeholder path
pub fn featured_image(post: &Post) -> &str {
    first_embedded(post, |e| e.featured_media.as_slice())
        .and_then(|media| media.source_url.as_deref())
        .filter(|url| !url.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Alt text for the featured image, falling back to the post title
pub fn featured_image_alt(post: &Post) -> String {
    first_embedded(post, |e| e.featured_media.as_slice())
        .map(|media| media.alt_text.trim())
        .filter(|alt| !alt.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| strip_html(&post.title.rendered))
}

/// Author display name, or the fallback byline
pub fn author_name(post: &Post) -> &str {
    first_embedded(post, |e| e.author.as_slice())
        .map(|author| author.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_AUTHOR)
}

/// Categories embedded in the post (`wp:term` entries with the category taxonomy)
pub fn post_categories(post: &Post) -> Vec<&Term> {
    post.embedded
        .as_ref()
        .map(|e| {
            e.terms
                .iter()
                .flatten()
                .filter(|term| term.taxonomy == "category")
                .collect()
        })
        .unwrap_or_default()
}

/// Estimated reading time in whole minutes, never less than one
pub fn reading_time(html: &str) -> usize {
    let words = strip_html(html).split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
