//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Path of an article page
pub fn post_url(slug: &str) -> String {
    format!("/article/{}", encode_url(slug))
}

/// Path of a category listing
pub fn category_url(slug: &str) -> String {
    format!("/category/{}", encode_url(slug))
}

/// Link to page `page` of a listing rooted at `base`
///
/// Page 1 links to the bare listing path. A search term is carried along so
/// paging through results keeps the filter.
///
/// # Examples
/// ```ignore
/// page_url("/", 2, None)                 // -> "/?page=2"
/// page_url("/category/tech", 1, None)    // -> "/category/tech"
/// page_url("/", 3, Some("rust lang"))    // -> "/?page=3&search=rust%20lang"
/// ```
pub fn page_url(base: &str, page: u32, search: Option<&str>) -> String {
    let mut params = Vec::new();
    if page > 1 {
        params.push(format!("page={}", page));
    }
    if let Some(term) = search.filter(|s| !s.is_empty()) {
        params.push(format!("search={}", encode_url(term)));
    }

    if params.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, params.join("&"))
    }
}

/// Encode a URL path segment or query value
pub fn encode_url(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
