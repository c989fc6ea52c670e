//! Page requests and page results
//!
//! Pure parameter shaping around the posts endpoint: a [`PostQuery`] becomes
//! the query string sent upstream, and the totals headers of the answer
//! become a [`PageResult`]. The current page always comes from the request;
//! WordPress never echoes it back, and a page past the end is not clamped.

use serde::Serialize;

use crate::content::Post;

/// Posts per page on every listing
pub const DEFAULT_PER_PAGE: u32 = 9;

/// Parse a page number from a query-string value.
///
/// Absent, non-numeric and zero values all mean page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&page| page >= 1)
        .unwrap_or(1)
}

/// A request for one page of posts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub page: u32,
    pub per_page: u32,
    pub category: Option<u64>,
    pub search: Option<String>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            category: None,
            search: None,
        }
    }
}

impl PostQuery {
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Default::default()
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_category(mut self, category: Option<u64>) -> Self {
        self.category = category;
        self
    }

    /// Attach a search term; blank terms are dropped
    pub fn with_search(mut self, search: Option<&str>) -> Self {
        self.search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self
    }

    /// Query parameters for `GET /posts`
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            ("_embed", "true".to_string()),
        ];
        if let Some(category) = self.category {
            params.push(("categories", category.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params
    }
}

/// Collection totals reported in the `X-WP-Total*` headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTotals {
    pub total_items: u64,
    pub total_pages: u32,
}

impl Default for PageTotals {
    fn default() -> Self {
        Self {
            total_items: 0,
            total_pages: 1,
        }
    }
}

impl PageTotals {
    /// Read raw header values; missing or non-numeric values fall back to
    /// 0 items and 1 page, and the page count is never below 1
    pub fn parse(total: Option<&str>, total_pages: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            total_items: total
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.total_items),
            total_pages: total_pages
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(defaults.total_pages)
                .max(1),
        }
    }
}

/// One page of posts with the metadata a pager needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub items: Vec<Post>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

impl PageResult {
    /// The result served when the upstream request fails
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_pages: 1,
            current_page: 1,
        }
    }

    /// Assemble a page from decoded posts, the response totals and the query
    /// that produced them
    pub fn new(mut items: Vec<Post>, totals: PageTotals, query: &PostQuery) -> Self {
        items.truncate(query.per_page as usize);
        Self {
            items,
            total_items: totals.total_items,
            total_pages: totals.total_pages,
            current_page: query.page.max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the requested page lies past the last one
    pub fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}
