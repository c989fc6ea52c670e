//! WordPress REST API access
//!
//! - [`CmsClient`]: fetches posts and categories, folding failures into
//!   empty values
//! - [`PostQuery`] / [`PageResult`]: page requests and their results
//! - [`CmsError`]: what went wrong upstream, for logs and `try_*` callers

mod client;
mod error;
mod pagination;

pub use client::{CmsClient, CmsOptions, CATEGORY_LIMIT};
pub use error::CmsError;
pub use pagination::{parse_page, PageResult, PageTotals, PostQuery, DEFAULT_PER_PAGE};
