//! Content module - the records fetched from the CMS

mod post;

pub use post::{Author, Category, Embedded, FeaturedMedia, Post, Rendered, Term};
