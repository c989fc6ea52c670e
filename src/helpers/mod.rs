//! Helper functions for templates and handlers
//!
//! Pure functions that turn fetched records into display values: stripped
//! text, excerpts, bylines, images, reading times, dates and links.

mod content;
mod date;
mod html;
mod url;

pub use content::*;
pub use date::*;
pub use html::*;
pub use url::*;
