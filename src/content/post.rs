//! Post and Category models, as returned by the WordPress REST API

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A field WordPress wraps as `{ "rendered": "<html>" }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

/// A news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// WordPress post ID
    pub id: u64,

    /// Publication date (site-local, no offset)
    pub date: NaiveDateTime,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Post title (HTML)
    #[serde(default)]
    pub title: Rendered,

    /// Full post body (HTML)
    #[serde(default)]
    pub content: Rendered,

    /// Post excerpt (HTML)
    #[serde(default)]
    pub excerpt: Rendered,

    /// Category IDs the post is filed under
    #[serde(default)]
    pub categories: Vec<u64>,

    /// Records embedded by `_embed=true`
    #[serde(default, rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
}

/// Related records WordPress inlines into a post when `_embed` is requested
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(default)]
    pub author: Vec<Author>,

    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<FeaturedMedia>,

    /// One list per taxonomy (categories, tags, ...)
    #[serde(default, rename = "wp:term")]
    pub terms: Vec<Vec<Term>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedMedia {
    #[serde(default)]
    pub id: u64,
    /// Absent when the media record is restricted
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub alt_text: String,
}

/// A taxonomy term embedded in a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub taxonomy: String,
}

/// A post category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of published posts in the category
    #[serde(default)]
    pub count: u64,
    /// Parent category ID, 0 for top-level categories
    #[serde(default)]
    pub parent: u64,
}

impl Category {
    /// Description text, treating WordPress' empty string as absent
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_post_with_embeds() {
        let json = r#"{
            "id": 42,
            "date": "2024-01-15T10:30:00",
            "slug": "hello-world",
            "title": {"rendered": "Hello &amp; World"},
            "content": {"rendered": "<p>Body</p>", "protected": false},
            "excerpt": {"rendered": "<p>Short</p>"},
            "categories": [3, 7],
            "_embedded": {
                "author": [{"id": 1, "name": "Jane Reporter"}],
                "wp:featuredmedia": [{"id": 9, "source_url": "https://cdn.example.com/a.jpg"}],
                "wp:term": [[{"id": 3, "name": "Tech", "slug": "tech", "taxonomy": "category"}], []]
            }
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.title.rendered, "Hello &amp; World");
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-01-15");
        assert_eq!(post.categories, vec![3, 7]);

        let embedded = post.embedded.unwrap();
        assert_eq!(embedded.author[0].name, "Jane Reporter");
        assert_eq!(
            embedded.featured_media[0].source_url.as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
        assert_eq!(embedded.terms[0][0].slug, "tech");
    }

    #[test]
    fn test_decode_post_without_embeds() {
        let json = r#"{"id": 1, "date": "2024-02-01T08:00:00", "slug": "bare"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.embedded.is_none());
        assert!(post.title.rendered.is_empty());
    }

    #[test]
    fn test_decode_restricted_media() {
        // WordPress embeds an error object in place of media the caller cannot read
        let json = r#"{"code": "rest_forbidden", "message": "Sorry", "data": {"status": 401}}"#;
        let media: FeaturedMedia = serde_json::from_str(json).unwrap();
        assert!(media.source_url.is_none());
    }

    #[test]
    fn test_category_description() {
        let json = r#"{"id": 5, "name": "World", "slug": "world", "description": "", "count": 12}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.description(), None);
        assert_eq!(category.count, 12);

        let json = r#"{"id": 6, "name": "Science", "slug": "science", "description": "Lab notes"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.description(), Some("Lab notes"));
    }
}
