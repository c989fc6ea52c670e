//! Built-in news theme templates using Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::cms::PageResult;
use crate::config::SiteConfig;
use crate::content::{Category, Post, Term};
use crate::helpers;

/// Template renderer with the embedded news theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all news templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post titles and bodies arrive from WordPress as HTML already
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("news/layout.html")),
            ("home.html", include_str!("news/home.html")),
            ("category.html", include_str!("news/category.html")),
            ("article.html", include_str!("news/article.html")),
            ("not_found.html", include_str!("news/not_found.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("news/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("news/partials/footer.html"),
            ),
            (
                "partials/post_grid.html",
                include_str!("news/partials/post_grid.html"),
            ),
            (
                "partials/pager.html",
                include_str!("news/partials/pager.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            description: config.description.clone(),
        }
    }
}

/// A post as shown in a listing grid
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub title: String,
    pub url: String,
    pub excerpt: String,
    pub image: String,
    pub image_alt: String,
    pub author: String,
    pub date: String,
    pub date_iso: String,
    pub reading_time: usize,
}

impl PostCard {
    pub fn new(post: &Post, date_format: &str) -> Self {
        Self {
            title: post.title.rendered.clone(),
            url: helpers::post_url(&post.slug),
            excerpt: helpers::create_excerpt(&post.excerpt.rendered, helpers::EXCERPT_LENGTH),
            image: helpers::featured_image(post).to_string(),
            image_alt: plain_text(&helpers::featured_image_alt(post)),
            author: plain_text(helpers::author_name(post)),
            date: helpers::format_date(&post.date, date_format),
            date_iso: helpers::date_iso(&post.date),
            reading_time: helpers::reading_time(&post.content.rendered),
        }
    }
}

/// A full article page
#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    pub content: String,
    pub image: String,
    pub image_alt: String,
    pub author: String,
    pub date: String,
    pub date_iso: String,
    pub reading_time: usize,
    pub categories: Vec<CategoryLink>,
}

impl ArticleData {
    pub fn new(post: &Post, date_format: &str) -> Self {
        Self {
            title: post.title.rendered.clone(),
            content: post.content.rendered.clone(),
            image: helpers::featured_image(post).to_string(),
            image_alt: plain_text(&helpers::featured_image_alt(post)),
            author: plain_text(helpers::author_name(post)),
            date: helpers::format_date(&post.date, date_format),
            date_iso: helpers::date_iso(&post.date),
            reading_time: helpers::reading_time(&post.content.rendered),
            categories: helpers::post_categories(post)
                .into_iter()
                .map(CategoryLink::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

impl From<&Category> for CategoryLink {
    fn from(category: &Category) -> Self {
        Self {
            name: plain_text(&category.name),
            url: helpers::category_url(&category.slug),
        }
    }
}

impl From<&Term> for CategoryLink {
    fn from(term: &Term) -> Self {
        Self {
            name: plain_text(&term.name),
            url: helpers::category_url(&term.slug),
        }
    }
}

/// Heading block of a category listing
#[derive(Debug, Clone, Serialize)]
pub struct CategoryData {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<&Category> for CategoryData {
    fn from(category: &Category) -> Self {
        Self {
            name: plain_text(&category.name),
            description: plain_text(category.description().unwrap_or_default()),
            url: helpers::category_url(&category.slug),
        }
    }
}

/// Previous/next navigation for a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationData {
    pub current: u32,
    pub total: u32,
    pub total_items: u64,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl PaginationData {
    /// Links for `result`, a page of the listing rooted at `base`
    pub fn new(base: &str, result: &PageResult, search: Option<&str>) -> Self {
        let current = result.current_page;
        let total = result.total_pages;

        Self {
            current,
            total,
            total_items: result.total_items,
            prev_link: (current > 1).then(|| helpers::page_url(base, current - 1, search)),
            next_link: (current < total).then(|| helpers::page_url(base, current + 1, search)),
        }
    }
}

/// Neutralize markup in a plain-text CMS field.
///
/// `&` is left alone: WordPress already sends names with entities such as
/// `Arts &amp; Culture`. Only title, content and excerpt are output as HTML.
fn plain_text(text: &str) -> String {
    text.replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
