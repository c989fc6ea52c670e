//! List content from the CMS

use anyhow::Result;

use crate::cms::{PageResult, PostQuery};
use crate::helpers;
use crate::NewsHub;

/// Filters for `list post`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub page: u32,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// List site content by type
pub async fn run(newshub: &NewsHub, content_type: &str, options: &ListOptions) -> Result<()> {
    let cms = newshub.cms_client()?;

    match content_type {
        "post" | "posts" => {
            let category = match options.category.as_deref() {
                Some(slug) => match cms.fetch_category_by_slug(slug).await {
                    Some(category) => Some(category.id),
                    None => anyhow::bail!("Unknown category: {}", slug),
                },
                None => None,
            };

            let query = PostQuery::new(options.page)
                .with_per_page(newshub.config.per_page)
                .with_category(category)
                .with_search(options.search.as_deref());
            let result = cms.fetch_posts(&query).await;
            print!("{}", format_posts(&result, &newshub.config.date_format));
        }
        "category" | "categories" => {
            let categories = cms.fetch_categories().await;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({}) [{}]", category.name, category.count, category.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}

/// Plain-text listing of one page of posts
fn format_posts(result: &PageResult, date_format: &str) -> String {
    let mut out = format!(
        "Posts (page {} of {}, {} total):\n",
        result.current_page, result.total_pages, result.total_items
    );

    if result.is_empty() {
        out.push_str("  No Articles Found\n");
        return out;
    }

    for post in &result.items {
        out.push_str(&format!(
            "  {} - {} by {} ({} min) [{}]\n",
            helpers::format_date(&post.date, date_format),
            helpers::strip_html(&post.title.rendered),
            helpers::author_name(post),
            helpers::reading_time(&post.content.rendered),
            post.slug
        ));
    }

    out
}
