//! REST client for a WordPress-compatible content API.
//!
//! Wraps the `/posts` and `/categories` endpoints using [`reqwest`]. The
//! public `fetch_*` methods never fail: transport and decoding errors are
//! logged and folded into an empty result or `None`, so a page can always
//! render an empty state. The `try_fetch_*` variants expose the error for
//! callers that want it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::error::CmsError;
use super::pagination::{PageResult, PageTotals, PostQuery};
use crate::cache::{CachedResponse, ResponseCache};
use crate::config::{SiteConfig, DEFAULT_API_BASE_URL};
use crate::content::{Category, Post};

/// Largest category list requested in one call
pub const CATEGORY_LIMIT: u32 = 100;

const TOTAL_HEADER: &str = "x-wp-total";
const TOTAL_PAGES_HEADER: &str = "x-wp-totalpages";

/// Settings for a [`CmsClient`]
#[derive(Debug, Clone)]
pub struct CmsOptions {
    /// Base URL of the REST namespace, e.g. `https://host/wp-json/wp/v2`.
    pub api_base_url: String,
    /// Upper bound on a single upstream request.
    pub timeout: Duration,
    /// Revalidation window for post queries.
    pub posts_ttl: Duration,
    /// Revalidation window for category queries.
    pub categories_ttl: Duration,
    pub cache_enabled: bool,
}

impl Default for CmsOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            posts_ttl: Duration::from_secs(60),
            categories_ttl: Duration::from_secs(3600),
            cache_enabled: true,
        }
    }
}

impl From<&SiteConfig> for CmsOptions {
    fn from(config: &SiteConfig) -> Self {
        Self {
            api_base_url: config.api_base_url.clone(),
            timeout: config.request_timeout(),
            posts_ttl: config.posts_revalidate(),
            categories_ttl: config.categories_revalidate(),
            cache_enabled: config.cache_enabled,
        }
    }
}

/// HTTP client for a single WordPress site.
#[derive(Debug, Clone)]
pub struct CmsClient {
    client: reqwest::Client,
    base_url: String,
    posts_ttl: Duration,
    categories_ttl: Duration,
    cache: Arc<ResponseCache>,
}

impl CmsClient {
    /// Create a client with its own connection pool.
    pub fn new(options: CmsOptions) -> Result<Self, CmsError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Self::with_client(client, options)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    ///
    /// The request timeout of `options` is not applied to a borrowed client.
    pub fn with_client(client: reqwest::Client, options: CmsOptions) -> Result<Self, CmsError> {
        let base_url = options.api_base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| CmsError::InvalidUrl(format!("{base_url}: {e}")))?;

        let cache = if options.cache_enabled {
            ResponseCache::new()
        } else {
            ResponseCache::disabled()
        };

        Ok(Self {
            client,
            base_url,
            posts_ttl: options.posts_ttl,
            categories_ttl: options.categories_ttl,
            cache: Arc::new(cache),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The response cache shared by every clone of this client
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Fetch one page of posts, or the empty page on any failure.
    pub async fn fetch_posts(&self, query: &PostQuery) -> PageResult {
        match self.try_fetch_posts(query).await {
            Ok(page) => page,
            Err(e) => {
                e.report("fetch_posts");
                PageResult::empty()
            }
        }
    }

    /// Fetch one page of posts.
    ///
    /// Sends `GET /posts?page=..&per_page=..&_embed=true` plus the optional
    /// `categories` and `search` filters, and reads the collection totals
    /// from the `X-WP-Total` / `X-WP-TotalPages` headers.
    pub async fn try_fetch_posts(&self, query: &PostQuery) -> Result<PageResult, CmsError> {
        let url = self.endpoint("posts", &query.params())?;
        let (posts, response) = self.get_json::<Vec<Post>>(url, self.posts_ttl).await?;
        let totals = PageTotals::parse(response.total.as_deref(), response.total_pages.as_deref());
        Ok(PageResult::new(posts, totals, query))
    }

    /// Fetch a post by exact slug. A missing post and a failed request both
    /// yield `None`.
    pub async fn fetch_post_by_slug(&self, slug: &str) -> Option<Post> {
        self.try_fetch_post_by_slug(slug)
            .await
            .unwrap_or_else(|e| {
                e.report("fetch_post_by_slug");
                None
            })
    }

    pub async fn try_fetch_post_by_slug(&self, slug: &str) -> Result<Option<Post>, CmsError> {
        let url = self.endpoint("posts", &[("slug", slug), ("_embed", "true")])?;
        let (posts, _) = self.get_json::<Vec<Post>>(url, self.posts_ttl).await?;
        Ok(posts.into_iter().next())
    }

    /// Fetch up to [`CATEGORY_LIMIT`] categories, or none on failure.
    pub async fn fetch_categories(&self) -> Vec<Category> {
        self.try_fetch_categories().await.unwrap_or_else(|e| {
            e.report("fetch_categories");
            Vec::new()
        })
    }

    pub async fn try_fetch_categories(&self) -> Result<Vec<Category>, CmsError> {
        let limit = CATEGORY_LIMIT.to_string();
        let url = self.endpoint("categories", &[("per_page", limit.as_str())])?;
        let (categories, _) = self
            .get_json::<Vec<Category>>(url, self.categories_ttl)
            .await?;
        Ok(categories)
    }

    /// Fetch a category by exact slug, folding failures into `None`.
    pub async fn fetch_category_by_slug(&self, slug: &str) -> Option<Category> {
        self.try_fetch_category_by_slug(slug)
            .await
            .unwrap_or_else(|e| {
                e.report("fetch_category_by_slug");
                None
            })
    }

    pub async fn try_fetch_category_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Category>, CmsError> {
        let url = self.endpoint("categories", &[("slug", slug)])?;
        let (categories, _) = self
            .get_json::<Vec<Category>>(url, self.categories_ttl)
            .await?;
        Ok(categories.into_iter().next())
    }

    // ---- private helpers ----

    /// Build `{base_url}/{path}?{params}`.
    fn endpoint<K, V>(&self, path: &str, params: &[(K, V)]) -> Result<Url, CmsError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse_with_params(&raw, params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
            .map_err(|e| CmsError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// GET a JSON document, serving it from the cache while fresh.
    ///
    /// Only responses that decode as `T` are cached.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        ttl: Duration,
    ) -> Result<(T, CachedResponse), CmsError> {
        let key = url.to_string();

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!(url = %key, "CMS cache hit");
            let value = decode(&key, &cached.body)?;
            return Ok((value, cached));
        }

        tracing::debug!(url = %key, "Fetching from CMS");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                status: status.as_u16(),
                url: key,
            });
        }

        let total = header_value(response.headers(), TOTAL_HEADER);
        let total_pages = header_value(response.headers(), TOTAL_PAGES_HEADER);
        let body = response.text().await?;

        let value = decode(&key, &body)?;
        let cached = CachedResponse {
            body,
            total,
            total_pages,
        };
        self.cache.insert(key, cached.clone(), ttl);

        Ok((value, cached))
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, CmsError> {
    serde_json::from_str(body).map_err(|source| CmsError::Decode {
        url: url.to_string(),
        source,
    })
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
