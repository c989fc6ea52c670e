//! HTTP server rendering the news site

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::trace::TraceLayer;

use crate::cms::{parse_page, CmsClient, CmsOptions, PostQuery};
use crate::config::SiteConfig;
use crate::content::{Category, Post};
use crate::helpers;
use crate::templates::{
    ArticleData, CategoryData, CategoryLink, PaginationData, PostCard, SiteData, TemplateRenderer,
};
use crate::NewsHub;

/// Shared state handed to every handler
pub struct AppState {
    pub config: SiteConfig,
    pub cms: CmsClient,
    pub renderer: TemplateRenderer,
}

impl AppState {
    pub fn new(config: SiteConfig) -> Result<Self> {
        let cms = CmsClient::new(CmsOptions::from(&config))?;
        Self::with_client(config, cms)
    }

    pub fn with_client(config: SiteConfig, cms: CmsClient) -> Result<Self> {
        Ok(Self {
            config,
            cms,
            renderer: TemplateRenderer::new()?,
        })
    }
}

/// Query string accepted by listing pages
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
    pub search: Option<String>,
}

/// Build the site router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/category/:slug", get(category_handler))
        .route("/article/:slug", get(article_handler))
        .route("/api", get(health_handler))
        .route("/api/", get(health_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(newshub: &NewsHub, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(newshub.config.clone())?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!(api = %newshub.config.api_base_url, "Using content API");
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page: latest posts, optionally filtered by a search term
async fn home_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Response {
    let page = parse_page(params.page.as_deref());
    let query = PostQuery::new(page)
        .with_per_page(state.config.per_page)
        .with_search(params.search.as_deref());

    let (result, categories) =
        tokio::join!(state.cms.fetch_posts(&query), state.cms.fetch_categories());

    let search = query.search.as_deref();
    let mut context = base_context(&state, &categories, search);
    context.insert("posts", &post_cards(&state, &result.items));
    context.insert("pagination", &PaginationData::new("/", &result, search));

    render(&state, "home.html", &context, StatusCode::OK)
}

/// Category page: posts filed under one category
async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<ListingParams>,
) -> Response {
    let Some(category) = state.cms.fetch_category_by_slug(&slug).await else {
        return not_found(&state, "We couldn't find that category.");
    };

    let page = parse_page(params.page.as_deref());
    let query = PostQuery::new(page)
        .with_per_page(state.config.per_page)
        .with_category(Some(category.id));

    let (result, categories) =
        tokio::join!(state.cms.fetch_posts(&query), state.cms.fetch_categories());

    let base = helpers::category_url(&category.slug);
    let mut context = base_context(&state, &categories, None);
    context.insert("category", &CategoryData::from(&category));
    context.insert("posts", &post_cards(&state, &result.items));
    context.insert("pagination", &PaginationData::new(&base, &result, None));

    render(&state, "category.html", &context, StatusCode::OK)
}

/// Article page
async fn article_handler(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    let (post, categories) = tokio::join!(
        state.cms.fetch_post_by_slug(&slug),
        state.cms.fetch_categories()
    );

    let Some(post) = post else {
        return not_found(&state, "We couldn't find that article.");
    };

    let mut context = base_context(&state, &categories, None);
    context.insert("article", &ArticleData::new(&post, &state.config.date_format));

    render(&state, "article.html", &context, StatusCode::OK)
}

/// Liveness probe
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "NewsHub API is running",
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn not_found_handler(State(state): State<Arc<AppState>>) -> Response {
    not_found(&state, "The page you are looking for does not exist.")
}

fn not_found(state: &AppState, message: &str) -> Response {
    let mut context = base_context(state, &[], None);
    context.insert("message", message);
    render(state, "not_found.html", &context, StatusCode::NOT_FOUND)
}

/// Context shared by every page: site info, navigation and the search box
fn base_context(state: &AppState, categories: &[Category], search: Option<&str>) -> Context {
    let nav: Vec<CategoryLink> = categories.iter().map(CategoryLink::from).collect();

    let mut context = Context::new();
    context.insert("site", &SiteData::from(&state.config));
    context.insert("nav_categories", &nav);
    context.insert("current_year", &Utc::now().year());
    context.insert("search", &helpers::html_escape(search.unwrap_or_default()));
    context
}

fn post_cards(state: &AppState, posts: &[Post]) -> Vec<PostCard> {
    posts
        .iter()
        .map(|post| PostCard::new(post, &state.config.date_format))
        .collect()
}

fn render(state: &AppState, template: &str, context: &Context, status: StatusCode) -> Response {
    match state.renderer.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(template, error = %e, "Template rendering failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
