//! A fake WordPress REST API for integration tests.
//!
//! Serves canned responses on a random local port and records every query
//! it receives, so tests can assert on what the client actually sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use newshub::cms::{CmsClient, CmsOptions};
use serde_json::{json, Value};

/// REST namespace the fake is mounted under
pub const NAMESPACE: &str = "/wp-json/wp/v2";

/// A canned upstream response
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
    pub headers: Vec<(&'static str, String)>,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn json(body: Value) -> Self {
        Self::raw(&body.to_string())
    }

    pub fn raw(body: &str) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.to_string(),
            headers: Vec::new(),
            delay: None,
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Self {
            status,
            ..Self::raw(r#"{"code":"rest_error","message":"upstream failure"}"#)
        }
    }

    pub fn with_totals(self, total: &str, total_pages: &str) -> Self {
        self.with_header("x-wp-total", total)
            .with_header("x-wp-totalpages", total_pages)
    }

    pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request seen by the fake
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: HashMap<String, String>,
}

struct FakeState {
    routes: HashMap<String, Canned>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct FakeWordPress {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeWordPress {
    /// Start the fake with routes keyed by path (`/posts`) or by path and
    /// slug (`/posts?slug=hello`). Slug lookups with no matching route answer
    /// with an empty list, like WordPress does.
    pub async fn start(routes: Vec<(&str, Canned)>) -> Self {
        let state = Arc::new(FakeState {
            routes: routes
                .into_iter()
                .map(|(key, canned)| (key.to_string(), canned))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(respond).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}{NAMESPACE}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// A client without response caching
    pub fn client(&self) -> CmsClient {
        client_for(&self.base_url, false)
    }

    /// A client with the default revalidation windows
    pub fn cached_client(&self) -> CmsClient {
        client_for(&self.base_url, true)
    }
}

pub fn client_for(base_url: &str, cache_enabled: bool) -> CmsClient {
    CmsClient::new(CmsOptions {
        api_base_url: base_url.to_string(),
        timeout: Duration::from_millis(500),
        cache_enabled,
        ..Default::default()
    })
    .unwrap()
}

/// A client pointed at a port nothing listens on
pub fn unreachable_client() -> CmsClient {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    client_for(&format!("http://{addr}{NAMESPACE}"), false)
}

async fn respond(
    State(state): State<Arc<FakeState>>,
    Query(query): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(NAMESPACE)
        .unwrap_or(uri.path())
        .to_string();

    state.requests.lock().unwrap().push(Recorded {
        path: path.clone(),
        query: query.clone(),
    });

    let canned = match query.get("slug") {
        Some(slug) => state.routes.get(&format!("{path}?slug={slug}")),
        None => state.routes.get(&path),
    };

    let Some(canned) = canned.cloned() else {
        return if query.contains_key("slug") {
            (StatusCode::OK, "[]").into_response()
        } else {
            (StatusCode::NOT_FOUND, r#"{"code":"rest_no_route"}"#).into_response()
        };
    };

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let mut response = (canned.status, canned.body).into_response();
    for (name, value) in canned.headers {
        response.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(&value).unwrap(),
        );
    }
    response
}

// ---- fixtures ----

pub fn post_json(id: u64, slug: &str, title: &str) -> Value {
    json!({
        "id": id,
        "date": "2024-01-15T10:30:00",
        "slug": slug,
        "title": {"rendered": title},
        "content": {"rendered": format!("<p>{}</p>", "word ".repeat(250)), "protected": false},
        "excerpt": {"rendered": format!("<p>Summary of {title}</p>"), "protected": false},
        "categories": [3],
        "_embedded": {
            "author": [{"id": 1, "name": "Jane Reporter"}],
            "wp:featuredmedia": [{"id": 7, "source_url": format!("https://cdn.example.com/{slug}.jpg"), "alt_text": ""}],
            "wp:term": [
                [{"id": 3, "name": "Technology", "slug": "tech", "taxonomy": "category"}],
                [{"id": 11, "name": "AI", "slug": "ai", "taxonomy": "post_tag"}]
            ]
        }
    })
}

pub fn category_json(id: u64, slug: &str, name: &str) -> Value {
    json!({
        "id": id,
        "count": 4,
        "description": format!("All about {name}"),
        "name": name,
        "slug": slug,
        "parent": 0
    })
}
