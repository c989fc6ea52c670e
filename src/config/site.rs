//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Public WordPress endpoint used when no API URL is configured
pub const DEFAULT_API_BASE_URL: &str = "https://techcrunch.com/wp-json/wp/v2";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub subtitle: String,
    pub description: String,

    // Content API
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Response cache
    pub cache_enabled: bool,
    pub posts_revalidate_secs: u64,
    pub categories_revalidate_secs: u64,

    // Pagination
    pub per_page: u32,

    // Date format (Moment.js style)
    pub date_format: String,

    // Server
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "NewsHub".to_string(),
            subtitle: "Latest stories, fresh from the newsroom".to_string(),
            description: String::new(),

            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 10,

            cache_enabled: true,
            posts_revalidate_secs: 60,
            categories_revalidate_secs: 3600,

            per_page: 9,

            date_format: "MMMM DD, YYYY".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load `_config.yml` from a directory, falling back to defaults when absent
    pub fn load_from_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");
        if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace the API base URL when an override is supplied.
    ///
    /// Blank overrides are ignored so an empty environment variable does not
    /// wipe out the configured endpoint.
    pub fn override_api_base_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("API base URL overridden: {}", url);
            self.api_base_url = url;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn posts_revalidate(&self) -> Duration {
        Duration::from_secs(self.posts_revalidate_secs)
    }

    pub fn categories_revalidate(&self) -> Duration {
        Duration::from_secs(self.categories_revalidate_secs)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}
