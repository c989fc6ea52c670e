//! newshub: a news site served from a WordPress REST API
//!
//! This crate fetches posts and categories from a WordPress-compatible
//! content API and renders them as a paginated news site with home,
//! category and article pages, using Tera templates embedded in the binary.

pub mod cache;
pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main NewsHub application
#[derive(Clone)]
pub struct NewsHub {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl NewsHub {
    /// Create a new NewsHub instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::load_from_dir(&base_dir)?;

        Ok(Self { config, base_dir })
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Build a CMS client from the configuration
    pub fn cms_client(&self) -> Result<cms::CmsClient> {
        Ok(cms::CmsClient::new(cms::CmsOptions::from(&self.config))?)
    }

    /// Start the HTTP server
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}
