//! Initialize a new NewsHub site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::DEFAULT_API_BASE_URL;

/// Write a default `_config.yml` into the given directory.
///
/// An existing configuration is left untouched; returns whether a file was
/// written.
pub fn init_site(target_dir: &Path) -> Result<bool> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::warn!("{:?} already exists, leaving it unchanged", config_path);
        return Ok(false);
    }

    let config_content = format!(
        r#"# NewsHub Configuration

# Site
title: NewsHub
subtitle: Latest stories, fresh from the newsroom
description: ''

# Content API
## Base URL of a WordPress REST API (the /wp-json/wp/v2 namespace).
## WORDPRESS_API_URL or --api-url override this value.
api_base_url: {api}
request_timeout_secs: 10

# Response cache (seconds)
cache_enabled: true
posts_revalidate_secs: 60
categories_revalidate_secs: 3600

# Pagination
per_page: 9

# Date format
date_format: MMMM DD, YYYY

# Server
server:
  ip: localhost
  port: 4000
"#,
        api = DEFAULT_API_BASE_URL
    );

    fs::write(&config_path, config_content)?;
    tracing::info!("Created {:?}", config_path);

    Ok(true)
}
