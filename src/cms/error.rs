//! Errors raised while talking to the CMS
//!
//! These never reach page handlers: the public fetch methods fold them into
//! empty or not-found values and report them through `tracing`.

/// Errors from the WordPress REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// The configured base URL or a derived endpoint is not a valid URL.
    #[error("invalid CMS URL: {0}")]
    InvalidUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The CMS returned a non-2xx status code.
    #[error("CMS returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The body did not match the expected shape.
    #[error("could not decode CMS response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CmsError {
    /// Short label separating transport problems from decoding problems in logs
    pub fn kind(&self) -> &'static str {
        match self {
            CmsError::InvalidUrl(_) => "config",
            CmsError::Transport(_) | CmsError::Status { .. } => "transport",
            CmsError::Decode { .. } => "decode",
        }
    }

    /// Report a failure that is about to be folded into an empty value
    pub(crate) fn report(&self, operation: &'static str) {
        match self {
            CmsError::Decode { url, source } => tracing::error!(
                operation,
                kind = self.kind(),
                url = %url,
                error = %source,
                "CMS response could not be decoded"
            ),
            CmsError::Status { status, url } => tracing::warn!(
                operation,
                kind = self.kind(),
                url = %url,
                status,
                "CMS returned a non-success status"
            ),
            CmsError::Transport(e) => tracing::warn!(
                operation,
                kind = self.kind(),
                timeout = e.is_timeout(),
                error = %e,
                "CMS request failed"
            ),
            CmsError::InvalidUrl(e) => tracing::error!(
                operation,
                kind = self.kind(),
                error = %e,
                "CMS endpoint URL is invalid"
            ),
        }
    }
}
