use smartshop_core::{ConfigError, Platform};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid selector \"{selector}\" for {platform}: {reason}")]
    InvalidSelector {
        platform: Platform,
        selector: &'static str,
        reason: String,
    },

    #[error("invalid base URL \"{base_url}\" for {platform}: {reason}")]
    InvalidBaseUrl {
        platform: Platform,
        base_url: String,
        reason: String,
    },

    #[error("catalog unavailable: {0}")]
    Catalog(#[from] ConfigError),
}
