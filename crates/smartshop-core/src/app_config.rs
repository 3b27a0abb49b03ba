use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where search results come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    /// Scrape the supported storefronts concurrently.
    Live,
    /// Answer from the offline catalog via unit-aware query matching.
    Catalog,
}

impl std::fmt::Display for SearchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchSource::Live => write!(f, "live"),
            SearchSource::Catalog => write!(f, "catalog"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub search_source: SearchSource,
    /// YAML catalog replacing the built-in one; `None` keeps the built-in entries.
    pub catalog_path: Option<PathBuf>,
    pub scraper_request_timeout_secs: u64,
    pub scraper_pool_max_idle: usize,
    /// Delay applied before requests to sites flagged as aggressively rate-limited.
    pub scraper_throttle_delay_ms: u64,
    pub rate_limit_per_minute: usize,
}
