mod app_config;
pub mod catalog;
mod config;
pub mod listing;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, SearchSource};
pub use catalog::{builtin_catalog, load_catalog, CatalogFile};
pub use config::{load_app_config, load_app_config_from_env};
pub use listing::{Listing, Platform, SearchResponse};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[source] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
