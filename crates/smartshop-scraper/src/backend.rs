//! Search source selection shared by the server and the CLI.

use smartshop_core::{load_catalog, AppConfig, Listing, SearchSource};

use crate::aggregate::Aggregator;
use crate::error::ScraperError;
use crate::fetch::FetcherConfig;
use crate::normalize::QueryNormalizer;

/// Answers searches from live storefronts or from the offline catalog.
#[derive(Debug)]
pub enum SearchBackend {
    Live(Aggregator),
    Catalog(QueryNormalizer),
}

impl SearchBackend {
    /// Builds the backend selected by `SMARTSHOP_SEARCH_SOURCE`.
    ///
    /// # Errors
    ///
    /// See [`SearchBackend::for_source`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::for_source(config, config.search_source)
    }

    /// Builds a backend for `source`, taking scraper settings and the
    /// optional catalog path from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Catalog`] if the configured catalog file cannot
    /// be read or fails validation, or a compile error from a site profile.
    pub fn for_source(config: &AppConfig, source: SearchSource) -> Result<Self, ScraperError> {
        match source {
            SearchSource::Live => Ok(Self::Live(Aggregator::new(
                FetcherConfig::from_app_config(config),
            )?)),
            SearchSource::Catalog => {
                let normalizer = match &config.catalog_path {
                    Some(path) => {
                        let catalog = load_catalog(path)?;
                        tracing::info!(path = %path.display(), entries = catalog.len(), "loaded catalog file");
                        QueryNormalizer::new(catalog)
                    }
                    None => QueryNormalizer::builtin(),
                };
                Ok(Self::Catalog(normalizer))
            }
        }
    }

    #[must_use]
    pub fn source(&self) -> SearchSource {
        match self {
            Self::Live(_) => SearchSource::Live,
            Self::Catalog(_) => SearchSource::Catalog,
        }
    }

    /// Both sources return results sorted by price ascending.
    ///
    /// # Errors
    ///
    /// Only a live search can fail, and only when its HTTP client cannot be
    /// built.
    pub async fn search(&self, query: &str) -> Result<Vec<Listing>, ScraperError> {
        match self {
            Self::Live(aggregator) => aggregator.search(query).await,
            Self::Catalog(normalizer) => {
                let mut results = normalizer.normalize(query);
                results.sort_by(|a, b| a.price.cmp(&b.price));
                Ok(results)
            }
        }
    }
}
