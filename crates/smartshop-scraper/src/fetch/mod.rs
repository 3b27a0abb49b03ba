//! One-shot HTTP GET with outcome classification.

mod headers;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use smartshop_core::{AppConfig, Platform};

use crate::error::ScraperError;
use crate::outcome::EmptyCause;

pub use headers::{profile_for, RequestProfile};

/// Connection timeout, separate from the total request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Total timeout for one request, body included.
    pub timeout_secs: u64,
    pub pool_max_idle_per_host: usize,
    /// Delay before requests to throttled sites. `0` disables it.
    pub throttle_delay_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            pool_max_idle_per_host: 10,
            throttle_delay_ms: 1_000,
        }
    }
}

impl FetcherConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.scraper_request_timeout_secs,
            pool_max_idle_per_host: config.scraper_pool_max_idle,
            throttle_delay_ms: config.scraper_throttle_delay_ms,
        }
    }
}

/// Issues storefront GET requests and classifies every failure.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    throttle_delay: Duration,
}

impl Fetcher {
    /// Builds a client with the configured timeouts, pool bound, and rustls
    /// using the bundled web PKI roots.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &FetcherConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(
                CONNECT_TIMEOUT_SECS.min(config.timeout_secs),
            ))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()?;
        Ok(Self {
            client,
            throttle_delay: Duration::from_millis(config.throttle_delay_ms),
        })
    }

    /// Fetches `url` with `platform`'s header profile.
    ///
    /// Returns the body on HTTP 200. Every other result is logged and
    /// reported as an [`EmptyCause`]; this never panics or propagates an error.
    pub async fn fetch(&self, platform: Platform, url: &str) -> Result<String, EmptyCause> {
        let profile = profile_for(platform);
        if profile.throttled && !self.throttle_delay.is_zero() {
            tokio::time::sleep(self.throttle_delay).await;
        }

        let request = self
            .client
            .get(url)
            .headers(headers::build_headers(profile, headers::random_user_agent()));

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(transport_failure(platform, url, &e)),
        };

        match response.status() {
            StatusCode::OK => match response.text().await {
                Ok(body) => {
                    tracing::info!(%platform, url, bytes = body.len(), "fetched search page");
                    Ok(body)
                }
                Err(e) => Err(transport_failure(platform, url, &e)),
            },
            StatusCode::FORBIDDEN => {
                tracing::error!(%platform, url, "access forbidden (403); the site may be blocking requests");
                Err(EmptyCause::Blocked)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::error!(%platform, url, "too many requests (429)");
                Err(EmptyCause::RateLimited)
            }
            status => {
                tracing::error!(%platform, url, status = status.as_u16(), "unexpected HTTP status");
                Err(EmptyCause::Failed {
                    status: status.as_u16(),
                })
            }
        }
    }
}

fn transport_failure(platform: Platform, url: &str, error: &reqwest::Error) -> EmptyCause {
    if error.is_timeout() {
        tracing::error!(%platform, url, error = %error, "timed out fetching search page");
        EmptyCause::Timeout
    } else {
        tracing::error!(%platform, url, error = %error, "network error fetching search page");
        EmptyCause::NetworkError
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_bounds() {
        let config = FetcherConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert_eq!(config.throttle_delay_ms, 1_000);
    }

    #[test]
    fn fetcher_builds_from_default_config() {
        assert!(Fetcher::new(&FetcherConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let config = FetcherConfig {
            timeout_secs: 2,
            pool_max_idle_per_host: 1,
            throttle_delay_ms: 0,
        };
        let fetcher = Fetcher::new(&config).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let result = fetcher
            .fetch(Platform::Flipkart, "http://127.0.0.1:9/search?q=milk")
            .await;
        assert!(matches!(
            result,
            Err(EmptyCause::NetworkError | EmptyCause::Timeout)
        ));
    }
}
