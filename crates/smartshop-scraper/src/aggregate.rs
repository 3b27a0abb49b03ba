//! Concurrent fan-out of one search across every storefront.

use std::sync::Arc;

use futures::future::join_all;
use smartshop_core::{Listing, Platform};
use tokio::task::JoinHandle;

use crate::adapter::{default_adapters, SiteAdapter};
use crate::error::ScraperError;
use crate::fetch::{Fetcher, FetcherConfig};
use crate::outcome::{EmptyCause, SiteOutcome};

/// Runs a query against every configured [`SiteAdapter`] and merges the
/// results into one price-ordered list.
#[derive(Debug, Clone)]
pub struct Aggregator {
    adapters: Vec<Arc<SiteAdapter>>,
    config: FetcherConfig,
}

impl Aggregator {
    /// Builds an aggregator over all supported storefronts.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if a built-in site profile fails to compile.
    pub fn new(config: FetcherConfig) -> Result<Self, ScraperError> {
        Ok(Self::with_adapters(config, default_adapters()?))
    }

    /// Builds an aggregator over an explicit adapter set. Results are
    /// concatenated in the order given here before sorting.
    #[must_use]
    pub fn with_adapters(config: FetcherConfig, adapters: Vec<SiteAdapter>) -> Self {
        Self {
            adapters: adapters.into_iter().map(Arc::new).collect(),
            config,
        }
    }

    #[must_use]
    pub fn adapters(&self) -> impl Iterator<Item = &SiteAdapter> {
        self.adapters.iter().map(|adapter| &**adapter)
    }

    /// Searches every site concurrently and returns the union sorted by
    /// price ascending.
    ///
    /// A site that is blocked, times out, fails to parse, or panics
    /// contributes nothing; it never fails the search.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] only if the HTTP client for this
    /// invocation cannot be built.
    pub async fn search(&self, query: &str) -> Result<Vec<Listing>, ScraperError> {
        let fetcher = Fetcher::new(&self.config)?;

        let tasks = self
            .adapters
            .iter()
            .map(|adapter| {
                let platform = adapter.platform();
                let adapter = Arc::clone(adapter);
                let fetcher = fetcher.clone();
                let query = query.to_owned();
                let handle =
                    tokio::spawn(async move { search_site(&fetcher, &adapter, &query).await });
                (platform, handle)
            })
            .collect();

        let listings = merge_outcomes(join_sites(tasks).await);
        tracing::info!(query, count = listings.len(), "search complete");
        Ok(listings)
    }
}

async fn search_site(fetcher: &Fetcher, adapter: &SiteAdapter, query: &str) -> SiteOutcome {
    let platform = adapter.platform();
    let url = adapter.build_search_url(query);
    tracing::debug!(%platform, url = %url, "searching site");

    let outcome = match fetcher.fetch(platform, &url).await {
        Ok(body) => SiteOutcome::from_listings(adapter.parse_listings(&body)),
        Err(cause) => SiteOutcome::Empty(cause),
    };

    if let SiteOutcome::Listings(listings) = &outcome {
        tracing::info!(%platform, count = listings.len(), "site returned listings");
    }
    outcome
}

/// Waits for every site task. A task that panicked or was cancelled becomes
/// [`EmptyCause::TaskFailed`] for its site; the other tasks are unaffected.
pub(crate) async fn join_sites(
    tasks: Vec<(Platform, JoinHandle<SiteOutcome>)>,
) -> Vec<(Platform, SiteOutcome)> {
    let (platforms, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
    join_all(handles)
        .await
        .into_iter()
        .zip(platforms)
        .map(|(joined, platform)| match joined {
            Ok(outcome) => (platform, outcome),
            Err(e) => {
                tracing::error!(%platform, error = %e, "site task failed");
                (platform, SiteOutcome::Empty(EmptyCause::TaskFailed))
            }
        })
        .collect()
}

/// Concatenates per-site outcomes in the given order and sorts by price.
///
/// The sort is stable, so same-priced listings keep their site order.
#[must_use]
pub fn merge_outcomes(outcomes: Vec<(Platform, SiteOutcome)>) -> Vec<Listing> {
    let mut merged: Vec<Listing> = outcomes
        .into_iter()
        .flat_map(|(platform, outcome)| {
            if let Some(cause) = outcome.cause() {
                tracing::warn!(%platform, cause = %cause, "site contributed no listings");
            }
            outcome.into_listings()
        })
        .collect();
    merged.sort_by(|a, b| a.price.cmp(&b.price));
    merged
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn listing(product: &str, price: i64, platform: Platform) -> Listing {
        Listing {
            product: product.to_owned(),
            price: Decimal::from(price),
            platform,
            delivery: 30,
            url: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn merge_sorts_by_price_ascending() {
        let merged = merge_outcomes(vec![
            (
                Platform::Flipkart,
                SiteOutcome::Listings(vec![
                    listing("a", 300, Platform::Flipkart),
                    listing("b", 100, Platform::Flipkart),
                ]),
            ),
            (
                Platform::Amazon,
                SiteOutcome::Listings(vec![listing("c", 200, Platform::Amazon)]),
            ),
        ]);
        let prices: Vec<_> = merged.iter().map(|l| l.price).collect();
        assert_eq!(
            prices,
            vec![Decimal::from(100), Decimal::from(200), Decimal::from(300)]
        );
    }

    #[test]
    fn merge_keeps_site_order_for_equal_prices() {
        let merged = merge_outcomes(vec![
            (
                Platform::Flipkart,
                SiteOutcome::Listings(vec![listing("flip", 499, Platform::Flipkart)]),
            ),
            (
                Platform::Amazon,
                SiteOutcome::Listings(vec![listing("amz", 499, Platform::Amazon)]),
            ),
            (
                Platform::Meesho,
                SiteOutcome::Listings(vec![listing("mee", 499, Platform::Meesho)]),
            ),
        ]);
        let platforms: Vec<_> = merged.iter().map(|l| l.platform).collect();
        assert_eq!(
            platforms,
            vec![Platform::Flipkart, Platform::Amazon, Platform::Meesho]
        );
    }

    #[test]
    fn merge_ignores_empty_outcomes() {
        let merged = merge_outcomes(vec![
            (Platform::Flipkart, SiteOutcome::Empty(EmptyCause::Blocked)),
            (
                Platform::Amazon,
                SiteOutcome::Listings(vec![listing("only", 10, Platform::Amazon)]),
            ),
            (Platform::Meesho, SiteOutcome::Empty(EmptyCause::TaskFailed)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].product, "only");
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(merge_outcomes(Vec::new()).is_empty());
    }

    async fn exploding_site() -> SiteOutcome {
        panic!("selector table exploded")
    }

    #[tokio::test]
    async fn panicking_site_task_becomes_task_failed_without_cancelling_siblings() {
        let tasks = vec![
            (
                Platform::Flipkart,
                tokio::spawn(async {
                    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                    SiteOutcome::Listings(vec![listing("slow", 20, Platform::Flipkart)])
                }),
            ),
            (
                Platform::Amazon,
                tokio::spawn(exploding_site()),
            ),
            (
                Platform::Meesho,
                tokio::spawn(async {
                    SiteOutcome::Listings(vec![listing("fast", 10, Platform::Meesho)])
                }),
            ),
        ];

        let outcomes = join_sites(tasks).await;

        let causes: Vec<_> = outcomes.iter().map(|(p, o)| (*p, o.cause())).collect();
        assert_eq!(
            causes,
            vec![
                (Platform::Flipkart, None),
                (Platform::Amazon, Some(EmptyCause::TaskFailed)),
                (Platform::Meesho, None),
            ]
        );

        let merged = merge_outcomes(outcomes);
        let products: Vec<_> = merged.iter().map(|l| l.product.as_str()).collect();
        assert_eq!(products, vec!["fast", "slow"]);
    }

    #[tokio::test]
    async fn aborted_site_task_becomes_task_failed() {
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            SiteOutcome::Empty(EmptyCause::Timeout)
        });
        handle.abort();

        let outcomes = join_sites(vec![(Platform::Meesho, handle)]).await;

        assert_eq!(
            outcomes,
            vec![(Platform::Meesho, SiteOutcome::Empty(EmptyCause::TaskFailed))]
        );
    }

    #[test]
    fn default_aggregator_covers_every_supported_site() {
        let aggregator = Aggregator::new(FetcherConfig::default()).unwrap();
        let platforms: Vec<_> = aggregator.adapters().map(SiteAdapter::platform).collect();
        assert_eq!(
            platforms,
            vec![Platform::Flipkart, Platform::Amazon, Platform::Meesho]
        );
    }
}
