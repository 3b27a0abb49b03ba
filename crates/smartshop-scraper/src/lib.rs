pub mod adapter;
pub mod aggregate;
pub mod backend;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod outcome;
pub mod price;

pub use adapter::{default_adapters, SiteAdapter, SiteProfile, SUPPORTED_SITES};
pub use aggregate::{merge_outcomes, Aggregator};
pub use backend::SearchBackend;
pub use error::ScraperError;
pub use fetch::{Fetcher, FetcherConfig};
pub use normalize::QueryNormalizer;
pub use outcome::{EmptyCause, SiteOutcome};
pub use price::extract_price;
