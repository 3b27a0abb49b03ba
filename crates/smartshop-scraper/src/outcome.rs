//! Classified result of one site's fetch-and-parse cycle.

use smartshop_core::Listing;

/// Why a site contributed no listings to a search.
///
/// These are expected operational conditions. They are logged but never
/// propagated to the caller as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyCause {
    /// HTTP 403: the site refused the request.
    Blocked,
    /// HTTP 429.
    RateLimited,
    /// The request exceeded the fetcher's total timeout.
    Timeout,
    /// Connection, TLS, or body-read failure.
    NetworkError,
    /// Any other non-200 status.
    Failed { status: u16 },
    /// The page loaded but no container yielded a listing.
    ParseEmpty,
    /// The site task panicked or was aborted before producing an outcome.
    TaskFailed,
}

impl std::fmt::Display for EmptyCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyCause::Blocked => write!(f, "blocked"),
            EmptyCause::RateLimited => write!(f, "rate-limited"),
            EmptyCause::Timeout => write!(f, "timeout"),
            EmptyCause::NetworkError => write!(f, "network-error"),
            EmptyCause::Failed { status } => write!(f, "failed (HTTP {status})"),
            EmptyCause::ParseEmpty => write!(f, "parse-empty"),
            EmptyCause::TaskFailed => write!(f, "task-failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteOutcome {
    Listings(Vec<Listing>),
    Empty(EmptyCause),
}

impl SiteOutcome {
    /// Wraps parsed listings, tagging an empty page as [`EmptyCause::ParseEmpty`].
    #[must_use]
    pub fn from_listings(listings: Vec<Listing>) -> Self {
        if listings.is_empty() {
            SiteOutcome::Empty(EmptyCause::ParseEmpty)
        } else {
            SiteOutcome::Listings(listings)
        }
    }

    #[must_use]
    pub fn cause(&self) -> Option<EmptyCause> {
        match self {
            SiteOutcome::Listings(_) => None,
            SiteOutcome::Empty(cause) => Some(*cause),
        }
    }

    /// Consumes the outcome; every empty cause contributes nothing.
    #[must_use]
    pub fn into_listings(self) -> Vec<Listing> {
        match self {
            SiteOutcome::Listings(listings) => listings,
            SiteOutcome::Empty(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_listings_tags_empty_page() {
        let outcome = SiteOutcome::from_listings(Vec::new());
        assert_eq!(outcome.cause(), Some(EmptyCause::ParseEmpty));
        assert!(outcome.into_listings().is_empty());
    }

    #[test]
    fn failed_cause_displays_status() {
        assert_eq!(
            EmptyCause::Failed { status: 503 }.to_string(),
            "failed (HTTP 503)"
        );
    }
}
