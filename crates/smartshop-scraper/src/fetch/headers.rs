//! Browser-like request headers per storefront.
//!
//! This is best-effort mimicry to get past trivial bot filters. It lives
//! behind the fetcher so adapters and the aggregator never depend on it.

use rand::seq::IndexedRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use smartshop_core::Platform;

pub(crate) const USER_AGENTS: [&str; 6] = [
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:122.0) Gecko/20100101 Firefox/122.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36 Edg/121.0.0.0",
];

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";
const SEC_CH_UA: &str = r#""Not A(Brand";v="99", "Google Chrome";v="121", "Chromium";v="121""#;

/// Sent with every request before the site profile is applied.
const BASE_HEADERS: [(&str, &str); 7] = [
    ("upgrade-insecure-requests", "1"),
    ("cache-control", "max-age=0"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-user", "?1"),
    ("sec-fetch-dest", "document"),
    ("accept-language", ACCEPT_LANGUAGE),
];

/// Site-specific request shaping.
#[derive(Debug)]
pub struct RequestProfile {
    /// Header overrides applied on top of the base set.
    pub headers: &'static [(&'static str, &'static str)],
    /// Whether the site gets the fetcher's pre-request throttle delay.
    pub throttled: bool,
}

static FLIPKART: RequestProfile = RequestProfile {
    headers: &[
        ("accept", ACCEPT_HTML),
        ("accept-language", ACCEPT_LANGUAGE),
        ("referer", "https://www.flipkart.com/"),
        ("sec-ch-ua", SEC_CH_UA),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"macOS\""),
    ],
    throttled: false,
};

static AMAZON: RequestProfile = RequestProfile {
    headers: &[
        ("accept", ACCEPT_HTML),
        ("accept-language", ACCEPT_LANGUAGE),
        ("referer", "https://www.amazon.in/"),
        ("sec-ch-ua", SEC_CH_UA),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"macOS\""),
        ("cookie", "i18n-prefs=INR"),
    ],
    throttled: false,
};

static MEESHO: RequestProfile = RequestProfile {
    headers: &[
        ("accept", ACCEPT_HTML),
        ("accept-language", ACCEPT_LANGUAGE),
        ("referer", "https://www.meesho.com/"),
        ("sec-ch-ua", SEC_CH_UA),
        ("sec-ch-ua-mobile", "?0"),
        ("sec-ch-ua-platform", "\"macOS\""),
        ("dnt", "1"),
        ("sec-fetch-site", "same-origin"),
    ],
    throttled: true,
};

/// Catalog-only platforms are never fetched; they share the plain profile.
static PLAIN: RequestProfile = RequestProfile {
    headers: &[("accept", ACCEPT_HTML)],
    throttled: false,
};

#[must_use]
pub fn profile_for(platform: Platform) -> &'static RequestProfile {
    match platform {
        Platform::Flipkart => &FLIPKART,
        Platform::Amazon => &AMAZON,
        Platform::Meesho => &MEESHO,
        Platform::BigBasket | Platform::Grofers => &PLAIN,
    }
}

/// Picks a user agent at random for one request.
pub(crate) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Base headers, then profile overrides, then the user agent.
pub(crate) fn build_headers(profile: &RequestProfile, user_agent: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for &(name, value) in BASE_HEADERS.iter().chain(profile.headers) {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(user_agent),
    );
    headers
}
