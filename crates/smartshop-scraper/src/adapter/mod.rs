//! Per-site search URL construction and result-page parsing.
//!
//! A [`SiteAdapter`] is a compiled [`SiteProfile`]: the profile is a static
//! table of selectors and rules, the adapter holds the parsed selectors and
//! the resolved base URL. Adding a storefront means adding a profile.

mod profiles;
pub mod rules;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use smartshop_core::{Listing, Platform};

use crate::error::ScraperError;
use crate::price::extract_price;

pub use profiles::{AMAZON, FLIPKART, MEESHO};
use rules::{AttrMatcher, AttrRule, Exclusion, TextMatcher, TextRule};

/// Containers processed per page; later matches are ignored.
pub const MAX_CONTAINERS: usize = 10;

/// Every storefront scraped by a live search, in result concatenation order.
pub static SUPPORTED_SITES: [&SiteProfile; 3] = [&FLIPKART, &AMAZON, &MEESHO];

/// Characters escaped inside a single query term. Spaces never reach the
/// encoder; terms are joined with the site's separator instead.
const QUERY_TERM: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Static description of one storefront's search page.
#[derive(Debug)]
pub struct SiteProfile {
    pub platform: Platform,
    /// Scheme and host; relative links on result pages resolve against it.
    pub base_url: &'static str,
    pub search_path: &'static str,
    pub query_param: &'static str,
    /// Joins query terms, e.g. `"+"` for `k=amul+milk`.
    pub term_separator: &'static str,
    /// Delivery estimate reported for every listing from this site.
    pub delivery_minutes: u32,
    pub currency: &'static str,
    /// Result container selectors; the first one matching anything wins.
    pub containers: &'static [&'static str],
    pub exclusions: &'static [Exclusion],
    pub name: &'static [TextRule],
    pub price: &'static [TextRule],
    pub link: &'static [AttrRule],
    pub image: &'static [AttrRule],
}

#[derive(Debug)]
pub struct SiteAdapter {
    profile: &'static SiteProfile,
    base_url: Url,
    containers: Vec<(&'static str, Selector)>,
    name: Vec<TextMatcher>,
    price: Vec<TextMatcher>,
    link: Vec<AttrMatcher>,
    image: Vec<AttrMatcher>,
}

impl SiteAdapter {
    /// Compiles `profile` against its production base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] or
    /// [`ScraperError::InvalidBaseUrl`] if the profile table is malformed.
    pub fn new(profile: &'static SiteProfile) -> Result<Self, ScraperError> {
        Self::with_base_url(profile, profile.base_url)
    }

    /// Compiles `profile` but sends searches to, and resolves links against,
    /// `base_url`. Used to point an adapter at a mirror or a local test server.
    ///
    /// # Errors
    ///
    /// Same as [`SiteAdapter::new`].
    pub fn with_base_url(
        profile: &'static SiteProfile,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let platform = profile.platform;
        let base_url = Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            platform,
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let containers = profile
            .containers
            .iter()
            .map(|&raw| rules::compile_selector(platform, raw).map(|sel| (raw, sel)))
            .collect::<Result<Vec<_>, _>>()?;
        let name = compile_text(platform, profile.name)?;
        let price = compile_text(platform, profile.price)?;
        let link = compile_attr(platform, profile.link)?;
        let image = compile_attr(platform, profile.image)?;

        Ok(Self {
            profile,
            base_url,
            containers,
            name,
            price,
            link,
            image,
        })
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.profile.platform
    }

    #[must_use]
    pub fn profile(&self) -> &'static SiteProfile {
        self.profile
    }

    /// Builds the site's search URL for `query`.
    ///
    /// Terms are split on whitespace, percent-encoded, and joined with the
    /// site's separator. Never fails; an empty query yields an empty `q=`.
    #[must_use]
    pub fn build_search_url(&self, query: &str) -> String {
        let terms = query
            .split_whitespace()
            .map(|term| utf8_percent_encode(term, QUERY_TERM).to_string())
            .collect::<Vec<_>>()
            .join(self.profile.term_separator);

        format!(
            "{}{}?{}={}",
            self.base_url.as_str().trim_end_matches('/'),
            self.profile.search_path,
            self.profile.query_param,
            terms
        )
    }

    /// Parses a search results page into listings.
    ///
    /// Returns an empty `Vec` when no container selector matches. Containers
    /// that are excluded or lack a name or positive price are skipped without
    /// affecting the rest of the page.
    #[must_use]
    pub fn parse_listings(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let platform = self.platform();

        let Some((selector, containers)) = self.discover_containers(&document) else {
            tracing::debug!(%platform, "no product containers matched any selector");
            return Vec::new();
        };
        tracing::debug!(
            %platform,
            selector,
            count = containers.len(),
            "found product containers"
        );

        containers
            .into_iter()
            .enumerate()
            .filter_map(|(idx, container)| self.parse_container(idx + 1, container))
            .collect()
    }

    /// First container selector matching at least one element, with up to
    /// [`MAX_CONTAINERS`] of its matches.
    fn discover_containers<'a>(
        &self,
        document: &'a Html,
    ) -> Option<(&'static str, Vec<ElementRef<'a>>)> {
        self.containers.iter().find_map(|(raw, selector)| {
            let matched: Vec<ElementRef<'a>> =
                document.select(selector).take(MAX_CONTAINERS).collect();
            (!matched.is_empty()).then_some((*raw, matched))
        })
    }

    fn parse_container(&self, position: usize, container: ElementRef<'_>) -> Option<Listing> {
        let platform = self.platform();
        let currency = self.profile.currency;

        if let Some(exclusion) = self
            .profile
            .exclusions
            .iter()
            .find(|ex| ex.matches(container))
        {
            tracing::debug!(%platform, position, reason = exclusion.reason, "skipping container");
            return None;
        }

        let Some(product) = self.name.iter().find_map(|m| m.extract(container, currency)) else {
            tracing::debug!(%platform, position, "no product name in container");
            return None;
        };

        let Some(price_text) = self
            .price
            .iter()
            .find_map(|m| m.extract(container, currency))
        else {
            tracing::debug!(%platform, position, "no price text in container");
            return None;
        };

        let price = extract_price(&price_text);
        if price.is_zero() {
            tracing::debug!(%platform, position, price_text = %price_text, "unparseable price");
            return None;
        }

        let url = self
            .link
            .iter()
            .find_map(|m| m.extract(container))
            .and_then(|href| self.resolve(&href))
            .unwrap_or_default();
        let image_url = self
            .image
            .iter()
            .find_map(|m| m.extract(container))
            .and_then(|src| self.resolve(&src));

        let listing = Listing {
            product,
            price,
            platform,
            delivery: self.profile.delivery_minutes,
            url,
            image_url,
        };
        listing.is_emittable().then_some(listing)
    }

    /// Resolves a possibly relative link against the site origin.
    fn resolve(&self, href: &str) -> Option<String> {
        self.base_url.join(href).ok().map(String::from)
    }
}

fn compile_text(platform: Platform, rules: &[TextRule]) -> Result<Vec<TextMatcher>, ScraperError> {
    rules
        .iter()
        .map(|&rule| TextMatcher::compile(platform, rule))
        .collect()
}

fn compile_attr(platform: Platform, rules: &[AttrRule]) -> Result<Vec<AttrMatcher>, ScraperError> {
    rules
        .iter()
        .map(|&rule| AttrMatcher::compile(platform, rule))
        .collect()
}

/// Compiles an adapter for every entry in [`SUPPORTED_SITES`].
///
/// # Errors
///
/// Propagates the first profile compilation failure.
pub fn default_adapters() -> Result<Vec<SiteAdapter>, ScraperError> {
    SUPPORTED_SITES
        .iter()
        .map(|&profile| SiteAdapter::new(profile))
        .collect()
}

#[cfg(test)]
#[path = "../adapter_test.rs"]
mod tests;
