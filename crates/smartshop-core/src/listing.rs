use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Storefront a [`Listing`] came from.
///
/// `Flipkart`, `Amazon`, and `Meesho` are scraped live. `BigBasket` and
/// `Grofers` only appear in the offline catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Flipkart,
    Amazon,
    Meesho,
    BigBasket,
    Grofers,
}

impl Platform {
    /// Lowercase identifier used in log fields and CLI output.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Platform::Flipkart => "flipkart",
            Platform::Amazon => "amazon",
            Platform::Meesho => "meesho",
            Platform::BigBasket => "bigbasket",
            Platform::Grofers => "grofers",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Flipkart => "Flipkart",
            Platform::Amazon => "Amazon",
            Platform::Meesho => "Meesho",
            Platform::BigBasket => "BigBasket",
            Platform::Grofers => "Grofers",
        };
        f.write_str(name)
    }
}

/// One normalized product search result from one storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// Display name, never empty for an emitted listing.
    pub product: String,
    /// Price in whole currency units. Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub platform: Platform,
    /// Estimated delivery time in minutes; the storefront default when unknown.
    pub delivery: u32,
    /// Absolute product link; empty when the page did not expose one.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Listing {
    /// `true` when the listing may be handed to a caller: a non-empty name
    /// and a strictly positive price.
    #[must_use]
    pub fn is_emittable(&self) -> bool {
        !self.product.trim().is_empty() && self.price > Decimal::ZERO
    }
}

/// Body of a successful search response: `{"results": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Listing>,
}
