//! Free-text matching against the offline catalog with unit synonyms.
//!
//! A query matches a catalog entry when every whitespace-separated term is
//! found in the lowercased product name, either directly or after rewriting
//! a unit spelling (`500g`, `500 grams`, `500ml`) to a canonical unit.

use smartshop_core::{builtin_catalog, Listing};

/// Canonical unit and the spellings rewritten to it, tried in this order.
/// The canonical unit itself is tried after its variants.
const UNIT_GROUPS: [(&str, &[&str]); 2] = [
    (
        "gms",
        &["g", "gm", "gram", "grams", "ml", "milliliter", "millilitre"],
    ),
    (
        "ml",
        &[
            "milliliter",
            "millilitre",
            "milliliters",
            "millilitres",
            "g",
            "gm",
            "gms",
            "gram",
        ],
    ),
];

/// Filters a fixed catalog by query terms.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    catalog: Vec<Listing>,
}

impl QueryNormalizer {
    #[must_use]
    pub fn new(catalog: Vec<Listing>) -> Self {
        Self { catalog }
    }

    /// Normalizer over the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_catalog())
    }

    #[must_use]
    pub fn catalog(&self) -> &[Listing] {
        &self.catalog
    }

    /// Returns every catalog entry matching all terms of `query`, in catalog
    /// order. A query with no terms returns the full catalog.
    #[must_use]
    pub fn normalize(&self, query: &str) -> Vec<Listing> {
        let query = query.to_lowercase();
        let terms: Vec<&str> = query.split_whitespace().collect();
        if terms.is_empty() {
            return self.catalog.clone();
        }

        let matched: Vec<Listing> = self
            .catalog
            .iter()
            .filter(|entry| {
                let product = entry.product.to_lowercase();
                terms.iter().all(|term| term_matches(term, &product))
            })
            .cloned()
            .collect();
        tracing::debug!(query = %query, matched = matched.len(), "catalog search");
        matched
    }
}

/// `term` and `product` must already be lowercase.
fn term_matches(term: &str, product: &str) -> bool {
    if product.contains(term) {
        return true;
    }
    UNIT_GROUPS.iter().any(|&(unit, variants)| {
        variants
            .iter()
            .copied()
            .chain(std::iter::once(unit))
            .filter(|variant| term.contains(variant))
            .any(|variant| {
                let term = term.replace(variant, unit);
                product.replace(variant, unit).contains(&term)
            })
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
