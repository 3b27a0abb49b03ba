use rust_decimal::Decimal;
use smartshop_core::Platform;

use super::*;

fn entry(product: &str) -> Listing {
    Listing {
        product: product.to_owned(),
        price: Decimal::from(10),
        platform: Platform::BigBasket,
        delivery: 30,
        url: String::new(),
        image_url: None,
    }
}

fn products(listings: &[Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.product.as_str()).collect()
}

// -----------------------------------------------------------------------
// term_matches
// -----------------------------------------------------------------------

#[test]
fn direct_substring_matches() {
    assert!(term_matches("taaza", "amul taaza milk 500ml"));
}

#[test]
fn grams_in_query_match_ml_in_product() {
    assert!(term_matches("500g", "amul taaza milk 500ml"));
}

#[test]
fn gm_in_query_matches_ml_in_product() {
    assert!(term_matches("500gm", "amul taaza milk 500ml"));
}

#[test]
fn millilitre_in_query_matches_ml_in_product() {
    assert!(term_matches("500millilitre", "amul taaza milk 500ml"));
}

#[test]
fn product_units_are_not_rewritten_on_their_own() {
    assert!(!term_matches("100ml", "amul butter 100g"));
}

#[test]
fn wrong_quantity_does_not_match() {
    assert!(!term_matches("1000g", "amul taaza milk 500ml"));
}

#[test]
fn unrelated_word_does_not_match() {
    assert!(!term_matches("paneer", "amul taaza milk 500ml"));
}

// -----------------------------------------------------------------------
// QueryNormalizer::normalize
// -----------------------------------------------------------------------

#[test]
fn unit_synonym_query_matches_builtin_entry() {
    let matched = QueryNormalizer::builtin().normalize("amul 500g milk");
    assert!(products(&matched).contains(&"Amul Taaza Milk 500ml"));
    assert!(matched
        .iter()
        .all(|l| l.product.to_lowercase().contains("amul")));
}

#[test]
fn empty_query_returns_full_catalog() {
    let normalizer = QueryNormalizer::builtin();
    assert_eq!(normalizer.normalize(""), normalizer.catalog().to_vec());
}

#[test]
fn whitespace_query_returns_full_catalog() {
    let normalizer = QueryNormalizer::builtin();
    assert_eq!(normalizer.normalize("   \t "), normalizer.catalog().to_vec());
}

#[test]
fn every_term_must_match() {
    let normalizer = QueryNormalizer::new(vec![
        entry("Amul Taaza Milk 500ml"),
        entry("Mother Dairy Toned Milk 500ml"),
    ]);
    assert_eq!(
        products(&normalizer.normalize("mother milk")),
        vec!["Mother Dairy Toned Milk 500ml"]
    );
}

#[test]
fn query_is_case_insensitive() {
    let normalizer = QueryNormalizer::new(vec![entry("Amul Butter 100g")]);
    assert_eq!(normalizer.normalize("AMUL BUTTER").len(), 1);
}

#[test]
fn results_keep_catalog_order() {
    let normalizer = QueryNormalizer::new(vec![
        entry("Milk B 500ml"),
        entry("Curd 400g"),
        entry("Milk A 500ml"),
    ]);
    assert_eq!(
        products(&normalizer.normalize("milk")),
        vec!["Milk B 500ml", "Milk A 500ml"]
    );
}

#[test]
fn no_match_returns_empty() {
    assert!(QueryNormalizer::builtin().normalize("laptop").is_empty());
}
