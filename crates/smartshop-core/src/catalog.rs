//! Offline product catalog used when live scraping is disabled.
//!
//! The built-in entries cover a handful of dairy staples; a YAML file with
//! the same shape can replace them:
//!
//! ```yaml
//! catalog:
//!   - product: Amul Taaza Milk 500ml
//!     price: 25.0
//!     platform: BigBasket
//!     delivery: 30
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::listing::{Listing, Platform};
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub catalog: Vec<Listing>,
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Vec<Listing>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CatalogFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CatalogFileParse)?;

    validate_catalog(&file.catalog)?;

    Ok(file.catalog)
}

fn validate_catalog(entries: &[Listing]) -> Result<(), ConfigError> {
    for (idx, entry) in entries.iter().enumerate() {
        if entry.product.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "catalog entry {idx} has an empty product name"
            )));
        }
        if entry.price <= Decimal::ZERO {
            return Err(ConfigError::Validation(format!(
                "catalog entry '{}' must have a positive price, got {}",
                entry.product, entry.price
            )));
        }
    }
    Ok(())
}

/// The catalog shipped with the binary.
#[must_use]
pub fn builtin_catalog() -> Vec<Listing> {
    const ENTRIES: [(&str, i64, Platform, u32); 10] = [
        ("Amul Gold Milk 500ml", 30, Platform::BigBasket, 30),
        ("Amul Gold Milk 500ml", 32, Platform::Grofers, 45),
        ("Amul Taaza Milk 500ml", 25, Platform::BigBasket, 30),
        ("Amul Taaza Milk 500ml", 26, Platform::Grofers, 45),
        ("Amul Butter 500g", 250, Platform::BigBasket, 30),
        ("Amul Butter 500g", 245, Platform::Grofers, 45),
        ("Mother Dairy Full Cream Milk 500ml", 28, Platform::BigBasket, 30),
        ("Mother Dairy Full Cream Milk 500ml", 27, Platform::Grofers, 45),
        ("Mother Dairy Toned Milk 500ml", 24, Platform::BigBasket, 30),
        ("Mother Dairy Toned Milk 500ml", 23, Platform::Grofers, 45),
    ];

    ENTRIES
        .iter()
        .map(|&(product, price, platform, delivery)| Listing {
            product: product.to_owned(),
            price: Decimal::from(price),
            platform,
            delivery,
            url: String::new(),
            image_url: None,
        })
        .collect()
}
