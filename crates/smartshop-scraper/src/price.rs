//! Price text extraction shared by every site adapter.
//!
//! Storefront price strings come in a few shapes: `"₹1,299"`, `"Rs. 499"`,
//! `"from ₹199"`, `"₹99.50"`. All of them reduce to a whole-unit integer.

use rust_decimal::Decimal;

/// Currency marker used by every supported storefront.
pub const RUPEE: &str = "₹";

/// Words that may precede the amount, as in `"from ₹199"`.
const QUALIFIERS: [&str; 1] = ["from"];

/// Prefixes stripped along with [`RUPEE`].
const CURRENCY_PREFIXES: [&str; 2] = [RUPEE, "rs."];

/// Extracts a whole-unit price from storefront text.
///
/// Strips currency markers, thousands separators, and whitespace. When a
/// qualifier such as `"from"` is present only the text after its last
/// occurrence is kept. The fractional part is truncated, not rounded.
///
/// Returns [`Decimal::ZERO`] when anything other than digits remains. Zero
/// means "unparseable" to callers; it is never a real price.
#[must_use]
pub fn extract_price(text: &str) -> Decimal {
    let mut lower = text.to_lowercase();

    for qualifier in QUALIFIERS {
        if let Some(pos) = lower.rfind(qualifier) {
            lower = lower[pos + qualifier.len()..].to_owned();
        }
    }

    for prefix in CURRENCY_PREFIXES {
        lower = lower.replace(prefix, "");
    }

    let compact: String = lower
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let whole = compact.split('.').next().unwrap_or_default();
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Decimal::ZERO;
    }

    whole.parse::<u64>().map_or(Decimal::ZERO, Decimal::from)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
