//! `search` and `sites` command handlers.

use smartshop_core::{AppConfig, Listing, SearchResponse, SearchSource};
use smartshop_scraper::{default_adapters, SearchBackend};

const PRODUCT_WIDTH: usize = 48;

/// Runs one search and prints the results.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be loaded or the HTTP client
/// cannot be built.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    offline: bool,
    json: bool,
) -> anyhow::Result<()> {
    let source = selected_source(config.search_source, offline);
    let results = SearchBackend::for_source(config, source)?
        .search(query)
        .await?;
    tracing::info!(query, %source, count = results.len(), "search finished");

    if json {
        let body = serde_json::to_string_pretty(&SearchResponse { results })?;
        println!("{body}");
        return Ok(());
    }

    if results.is_empty() {
        println!("no results for \"{query}\" ({source})");
        return Ok(());
    }

    println!("{}", results_header());
    for listing in &results {
        println!("{}", format_row(listing));
    }
    Ok(())
}

/// Prints every supported storefront with the search URL it would request.
///
/// # Errors
///
/// Returns an error if a built-in site profile fails to compile.
pub(crate) fn run_sites(query: &str) -> anyhow::Result<()> {
    let header = format!("{:<10}{:<10}SEARCH URL", "SITE", "DELIVERY");
    println!("{header}");
    for adapter in default_adapters()? {
        let delivery = format!("{}m", adapter.profile().delivery_minutes);
        println!(
            "{:<10}{:<10}{}",
            adapter.platform().slug(),
            delivery,
            adapter.build_search_url(query)
        );
    }
    Ok(())
}

/// `--offline` forces the catalog; otherwise `SMARTSHOP_SEARCH_SOURCE` decides.
fn selected_source(configured: SearchSource, offline: bool) -> SearchSource {
    if offline {
        SearchSource::Catalog
    } else {
        configured
    }
}

fn results_header() -> String {
    format!(
        "{:>8}  {:<10}{:<10}{:<w$}  URL",
        "PRICE",
        "SITE",
        "DELIVERY",
        "PRODUCT",
        w = PRODUCT_WIDTH
    )
}

fn format_row(listing: &Listing) -> String {
    let product = if listing.product.chars().count() > PRODUCT_WIDTH {
        let cut: String = listing.product.chars().take(PRODUCT_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        listing.product.clone()
    };
    let price = format!("₹{}", listing.price);
    let delivery = format!("{}m", listing.delivery);
    format!(
        "{:>8}  {:<10}{:<10}{:<w$}  {}",
        price,
        listing.platform.slug(),
        delivery,
        product,
        listing.url,
        w = PRODUCT_WIDTH
    )
}
