mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "smartshop-cli")]
#[command(about = "Compare product prices across Indian storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search every storefront and print results cheapest first
    Search {
        /// Free-text query, e.g. `amul butter 500g`
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Answer from the offline catalog instead of scraping
        #[arg(long)]
        offline: bool,
        /// Print the `{"results": [...]}` JSON body instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List supported storefronts and their search URLs
    Sites {
        /// Query used to render each site's search URL
        #[arg(long, default_value = "amul milk")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = smartshop_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            query,
            offline,
            json,
        }) => search::run_search(&config, &query.join(" "), offline, json).await?,
        Some(Commands::Sites { query }) => search::run_sites(&query)?,
        None => println!("smartshop-cli ready; try `smartshop-cli search amul milk`"),
    }

    Ok(())
}
