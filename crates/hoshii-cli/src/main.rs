//! Preview driver for the scraping core.
//!
//! `hoshii-cli scrape <URL>` runs one scrape and prints the normalized
//! result as JSON — the preview-only flow. Batch refresh over stored items
//! lives in the cron driver, not here.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "hoshii-cli")]
#[command(about = "Wishlist scraper command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a single product URL and print the result as JSON.
    Scrape {
        /// Product page URL (or a known short link).
        url: String,
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loads .env before reading HOSHII_* overrides.
    let config = hoshii_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { url, pretty } => {
            let scraper = hoshii_scraper::Scraper::new(&config)?;
            let result = scraper.scrape(&url).await;
            tracing::debug!(?result, "scrape finished");
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{json}");
        }
    }

    Ok(())
}
