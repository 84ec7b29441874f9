mod config;
mod error;
mod models;
mod scrapers;
mod sink;

use anyhow::Context;
use config::Config;
use scrapers::{ApartmentsScraper, HttpFetcher};
use sink::CsvSink;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Rental Scout - Apartments Scraper");

    let config = Config::from_env()?;
    debug!("Map settings: {:?}", config.maps);

    let fetcher = HttpFetcher::new(config.request_timeout, &config.user_agent)?;
    let scraper = ApartmentsScraper::new(fetcher)?;

    let output = config.output_path();
    let mut sink = CsvSink::open(&output)
        .with_context(|| format!("Failed to open {}", output.display()))?;

    let summary = scraper
        .run(&config.apartments_url, &mut sink)
        .await
        .context("Scrape aborted")?;

    info!(
        "💾 Saved {} rentals from {} listings to {}",
        summary.records,
        summary.listings,
        output.display()
    );

    Ok(())
}
