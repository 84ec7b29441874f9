use crate::error::{Result, ScrapeError};
use crate::models::{ListingSummary, UnitRecord};
use crate::scrapers::listing::ListingCardParser;
use crate::scrapers::traits::PageFetcher;
use crate::scrapers::units::UnitExtractor;
use crate::sink::RecordSink;
use scraper::Html;
use tracing::{debug, info};
use url::Url;

/// Counters for one completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub listings: usize,
    pub skipped_cards: usize,
    pub records: usize,
}

/// Scraper for apartments.com style search results.
///
/// Visits the first results page, then each listing's detail page in
/// document order, streaming one record per unit into the sink.
pub struct ApartmentsScraper<F> {
    fetcher: F,
    cards: ListingCardParser,
    units: UnitExtractor,
}

impl<F: PageFetcher> ApartmentsScraper<F> {
    pub fn new(fetcher: F) -> Result<Self> {
        Ok(Self {
            fetcher,
            cards: ListingCardParser::new()?,
            units: UnitExtractor::new()?,
        })
    }

    /// Scrape `search_url` into `sink`. The first error aborts the run;
    /// records written before it stay in the sink.
    pub async fn run<S: RecordSink>(&self, search_url: &str, sink: &mut S) -> Result<RunSummary> {
        let page_url = Url::parse(search_url).map_err(|source| ScrapeError::InvalidUrl {
            url: search_url.to_string(),
            source,
        })?;

        info!("Fetching search page {}", page_url);
        let html = self.fetcher.fetch(page_url.as_str()).await?;
        let document = Html::parse_document(&html);

        let mut summary = RunSummary::default();
        let mut cards = self.cards.cards(&document, &page_url)?;

        for listing in cards.by_ref() {
            let listing = listing?;
            let units = self.load_units(&listing).await?;
            debug!("{} has {} units", listing.name, units.len());

            for record in listing.rentals(units) {
                sink.write_record(&record)?;
                summary.records += 1;
            }
            summary.listings += 1;
        }
        summary.skipped_cards = cards.skipped();

        info!(
            "✅ Wrote {} records from {} listings ({} cards skipped)",
            summary.records, summary.listings, summary.skipped_cards
        );

        Ok(summary)
    }

    /// Fetch a listing's detail page and pull out its units
    pub async fn load_units(&self, listing: &ListingSummary) -> Result<Vec<UnitRecord>> {
        let html = self.fetcher.fetch(&listing.detail_url).await?;
        self.units.extract(&listing.detail_url, &html)
    }
}
