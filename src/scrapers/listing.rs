use crate::error::{Result, ScrapeError};
use crate::models::ListingSummary;
use crate::scrapers::address::AddressResolver;
use scraper::element_ref::Select;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Parser for the placards on an apartments search results page
pub struct ListingCardParser {
    container: Selector,
    card: Selector,
    title: Selector,
    address: AddressResolver,
}

impl ListingCardParser {
    pub fn new() -> Result<Self> {
        let parse = |css: &str| Selector::parse(css).map_err(|e| ScrapeError::Selector(e.to_string()));

        Ok(Self {
            container: parse("div.placardContainer")?,
            card: parse("article.placard")?,
            title: parse("a.placardTitle")?,
            address: AddressResolver::new()?,
        })
    }

    /// Iterate the listing cards of `document` in document order.
    ///
    /// Detail links are resolved against `page_url`. Only the results
    /// container is searched; a page without one is an error.
    pub fn cards<'a>(&'a self, document: &'a Html, page_url: &'a Url) -> Result<ListingCards<'a>> {
        let container = document
            .select(&self.container)
            .next()
            .ok_or_else(|| ScrapeError::MissingField("placardContainer".to_string()))?;

        Ok(ListingCards {
            parser: self,
            page_url,
            cards: container.select(&self.card),
            position: 0,
            skipped: 0,
        })
    }
}

/// Lazy sequence of listing summaries. Cards without a title link are skipped.
pub struct ListingCards<'a> {
    parser: &'a ListingCardParser,
    page_url: &'a Url,
    cards: Select<'a, 'a>,
    position: usize,
    skipped: usize,
}

impl<'a> ListingCards<'a> {
    /// Number of malformed cards passed over so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn summarize(&self, card: ElementRef<'a>, title: ElementRef<'a>) -> Result<ListingSummary> {
        let href = title
            .value()
            .attr("href")
            .ok_or_else(|| ScrapeError::MissingField("placardTitle href".to_string()))?;
        let detail_url = self
            .page_url
            .join(href)
            .map_err(|source| ScrapeError::InvalidUrl {
                url: href.to_string(),
                source,
            })?;

        let name = title.text().collect::<String>().trim().to_string();
        let address = self.parser.address.resolve(card)?;

        debug!("Card {}: {} at {}", self.position, name, address);

        Ok(ListingSummary {
            name,
            detail_url: detail_url.to_string(),
            address,
        })
    }
}

impl Iterator for ListingCards<'_> {
    type Item = Result<ListingSummary>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let card = self.cards.next()?;
            self.position += 1;

            let Some(title) = card.select(&self.parser.title).next() else {
                warn!("Skipping card {} without a title link", self.position);
                self.skipped += 1;
                continue;
            };

            return Some(self.summarize(card, title));
        }
    }
}
