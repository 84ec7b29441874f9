use thiserror::Error;

/// Errors raised while scraping listings and writing rental records
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Missing required element: {0}")]
    MissingField(String),

    #[error("Failed to extract unit data from {url}: {source}")]
    PayloadExtraction {
        url: String,
        #[source]
        source: PayloadError,
    },

    #[error("Invalid listing URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("CSV error: {0}")]
    Sink(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons the embedded `rentals` array could not be recovered from a detail page
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("no inline script contains the rentals marker")]
    MarkerNotFound,

    #[error("rentals array is not terminated")]
    UnterminatedArray,

    #[error("rentals array is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
