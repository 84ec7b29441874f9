pub mod address;
pub mod apartments;
pub mod http;
pub mod listing;
pub mod traits;
pub mod units;

pub use apartments::ApartmentsScraper;
pub use http::HttpFetcher;
