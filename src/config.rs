use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// First page of the apartment search results
    pub apartments_url: String,
    /// Output file name without the `.csv` extension
    pub output_name: String,
    /// Unset means the HTTP client's default (no timeout)
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
    /// Settings for the distance lookup. Loaded but not used by the scraper yet.
    pub maps: MapSettings,
}

/// Travel-distance integration settings
#[derive(Clone, Default)]
pub struct MapSettings {
    pub maps_url: Option<String>,
    pub units: Option<String>,
    pub mode: Option<String>,
    pub transit_routing: Option<String>,
    pub api_key: Option<String>,
    pub target_address: Option<String>,
}

impl std::fmt::Debug for MapSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSettings")
            .field("maps_url", &self.maps_url)
            .field("units", &self.units)
            .field("mode", &self.mode)
            .field("transit_routing", &self.transit_routing)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("target_address", &self.target_address)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();

        Ok(Self {
            apartments_url: env::var("APARTMENTS_URL").context("APARTMENTS_URL must be set")?,
            output_name: env::var("OUTPUT_FNAME").unwrap_or_else(|_| "apartments".to_string()),
            request_timeout: parse_timeout(env::var("REQUEST_TIMEOUT_SECS").ok())?,
            user_agent: env::var("USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            maps: MapSettings {
                maps_url: env::var("MAPS_URL").ok(),
                units: env::var("MAPS_UNITS").ok(),
                mode: env::var("MAPS_MODE").ok(),
                transit_routing: env::var("MAPS_TRANSIT_ROUTING").ok(),
                api_key: env::var("MAPS_API_KEY").ok(),
                target_address: env::var("TARGET_ADDRESS").ok(),
            },
        })
    }

    /// Path of the CSV file records are appended to
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.csv", self.output_name))
    }
}

fn parse_timeout(secs: Option<String>) -> Result<Option<Duration>> {
    secs.map(|s| {
        s.trim()
            .parse()
            .map(Duration::from_secs)
            .context("REQUEST_TIMEOUT_SECS must be a valid number")
    })
    .transpose()
}
