use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Summary of one listing card on the search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub name: String,
    pub detail_url: String,
    pub address: String,
}

/// One rentable unit as embedded in a property detail page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnitRecord {
    #[serde(rename = "Beds", deserialize_with = "display_value")]
    pub beds: String,
    #[serde(rename = "Baths", deserialize_with = "display_value")]
    pub baths: String,
    #[serde(rename = "SquareFootDisplay", deserialize_with = "display_value")]
    pub square_footage_display: String,
    #[serde(rename = "RentDisplay", deserialize_with = "display_value")]
    pub rent_display: String,
    #[serde(rename = "DateAvailableDisplay", deserialize_with = "display_value")]
    pub date_available_display: String,
}

/// Normalized output row. Field order is the sink's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Bedrooms")]
    pub beds: String,
    #[serde(rename = "Bathrooms")]
    pub baths: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Rent")]
    pub rent: String,
    #[serde(rename = "Available")]
    pub available: String,
}

impl RentalRecord {
    /// Column header written once at the top of a new sink
    pub const HEADER: [&'static str; 7] = [
        "Name",
        "Address",
        "Bedrooms",
        "Bathrooms",
        "Size",
        "Rent",
        "Available",
    ];

    pub fn new(summary: &ListingSummary, unit: UnitRecord) -> Self {
        Self {
            name: summary.name.clone(),
            address: summary.address.clone(),
            beds: unit.beds,
            baths: unit.baths,
            size: unit.square_footage_display,
            rent: unit.rent_display,
            available: unit.date_available_display,
        }
    }
}

impl ListingSummary {
    /// Pair this listing with each of its units, in payload order
    pub fn rentals(&self, units: Vec<UnitRecord>) -> impl Iterator<Item = RentalRecord> + '_ {
        units.into_iter().map(move |unit| RentalRecord::new(self, unit))
    }
}

/// The site emits display values as either strings or bare numbers
fn display_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
