use crate::error::{PayloadError, Result, ScrapeError};
use crate::models::UnitRecord;
use scraper::{Html, Selector};
use tracing::debug;

/// Literal that precedes the unit array inside the detail page's inline script
pub const RENTALS_MARKER: &str = "rentals: ";

/// Literal that follows the last unit object of the array
const ARRAY_TERMINATOR: &str = "}],";

/// Cut the `rentals` JSON array out of a script body.
///
/// Precondition: the text between the marker and the first `}],` after it is
/// a complete JSON array. The returned slice ends with `}]`.
pub fn rentals_payload(script: &str) -> Result<&str, PayloadError> {
    let start = script
        .find(RENTALS_MARKER)
        .ok_or(PayloadError::MarkerNotFound)?
        + RENTALS_MARKER.len();

    let end = script[start..]
        .find(ARRAY_TERMINATOR)
        .ok_or(PayloadError::UnterminatedArray)?;

    // keep "}]" and drop the trailing comma
    Ok(&script[start..start + end + 2])
}

/// Recovers the unit array from a property detail page
pub struct UnitExtractor {
    scripts: Selector,
}

impl UnitExtractor {
    pub fn new() -> Result<Self> {
        let scripts = Selector::parse("script:not([src])")
            .map_err(|e| ScrapeError::Selector(e.to_string()))?;
        Ok(Self { scripts })
    }

    /// Parse the units of the detail page fetched from `url`
    pub fn extract(&self, url: &str, html: &str) -> Result<Vec<UnitRecord>> {
        self.parse(html)
            .map_err(|source| ScrapeError::PayloadExtraction {
                url: url.to_string(),
                source,
            })
    }

    /// Only the first inline script carrying the marker is considered
    pub fn parse(&self, html: &str) -> Result<Vec<UnitRecord>, PayloadError> {
        let document = Html::parse_document(html);

        let script = document
            .select(&self.scripts)
            .map(|el| el.text().collect::<String>())
            .find(|code| code.contains(RENTALS_MARKER))
            .ok_or(PayloadError::MarkerNotFound)?;

        let payload = rentals_payload(&script)?;
        debug!("Found rentals payload of {} bytes", payload.len());

        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_units(html: &str) -> Result<Vec<UnitRecord>, PayloadError> {
        UnitExtractor::new().unwrap().parse(html)
    }

    const SCRIPT: &str = r#"var config = { listing: 7, rentals: [{"Beds":"2","Baths":"1","SquareFootDisplay":"900","RentDisplay":"$1500","DateAvailableDisplay":"Now"}], moreJsHere: true };"#;

    #[test]
    fn payload_stops_at_first_terminator() {
        let payload = rentals_payload(SCRIPT).unwrap();
        assert_eq!(
            payload,
            r#"[{"Beds":"2","Baths":"1","SquareFootDisplay":"900","RentDisplay":"$1500","DateAvailableDisplay":"Now"}]"#
        );
    }

    #[test]
    fn payload_spans_multiple_units() {
        let script = r#"rentals: [{"Beds":"1"},{"Beds":"2"}], other: [{"x":1}], "#;
        assert_eq!(rentals_payload(script).unwrap(), r#"[{"Beds":"1"},{"Beds":"2"}]"#);
    }

    #[test]
    fn payload_without_marker_is_rejected() {
        let err = rentals_payload("var units = [];").unwrap_err();
        assert!(matches!(err, PayloadError::MarkerNotFound));
    }

    #[test]
    fn payload_without_terminator_is_rejected() {
        let err = rentals_payload(r#"rentals: [{"Beds":"2"}] }"#).unwrap_err();
        assert!(matches!(err, PayloadError::UnterminatedArray));
    }

    #[test]
    fn terminator_before_marker_is_ignored() {
        let err = rentals_payload(r#"prior: [{"a":1}], rentals: [{"Beds":"2"}]"#).unwrap_err();
        assert!(matches!(err, PayloadError::UnterminatedArray));
    }

    #[test]
    fn parses_units_from_page() {
        let html = format!(
            r#"<html><head>
                <script src="/static/app.js"></script>
                <script type="text/javascript">window.analytics = {{}};</script>
                <script type="text/javascript">{SCRIPT}</script>
            </head><body></body></html>"#
        );

        let units = parse_units(&html).unwrap();

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].beds, "2");
        assert_eq!(units[0].baths, "1");
        assert_eq!(units[0].square_footage_display, "900");
        assert_eq!(units[0].rent_display, "$1500");
        assert_eq!(units[0].date_available_display, "Now");
    }

    #[test]
    fn first_matching_script_wins() {
        let html = r#"<html><body>
            <script>rentals: [{"Beds":"1","Baths":"1","SquareFootDisplay":"500","RentDisplay":"$900","DateAvailableDisplay":"Now"}], x</script>
            <script>rentals: [{"Beds":"4","Baths":"3","SquareFootDisplay":"2000","RentDisplay":"$3000","DateAvailableDisplay":"Now"}], x</script>
        </body></html>"#;

        let units = parse_units(html).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].beds, "1");
    }

    #[test]
    fn page_without_marker_fails() {
        let err = parse_units("<html><body><script>var x = 1;</script></body></html>").unwrap_err();
        assert!(matches!(err, PayloadError::MarkerNotFound));
    }

    #[test]
    fn invalid_json_fails() {
        let html = r#"<script>rentals: [{Beds: "2"}], x</script>"#;
        let err = parse_units(html).unwrap_err();
        assert!(matches!(err, PayloadError::Json(_)));
    }

    #[test]
    fn page_errors_carry_url() {
        let err = UnitExtractor::new()
            .unwrap()
            .extract("https://example.com/a/", "<html></html>")
            .unwrap_err();
        match err {
            ScrapeError::PayloadExtraction { url, .. } => assert_eq!(url, "https://example.com/a/"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
