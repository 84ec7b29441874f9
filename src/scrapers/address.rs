use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Selector};

/// schema.org `itemprop` roles that make up a postal address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressPart {
    Street,
    Locality,
    Region,
    PostalCode,
}

impl AddressPart {
    pub const ALL: [AddressPart; 4] = [
        AddressPart::Street,
        AddressPart::Locality,
        AddressPart::Region,
        AddressPart::PostalCode,
    ];

    pub fn itemprop(self) -> &'static str {
        match self {
            AddressPart::Street => "streetAddress",
            AddressPart::Locality => "addressLocality",
            AddressPart::Region => "addressRegion",
            AddressPart::PostalCode => "postalCode",
        }
    }

    /// Text placed in front of this part when joining
    fn separator(self) -> &'static str {
        match self {
            AddressPart::Street => "",
            AddressPart::Locality | AddressPart::Region => ", ",
            AddressPart::PostalCode => " ",
        }
    }
}

/// Builds "street, locality, region postalCode" from a listing card.
///
/// Each part is read from the `content` attribute of its marker node when
/// present, otherwise from the node's text. A missing marker node is an error.
pub struct AddressResolver {
    parts: Vec<(AddressPart, Selector)>,
}

impl AddressResolver {
    pub fn new() -> Result<Self> {
        let parts = AddressPart::ALL
            .into_iter()
            .map(|part| {
                let css = format!(r#"[itemprop="{}"]"#, part.itemprop());
                Selector::parse(&css)
                    .map(|selector| (part, selector))
                    .map_err(|e| ScrapeError::Selector(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { parts })
    }

    pub fn resolve(&self, card: ElementRef<'_>) -> Result<String> {
        let mut address = String::new();

        for (part, selector) in &self.parts {
            let node = card
                .select(selector)
                .next()
                .ok_or_else(|| ScrapeError::MissingField(part.itemprop().to_string()))?;

            address.push_str(part.separator());
            match node.value().attr("content") {
                Some(content) => address.push_str(content),
                None => address.extend(node.text()),
            }
        }

        Ok(address)
    }
}
