//! Settings document loading.
//!
//! The sites document is XML: a root `<sites version="1">` element holding an
//! ordered sequence of `<site>` elements whose attributes declare each
//! tenant. The shape is bound straight onto serde structs; there is no
//! bespoke parser.
//!
//! ```xml
//! <sites version="1">
//!   <site url="https://repo.example.org" algorithm="HS256" encoding="plain">secret</site>
//!   <site algorithm="RS256" encoding="pem" path="keys/repo.pub" default="true"/>
//! </sites>
//! ```

use std::io::BufRead;

use serde::Deserialize;

use crate::error::ConfigError;

/// The only schema version this resolver understands.
pub const SCHEMA_VERSION: u32 = 1;

/// One `<site>` record, as declared.
///
/// Field-level validation (mutual exclusion, algorithm and encoding tokens,
/// identifier rules) happens during resolution, not here.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRecord {
    /// Origin URL identifying the site; required unless `default` is set.
    #[serde(rename = "@url", default)]
    pub url: String,

    /// Raw algorithm token, e.g. "RS256" or "HS384".
    #[serde(rename = "@algorithm", default)]
    pub algorithm: String,

    /// Key material encoding: "pem", "base64" or "plain".
    #[serde(rename = "@encoding", default)]
    pub encoding: String,

    /// Filesystem path to the key material. Mutually exclusive with the
    /// inline key.
    #[serde(rename = "@path", default)]
    pub path: String,

    /// Whether this site is the fallback for unmatched origins. At most one
    /// record per document may set this.
    #[serde(rename = "@default", default)]
    pub default: bool,

    /// Inline key material carried as the element text.
    #[serde(rename = "$text", default)]
    pub key: String,
}

/// The parsed settings document: schema version plus ordered site records.
#[derive(Debug, Deserialize)]
pub struct SiteDocument {
    /// Schema version tag from the root element.
    #[serde(rename = "@version")]
    pub version: u32,

    /// Site records in document order.
    #[serde(rename = "site", default)]
    pub sites: Vec<SiteRecord>,
}

impl SiteDocument {
    /// Parse a settings document from a byte stream.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ConfigError> {
        quick_xml::de::from_reader(reader).map_err(|e| ConfigError::MalformedDocument {
            message: e.to_string(),
        })
    }

    /// Parse a settings document from a string.
    pub fn from_str(xml: &str) -> Result<Self, ConfigError> {
        quick_xml::de::from_str(xml).map_err(|e| ConfigError::MalformedDocument {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sites_with_attributes_and_inline_key() {
        let doc = SiteDocument::from_str(
            r#"<sites version="1">
                 <site url="https://a.example.org" algorithm="HS256" encoding="plain">topsecret</site>
                 <site algorithm="RS256" encoding="pem" path="keys/a.pub" default="true"/>
               </sites>"#,
        )
        .unwrap();

        assert_eq!(doc.version, 1);
        assert_eq!(doc.sites.len(), 2);

        let first = &doc.sites[0];
        assert_eq!(first.url, "https://a.example.org");
        assert_eq!(first.algorithm, "HS256");
        assert_eq!(first.encoding, "plain");
        assert_eq!(first.key, "topsecret");
        assert!(!first.default);

        let second = &doc.sites[1];
        assert!(second.url.is_empty());
        assert_eq!(second.path, "keys/a.pub");
        assert!(second.default);
    }

    #[test]
    fn parses_empty_document() {
        let doc = SiteDocument::from_str(r#"<sites version="1"/>"#).unwrap();
        assert_eq!(doc.version, 1);
        assert!(doc.sites.is_empty());
    }

    #[test]
    fn rejects_missing_version() {
        let err = SiteDocument::from_str(r#"<sites><site url="x"/></sites>"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument { .. }));
    }

    #[test]
    fn rejects_non_numeric_version() {
        let err = SiteDocument::from_str(r#"<sites version="one"/>"#).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument { .. }));
    }

    #[test]
    fn rejects_garbage() {
        assert!(SiteDocument::from_str("not a settings document").is_err());
    }
}
