//! Supported RDF serializations and their media types

use serde::{Deserialize, Serialize};

/// RDF serialization format negotiated over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfFormat {
    /// JSON-LD (`application/ld+json`) - the server default
    JsonLd,
    /// Turtle (`text/turtle`)
    Turtle,
    /// RDF/XML (`application/rdf+xml`)
    RdfXml,
}

/// Fixed server preference order used by content negotiation
pub const SUPPORTED_FORMATS: [RdfFormat; 3] =
    [RdfFormat::JsonLd, RdfFormat::Turtle, RdfFormat::RdfXml];

impl RdfFormat {
    /// Canonical media type for this format
    pub const fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::JsonLd => "application/ld+json",
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::RdfXml => "application/rdf+xml",
        }
    }

    /// Exact media-type lookup, case-insensitive
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type.to_ascii_lowercase().as_str() {
            "application/ld+json" => Some(RdfFormat::JsonLd),
            "text/turtle" => Some(RdfFormat::Turtle),
            "application/rdf+xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }

    /// Alias lookup: common non-RDF media types accepted as stand-ins
    pub fn from_alias(media_type: &str) -> Option<Self> {
        match media_type.to_ascii_lowercase().as_str() {
            "application/json" => Some(RdfFormat::JsonLd),
            "text/plain" => Some(RdfFormat::Turtle),
            "application/xml" => Some(RdfFormat::RdfXml),
            _ => None,
        }
    }

    /// Exact match first, alias second; media-type parameters are ignored
    pub fn from_media_type_or_alias(media_type: &str) -> Option<Self> {
        let essence = media_type.split(';').next().unwrap_or("").trim();
        Self::from_media_type(essence).or_else(|| Self::from_alias(essence))
    }

    /// Format used when an endpoint falls back to the system default
    pub const fn default_format() -> Self {
        RdfFormat::JsonLd
    }
}

impl std::fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.media_type())
    }
}

/// Media types advertised in Accept-Post headers and error envelopes
pub fn supported_media_types() -> Vec<&'static str> {
    SUPPORTED_FORMATS.iter().map(|f| f.media_type()).collect()
}
