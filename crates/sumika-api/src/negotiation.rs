//! Accept-header parsing and RDF serialization selection

use std::cmp::Ordering;
use sumika_core::{RdfFormat, SUPPORTED_FORMATS};

/// One parsed Accept-header clause
///
/// Declaration order matters: equal-quality clauses are ranked in the
/// order the client wrote them.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptEntry {
    pub media_type: String,
    pub quality: f32,
}

/// Parse an Accept header into clauses, most general form first
///
/// A malformed or out-of-range `q` parameter falls back to 1.0; a clause
/// is never rejected because of its parameters.
pub fn parse_accept_header(header: &str) -> Vec<AcceptEntry> {
    header
        .split(',')
        .filter_map(|clause| {
            let mut segments = clause.split(';');
            let media_type = segments.next()?.trim().to_ascii_lowercase();
            if media_type.is_empty() {
                return None;
            }
            let quality = segments
                .filter_map(|segment| {
                    let (key, value) = segment.split_once('=')?;
                    if key.trim().eq_ignore_ascii_case("q") {
                        value.trim().parse::<f32>().ok()
                    } else {
                        None
                    }
                })
                .next()
                .filter(|q| q.is_finite())
                .map(|q| q.clamp(0.0, 1.0))
                .unwrap_or(1.0);
            Some(AcceptEntry { media_type, quality })
        })
        .collect()
}

/// Rank clauses by descending quality
///
/// `sort_by` is a stable sort, which is load-bearing here: equal-quality
/// clauses must keep their declaration order, first-declared wins.
pub fn rank_entries(mut entries: Vec<AcceptEntry>) -> Vec<AcceptEntry> {
    entries.sort_by(|a, b| {
        b.quality
            .partial_cmp(&a.quality)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

/// Select a supported RDF serialization for an Accept header
///
/// Clause rank decides the outcome; the fixed server preference order in
/// [`SUPPORTED_FORMATS`] only resolves wildcard clauses. Returns `None`
/// for an empty or unmatchable header; the caller decides whether that
/// means 406 (resource reads) or the system default (container reads).
pub fn negotiate(header: &str) -> Option<RdfFormat> {
    let ranked = rank_entries(parse_accept_header(header));
    for entry in &ranked {
        if let Some(format) = match_clause(&entry.media_type) {
            return Some(format);
        }
    }
    None
}

fn match_clause(media_type: &str) -> Option<RdfFormat> {
    if media_type == "*/*" || media_type == "application/*" {
        return Some(SUPPORTED_FORMATS[0]);
    }
    RdfFormat::from_media_type_or_alias(media_type)
}
