//! Listing-window resolution with deliberate leniency
//!
//! A bad `limit` or `offset` never rejects the request: the offending
//! field falls back to its default while the other field keeps its value.

use std::collections::HashMap;
use sumika_core::{PaginationOptions, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Resolve query parameters into a normalized in-bounds window
pub fn resolve(params: &HashMap<String, String>) -> PaginationOptions {
    let limit = params
        .get("limit")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|&limit| limit > 0 && limit <= MAX_PAGE_LIMIT as i64)
        .map(|limit| limit as usize)
        .unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = params
        .get("offset")
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|&offset| offset >= 0)
        .map(|offset| offset as usize)
        .unwrap_or(0);
    PaginationOptions { limit, offset }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_query_yields_defaults() {
        let resolved = resolve(&HashMap::new());
        assert_eq!(resolved, PaginationOptions { limit: 50, offset: 0 });
    }

    #[test]
    fn test_valid_window_passes_through() {
        let resolved = resolve(&params(&[("limit", "25"), ("offset", "10")]));
        assert_eq!(resolved, PaginationOptions { limit: 25, offset: 10 });
    }

    #[test]
    fn test_oversized_limit_falls_back() {
        let resolved = resolve(&params(&[("limit", "2000")]));
        assert_eq!(resolved, PaginationOptions { limit: 50, offset: 0 });
    }

    #[test]
    fn test_negative_offset_falls_back() {
        let resolved = resolve(&params(&[("offset", "-5")]));
        assert_eq!(resolved, PaginationOptions { limit: 50, offset: 0 });
    }

    #[test]
    fn test_bad_limit_leaves_offset_intact() {
        let resolved = resolve(&params(&[("limit", "bogus"), ("offset", "5")]));
        assert_eq!(resolved, PaginationOptions { limit: 50, offset: 5 });
    }

    #[test]
    fn test_zero_limit_falls_back() {
        let resolved = resolve(&params(&[("limit", "0")]));
        assert_eq!(resolved.limit, 50);
    }

    #[test]
    fn test_max_limit_is_inclusive() {
        let resolved = resolve(&params(&[("limit", "1000")]));
        assert_eq!(resolved.limit, 1000);
    }

    #[test]
    fn test_bad_offset_leaves_limit_intact() {
        let resolved = resolve(&params(&[("limit", "7"), ("offset", "later")]));
        assert_eq!(resolved, PaginationOptions { limit: 7, offset: 0 });
    }

    #[test]
    fn test_unrelated_params_ignored() {
        let resolved = resolve(&params(&[("order", "desc"), ("limit", "3")]));
        assert_eq!(resolved.limit, 3);
    }
}
