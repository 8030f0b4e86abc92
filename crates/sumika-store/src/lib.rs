//! # Sumika Store
//!
//! Sumikaサーバーのインメモリ参照コラボレータ実装
//! In-memory reference implementations of the [`sumika_core::ResourceStore`]
//! and [`sumika_core::ContainerStore`] collaborator contracts, used by the
//! server wiring and the test suites. They enforce the same taxonomy a
//! production backend would: capacity, checksum integrity, id validation,
//! membership and hierarchy rules.

pub mod containers;
pub mod resources;

pub use containers::*;
pub use resources::*;

use sumika_core::{StoreError, StoreResult};

/// Longest id accepted by the reference stores
const MAX_ID_LEN: usize = 256;

/// Shared id validation for resources and containers
pub(crate) fn validate_id(id: &str) -> StoreResult<()> {
    if id.trim().is_empty() {
        return Err(StoreError::InvalidId {
            id: id.to_string(),
            reason: "id must not be empty".to_string(),
        });
    }
    if id.len() > MAX_ID_LEN {
        return Err(StoreError::InvalidId {
            id: id.to_string(),
            reason: format!("id exceeds {} characters", MAX_ID_LEN),
        });
    }
    // Ids travel in Location and ETag headers, so only printable ASCII
    // without '/' is accepted
    if id.contains('/') || !id.chars().all(|c| c.is_ascii_graphic()) {
        return Err(StoreError::InvalidId {
            id: id.to_string(),
            reason: "id must be printable ASCII without '/'".to_string(),
        });
    }
    Ok(())
}
