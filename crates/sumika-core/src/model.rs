//! Data models for LDP resources and containers
//!
//! Everything here is a request-scoped value snapshot: handlers fetch these
//! from the collaborators when a request arrives and drop them with the
//! response. Nothing in this module is cached or mutated across requests.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Default page size applied when a listing request carries no usable limit
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page size a client may request; anything above falls back to the default
pub const MAX_PAGE_LIMIT: usize = 1000;

/// A stored RDF resource
///
/// Identity is the `id`; `data` and `size` always change together. The
/// checksum and timestamps are owned by the storage collaborator - the
/// protocol layer only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// Resource identifier (a path segment, not a full IRI)
    pub id: String,
    /// Media type the payload was stored with
    pub content_type: String,
    /// Raw payload bytes
    pub data: Bytes,
    /// Payload size in bytes
    pub size: usize,
    /// SHA-256 of the payload, hex-encoded, recorded at store time
    pub checksum: String,
    /// When the resource was first stored
    pub created_at: DateTime<Utc>,
    /// When the payload was last replaced
    pub updated_at: DateTime<Utc>,
}

/// Container kinds; only BasicContainer membership semantics are implemented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    Basic,
}

impl ContainerType {
    /// LDP type IRI fragment used in `@type` and Link headers
    pub const fn as_ldp_type(&self) -> &'static str {
        match self {
            ContainerType::Basic => "ldp:BasicContainer",
        }
    }
}

/// An LDP container with its membership index
///
/// Membership is authoritative in the container collaborator; this snapshot
/// is read and rendered, never mutated by the protocol layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    /// Parent container id; `None` for a root container
    pub parent_id: Option<String>,
    pub container_type: ContainerType,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Member resource ids in insertion order
    pub members: IndexSet<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Container {
    /// Create an empty BasicContainer
    pub fn new<S: Into<String>>(id: S, parent_id: Option<String>) -> Self {
        let now = Utc::now();
        Container {
            id: id.into(),
            parent_id,
            container_type: ContainerType::Basic,
            title: None,
            description: None,
            members: IndexSet::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Set a title during construction
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a description during construction
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of member resources
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Normalized listing window; always within bounds after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        PaginationOptions {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

/// One page of container members, produced per request and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerListing {
    pub container_id: String,
    /// Member ids inside the requested window, insertion order preserved
    pub members: Vec<String>,
    /// Total member count before windowing
    pub total: usize,
    /// The window that was actually applied
    pub pagination: PaginationOptions,
}
