//! In-memory resource storage with capacity and integrity enforcement

use crate::validate_id;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use sumika_core::{Resource, ResourceStore, RdfFormat, StoreError, StoreResult};
use tokio::sync::RwLock;
use tracing::debug;

/// Hex-encoded SHA-256 of a payload
fn checksum_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Default)]
struct ResourceStoreInner {
    resources: HashMap<String, Resource>,
    used_bytes: usize,
}

/// In-memory [`ResourceStore`] implementation
///
/// Payloads live in a HashMap behind a tokio RwLock. An optional byte
/// capacity turns oversized writes into `InsufficientStorage`; checksums
/// recorded at store time are re-verified before a payload is served.
#[derive(Debug, Default)]
pub struct MemoryResourceStore {
    inner: RwLock<ResourceStoreInner>,
    capacity: Option<usize>,
}

/// Usage counters for diagnostics and tests
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResourceStoreStats {
    pub resource_count: usize,
    pub used_bytes: usize,
    pub capacity: Option<usize>,
}

impl MemoryResourceStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses writes beyond `max_bytes` in total
    pub fn with_capacity(max_bytes: usize) -> Self {
        MemoryResourceStore {
            inner: RwLock::new(ResourceStoreInner::default()),
            capacity: Some(max_bytes),
        }
    }

    /// Current usage counters
    pub async fn stats(&self) -> ResourceStoreStats {
        let inner = self.inner.read().await;
        ResourceStoreStats {
            resource_count: inner.resources.len(),
            used_bytes: inner.used_bytes,
            capacity: self.capacity,
        }
    }

    fn check_capacity(
        &self,
        inner: &ResourceStoreInner,
        replacing: usize,
        incoming: usize,
    ) -> StoreResult<()> {
        if let Some(capacity) = self.capacity {
            let used_after_evict = inner.used_bytes - replacing;
            if used_after_evict + incoming > capacity {
                return Err(StoreError::InsufficientStorage {
                    requested: incoming,
                    available: capacity.saturating_sub(used_after_evict),
                });
            }
        }
        Ok(())
    }

    fn insert_payload(
        &self,
        inner: &mut ResourceStoreInner,
        id: &str,
        data: Bytes,
        content_type: &str,
    ) -> StoreResult<Resource> {
        validate_id(id)?;
        if content_type.trim().is_empty() {
            return Err(StoreError::InvalidResource {
                id: id.to_string(),
                reason: "content type must not be empty".to_string(),
            });
        }

        let previous = inner.resources.get(id).cloned();
        let replacing = previous.as_ref().map(|r| r.size).unwrap_or(0);
        self.check_capacity(inner, replacing, data.len())?;

        let now = Utc::now();
        let resource = Resource {
            id: id.to_string(),
            content_type: content_type.to_string(),
            size: data.len(),
            checksum: checksum_hex(&data),
            data,
            created_at: previous.as_ref().map(|r| r.created_at).unwrap_or(now),
            updated_at: now,
        };

        inner.used_bytes = inner.used_bytes - replacing + resource.size;
        inner.resources.insert(id.to_string(), resource.clone());
        debug!(id, size = resource.size, "resource stored");
        Ok(resource)
    }
}

#[async_trait]
impl ResourceStore for MemoryResourceStore {
    async fn store(&self, id: &str, data: Bytes, content_type: &str) -> StoreResult<Resource> {
        let mut inner = self.inner.write().await;
        self.insert_payload(&mut inner, id, data, content_type)
    }

    async fn store_new(&self, id: &str, data: Bytes, content_type: &str) -> StoreResult<Resource> {
        // Vacancy check and insert share one write guard so concurrent
        // creates with the same id cannot both succeed
        let mut inner = self.inner.write().await;
        if inner.resources.contains_key(id) {
            return Err(StoreError::ResourceExists { id: id.to_string() });
        }
        self.insert_payload(&mut inner, id, data, content_type)
    }

    async fn retrieve(&self, id: &str, accept: Option<RdfFormat>) -> StoreResult<Resource> {
        let inner = self.inner.read().await;
        let resource = inner
            .resources
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ResourceNotFound { id: id.to_string() })?;
        drop(inner);

        // Integrity checks before the payload is served
        if resource.size != resource.data.len() {
            return Err(StoreError::DataCorruption {
                id: id.to_string(),
                detail: format!(
                    "recorded size {} does not match payload length {}",
                    resource.size,
                    resource.data.len()
                ),
            });
        }
        let actual = checksum_hex(&resource.data);
        if actual != resource.checksum {
            return Err(StoreError::ChecksumMismatch {
                id: id.to_string(),
                expected: resource.checksum.clone(),
                actual,
            });
        }

        // This store holds a single serialization per resource. A request
        // for a different known RDF format would need the external
        // converter, so it is refused; unknown stored types are served
        // as-is (identity representation).
        if let Some(wanted) = accept {
            if let Some(stored) = RdfFormat::from_media_type_or_alias(&resource.content_type) {
                if stored != wanted {
                    return Err(StoreError::UnsupportedFormat {
                        format: wanted.media_type().to_string(),
                    });
                }
            }
        }

        Ok(resource)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        match inner.resources.remove(id) {
            Some(removed) => {
                inner.used_bytes -= removed.size;
                debug!(id, "resource deleted");
                Ok(())
            }
            None => Err(StoreError::ResourceNotFound { id: id.to_string() }),
        }
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner.resources.contains_key(id))
    }

    async fn size_of(&self, id: &str) -> StoreResult<usize> {
        let inner = self.inner.read().await;
        inner
            .resources
            .get(id)
            .map(|r| r.size)
            .ok_or_else(|| StoreError::ResourceNotFound { id: id.to_string() })
    }
}
