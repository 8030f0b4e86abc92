//! In-memory container storage with membership and hierarchy rules

use crate::validate_id;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use sumika_core::{
    Container, ContainerListing, ContainerStore, PaginationOptions, StoreError, StoreResult,
};
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory [`ContainerStore`] implementation
///
/// Containers form a tree through `parent_id`; membership is an ordered
/// set per container. Deletion requires the container to be empty and
/// to have no child containers.
#[derive(Debug, Default)]
pub struct MemoryContainerStore {
    containers: RwLock<HashMap<String, Container>>,
}

impl MemoryContainerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a root container exists, creating it when missing
    ///
    /// Idempotent; server startup calls this so clients always find a
    /// top-level container to post into.
    pub async fn bootstrap_root(&self, id: &str) -> StoreResult<Container> {
        validate_id(id)?;
        let mut containers = self.containers.write().await;
        if let Some(existing) = containers.get(id) {
            return Ok(existing.clone());
        }
        let root = Container::new(id, None).with_title("Root container");
        containers.insert(id.to_string(), root.clone());
        debug!(id, "root container bootstrapped");
        Ok(root)
    }
}

#[async_trait]
impl ContainerStore for MemoryContainerStore {
    async fn create(&self, container: Container) -> StoreResult<Container> {
        validate_id(&container.id)?;
        let mut containers = self.containers.write().await;
        if containers.contains_key(&container.id) {
            return Err(StoreError::ContainerExists {
                id: container.id.clone(),
            });
        }
        if let Some(parent_id) = &container.parent_id {
            if !containers.contains_key(parent_id) {
                return Err(StoreError::InvalidHierarchy {
                    container_id: container.id.clone(),
                    reason: format!("parent container '{parent_id}' does not exist"),
                });
            }
        }
        containers.insert(container.id.clone(), container.clone());
        debug!(id = %container.id, "container created");
        Ok(container)
    }

    async fn get(&self, id: &str) -> StoreResult<Container> {
        let containers = self.containers.read().await;
        containers
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ContainerNotFound { id: id.to_string() })
    }

    async fn update_metadata(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> StoreResult<Container> {
        let mut containers = self.containers.write().await;
        let container = containers
            .get_mut(id)
            .ok_or_else(|| StoreError::ContainerNotFound { id: id.to_string() })?;
        if let Some(title) = title {
            container.title = Some(title);
        }
        if let Some(description) = description {
            container.description = Some(description);
        }
        container.modified_at = Utc::now();
        Ok(container.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut containers = self.containers.write().await;
        let container = containers
            .get(id)
            .ok_or_else(|| StoreError::ContainerNotFound { id: id.to_string() })?;
        if !container.members.is_empty() {
            return Err(StoreError::ContainerNotEmpty {
                id: id.to_string(),
                member_count: container.members.len(),
            });
        }
        let has_children = containers
            .values()
            .any(|c| c.parent_id.as_deref() == Some(id));
        if has_children {
            return Err(StoreError::InvalidHierarchy {
                container_id: id.to_string(),
                reason: "container still has child containers".to_string(),
            });
        }
        containers.remove(id);
        debug!(id, "container deleted");
        Ok(())
    }

    async fn exists(&self, id: &str) -> StoreResult<bool> {
        let containers = self.containers.read().await;
        Ok(containers.contains_key(id))
    }

    async fn add_member(&self, container_id: &str, resource_id: &str) -> StoreResult<()> {
        validate_id(resource_id)?;
        let mut containers = self.containers.write().await;
        let container = containers.get_mut(container_id).ok_or_else(|| {
            StoreError::ContainerNotFound {
                id: container_id.to_string(),
            }
        })?;
        if !container.members.insert(resource_id.to_string()) {
            return Err(StoreError::ResourceExists {
                id: resource_id.to_string(),
            });
        }
        container.modified_at = Utc::now();
        debug!(container_id, resource_id, "member linked");
        Ok(())
    }

    async fn remove_member(&self, container_id: &str, resource_id: &str) -> StoreResult<()> {
        let mut containers = self.containers.write().await;
        let container = containers.get_mut(container_id).ok_or_else(|| {
            StoreError::ContainerNotFound {
                id: container_id.to_string(),
            }
        })?;
        // shift_remove keeps the remaining members in insertion order
        if !container.members.shift_remove(resource_id) {
            return Err(StoreError::ResourceNotFound {
                id: resource_id.to_string(),
            });
        }
        container.modified_at = Utc::now();
        debug!(container_id, resource_id, "member unlinked");
        Ok(())
    }

    async fn list_members(
        &self,
        container_id: &str,
        pagination: PaginationOptions,
    ) -> StoreResult<ContainerListing> {
        let containers = self.containers.read().await;
        let container = containers.get(container_id).ok_or_else(|| {
            StoreError::ContainerNotFound {
                id: container_id.to_string(),
            }
        })?;
        let members: Vec<String> = container
            .members
            .iter()
            .skip(pagination.offset)
            .take(pagination.limit)
            .cloned()
            .collect();
        Ok(ContainerListing {
            container_id: container_id.to_string(),
            members,
            total: container.members.len(),
            pagination,
        })
    }

    async fn parent_of(&self, id: &str) -> StoreResult<Option<String>> {
        let containers = self.containers.read().await;
        let container = containers
            .get(id)
            .ok_or_else(|| StoreError::ContainerNotFound { id: id.to_string() })?;
        Ok(container.parent_id.clone())
    }

    async fn children_of(&self, id: &str) -> StoreResult<Vec<String>> {
        let containers = self.containers.read().await;
        if !containers.contains_key(id) {
            return Err(StoreError::ContainerNotFound { id: id.to_string() });
        }
        let mut children: Vec<String> = containers
            .values()
            .filter(|c| c.parent_id.as_deref() == Some(id))
            .map(|c| c.id.clone())
            .collect();
        children.sort();
        Ok(children)
    }

    async fn path_of(&self, id: &str) -> StoreResult<Vec<String>> {
        let containers = self.containers.read().await;
        if !containers.contains_key(id) {
            return Err(StoreError::ContainerNotFound { id: id.to_string() });
        }
        let mut path = vec![id.to_string()];
        let mut current = id.to_string();
        while let Some(parent_id) = containers.get(&current).and_then(|c| c.parent_id.clone()) {
            if path.contains(&parent_id) {
                return Err(StoreError::InvalidHierarchy {
                    container_id: id.to_string(),
                    reason: format!("hierarchy cycle detected at '{parent_id}'"),
                });
            }
            path.push(parent_id.clone());
            current = parent_id;
        }
        path.reverse();
        Ok(path)
    }
}
