//! Collaborator contracts consumed by the protocol layer
//!
//! The protocol layer never touches storage directly: every read or write
//! goes through these narrow traits. Request cancellation propagates by
//! dropping the futures; neither trait implies retries or background work.

use crate::error::{StoreError, StoreResult};
use crate::format::RdfFormat;
use crate::model::{Container, ContainerListing, PaginationOptions, Resource};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;

/// Byte stream used by the streaming store/retrieve variants
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Storage collaborator for single RDF resources
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// Store a payload under `id`, replacing any previous content
    async fn store(&self, id: &str, data: Bytes, content_type: &str) -> StoreResult<Resource>;

    /// Store a payload only if `id` is vacant
    async fn store_new(&self, id: &str, data: Bytes, content_type: &str) -> StoreResult<Resource>;

    /// Fetch a resource; `accept` carries the negotiated format when the
    /// caller needs a particular serialization
    async fn retrieve(&self, id: &str, accept: Option<RdfFormat>) -> StoreResult<Resource>;

    /// Remove a resource
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Existence probe without payload transfer
    async fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Current payload size without payload transfer
    async fn size_of(&self, id: &str) -> StoreResult<usize>;

    /// Streaming variant of [`ResourceStore::store`] for large payloads.
    /// The default implementation collects the stream and delegates.
    async fn store_streamed(
        &self,
        id: &str,
        mut stream: ByteStream,
        content_type: &str,
    ) -> StoreResult<Resource> {
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| StoreError::StorageFailure {
                operation: "store_streamed".to_string(),
                detail: e.to_string(),
            })?;
            buf.extend_from_slice(&chunk);
        }
        self.store(id, Bytes::from(buf), content_type).await
    }

    /// Streaming variant of [`ResourceStore::retrieve`]. The default
    /// implementation yields the whole payload as a single chunk.
    async fn retrieve_streamed(
        &self,
        id: &str,
        accept: Option<RdfFormat>,
    ) -> StoreResult<ByteStream> {
        let resource = self.retrieve(id, accept).await?;
        Ok(Box::pin(futures::stream::iter(vec![Ok(resource.data)])))
    }
}

/// Container collaborator owning membership and hierarchy
#[async_trait]
pub trait ContainerStore: Send + Sync + 'static {
    /// Register a new container; `parent_id`, when set, must name an
    /// existing container
    async fn create(&self, container: Container) -> StoreResult<Container>;

    /// Fetch a container snapshot including its member index
    async fn get(&self, id: &str) -> StoreResult<Container>;

    /// Persist title/description changes; `None` leaves a field untouched
    async fn update_metadata(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> StoreResult<Container>;

    /// Remove an empty container
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Existence probe
    async fn exists(&self, id: &str) -> StoreResult<bool>;

    /// Link a resource into the container's member set
    async fn add_member(&self, container_id: &str, resource_id: &str) -> StoreResult<()>;

    /// Unlink a resource from the container's member set
    async fn remove_member(&self, container_id: &str, resource_id: &str) -> StoreResult<()>;

    /// One page of members in insertion order
    async fn list_members(
        &self,
        container_id: &str,
        pagination: PaginationOptions,
    ) -> StoreResult<ContainerListing>;

    /// Parent container id, if any
    async fn parent_of(&self, id: &str) -> StoreResult<Option<String>>;

    /// Ids of containers whose parent is `id`
    async fn children_of(&self, id: &str) -> StoreResult<Vec<String>>;

    /// Container ids from the root down to `id`, inclusive
    async fn path_of(&self, id: &str) -> StoreResult<Vec<String>>;
}
