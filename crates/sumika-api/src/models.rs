//! Wire payloads for protocol responses

use serde::{Deserialize, Serialize};

/// Body of a 201 after storing a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: String,
    pub content_type: String,
    pub size: usize,
}

/// Body of a 201 after creating a member inside a container
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: String,
    pub container_id: String,
    pub content_type: String,
    pub size: usize,
}

/// Body of a PUT on a resource; `status` is `"created"` or `"updated"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutOutcome {
    pub id: String,
    pub status: String,
    pub content_type: String,
    pub size: usize,
}

/// Body of a successful DELETE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteSummary {
    pub id: String,
    pub deleted: bool,
}

/// PUT body for container metadata; empty strings mean "leave unchanged"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerMetadataPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of a 200 after a container metadata update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerMetadataView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub modified_at: chrono::DateTime<chrono::Utc>,
}

/// Liveness payload served on `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
