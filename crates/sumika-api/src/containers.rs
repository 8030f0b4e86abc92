//! Protocol handlers for LDP containers
//!
//! Containers compose the two collaborators: member creation stores the
//! resource first and links it second, with a compensating delete when
//! the link step fails.

use axum::extract::{Extension, Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use sumika_core::{
    Container, ContainerListing, ErrorCode, RdfFormat, StoreError, StoreResult,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::etag::{container_etag, resource_etag};
use crate::models::{ContainerMetadataPatch, ContainerMetadataView, DeleteSummary, MemberSummary};
use crate::negotiation::negotiate;
use crate::pagination;
use crate::resources::{accept_header, require_id, required_content_type};
use crate::state::AppState;
use crate::ACCEPT_POST;

const LDP_BASIC_CONTAINER_LINK: &str = "<http://www.w3.org/ns/ldp#BasicContainer>; rel=\"type\"";
const CONTAINER_ALLOW: &str = "GET, POST, PUT, DELETE, HEAD, OPTIONS";

/// JSON-LD member-listing document for a container snapshot
fn render_container_document(
    container: &Container,
    listing: &ContainerListing,
) -> serde_json::Value {
    let members: Vec<String> = listing
        .members
        .iter()
        .map(|member| format!("/resources/{member}"))
        .collect();
    let mut doc = json!({
        "@context": {
            "ldp": "http://www.w3.org/ns/ldp#",
            "dcterms": "http://purl.org/dc/terms/"
        },
        "@id": format!("/containers/{}", container.id),
        "@type": [container.container_type.as_ldp_type(), "ldp:Container"],
        "ldp:contains": members,
        "ldp:memberCount": listing.total,
        "dcterms:created": container.created_at.to_rfc3339(),
        "dcterms:modified": container.modified_at.to_rfc3339(),
        "pagination": {
            "limit": listing.pagination.limit,
            "offset": listing.pagination.offset,
            "returned": listing.members.len(),
        }
    });
    if let Some(title) = &container.title {
        doc["dcterms:title"] = json!(title);
    }
    if let Some(description) = &container.description {
        doc["dcterms:description"] = json!(description);
    }
    doc
}

async fn container_snapshot(
    state: &AppState,
    id: &str,
    params: &HashMap<String, String>,
) -> StoreResult<(Container, ContainerListing)> {
    let container = state.containers.get(id).await?;
    let window = pagination::resolve(params);
    let listing = state.containers.list_members(id, window).await?;
    Ok((container, listing))
}

/// GET /containers/:id - render one page of the membership index
pub async fn get_container(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    require_id(&id, "container id").map_err(|err| err.with_operation("get_container"))?;
    // Container reads fall back to the system default instead of 406
    let format = negotiate(accept_header(&headers)).unwrap_or_else(RdfFormat::default_format);
    let (container, listing) = container_snapshot(&state, &id, &params)
        .await
        .map_err(|err| {
            ApiError::from(err)
                .with_operation("get_container")
                .with_context([("containerID".to_string(), json!(id.clone()))])
        })?;
    let body = serde_json::to_vec(&render_container_document(&container, &listing)).map_err(
        |err| {
            error!(error = %err, "container document serialization failed");
            ApiError::internal().with_operation("get_container")
        },
    )?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.media_type().to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
            (header::ETAG, container_etag(&id, listing.total)),
            (header::CACHE_CONTROL, "no-cache".to_string()),
            (header::LINK, LDP_BASIC_CONTAINER_LINK.to_string()),
            (header::ALLOW, CONTAINER_ALLOW.to_string()),
            (ACCEPT_POST, sumika_core::supported_media_types().join(", ")),
        ],
        body,
    )
        .into_response())
}

/// POST /containers/:id - create a resource and link it as a member
pub async fn create_container_member(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    require_id(&id, "container id")
        .map_err(|err| err.with_operation("create_container_member"))?;
    // The container must exist before any byte is stored
    let present = state.containers.exists(&id).await.map_err(|err| {
        ApiError::from(err)
            .with_operation("create_container_member")
            .with_context([("containerID".to_string(), json!(id.clone()))])
    })?;
    if !present {
        return Err(
            ApiError::from(StoreError::ContainerNotFound { id: id.clone() })
                .with_operation("create_container_member")
                .with_context([("containerID".to_string(), json!(id.clone()))]),
        );
    }
    let content_type = required_content_type(&headers)
        .map_err(|err| err.with_operation("create_container_member"))?;
    if body.is_empty() {
        return Err(ApiError::empty_body().with_operation("create_container_member"));
    }

    let resource_id = Uuid::now_v7().to_string();
    let size = body.len();
    let resource = state
        .resources
        .store_new(&resource_id, body, &content_type)
        .await
        .map_err(|err| {
            ApiError::from(err)
                .with_operation("create_container_member")
                .with_context([
                    ("containerID".to_string(), json!(id.clone())),
                    ("contentType".to_string(), json!(content_type.clone())),
                    ("size".to_string(), json!(size)),
                ])
        })?;

    if let Err(link_err) = state.containers.add_member(&id, &resource_id).await {
        // Compensating delete keeps the non-transactional create-then-link
        // from leaking an orphaned resource; the client sees the link
        // failure either way, never a false 201
        match state.resources.delete(&resource_id).await {
            Ok(()) => warn!(
                container_id = %id,
                resource_id = %resource_id,
                link_error = %link_err,
                "member link failed, stored resource rolled back"
            ),
            Err(delete_err) => error!(
                container_id = %id,
                resource_id = %resource_id,
                link_error = %link_err,
                delete_error = %delete_err,
                "compensating delete failed after link failure"
            ),
        }
        return Err(ApiError::from(link_err)
            .with_operation("create_container_member")
            .with_context([
                ("containerID".to_string(), json!(id.clone())),
                ("resourceID".to_string(), json!(resource_id.clone())),
            ]));
    }

    let summary = MemberSummary {
        id: resource.id.clone(),
        container_id: id,
        content_type: resource.content_type.clone(),
        size: resource.size,
    };
    Ok((
        StatusCode::CREATED,
        [
            (header::LOCATION, format!("/resources/{}", resource.id)),
            (header::ETAG, resource_etag(&resource)),
        ],
        Json(summary),
    )
        .into_response())
}

/// PUT /containers/:id - merge metadata changes
pub async fn update_container(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Response> {
    require_id(&id, "container id").map_err(|err| err.with_operation("update_container"))?;
    if body.is_empty() {
        return Err(ApiError::empty_body().with_operation("update_container"));
    }
    let patch: ContainerMetadataPatch = serde_json::from_slice(&body).map_err(|err| {
        ApiError::invalid_request(&format!("invalid metadata body: {err}"))
            .with_operation("update_container")
            .with_context([("containerID".to_string(), json!(id.clone()))])
    })?;
    // An empty string means "leave unchanged"; clearing a field is not
    // possible through this verb
    let title = patch.title.filter(|value| !value.is_empty());
    let description = patch.description.filter(|value| !value.is_empty());
    let updated = state
        .containers
        .update_metadata(&id, title, description)
        .await
        .map_err(|err| {
            ApiError::from(err)
                .with_operation("update_container")
                .with_context([("containerID".to_string(), json!(id.clone()))])
        })?;
    Ok(Json(ContainerMetadataView {
        id: updated.id,
        title: updated.title,
        description: updated.description,
        modified_at: updated.modified_at,
    })
    .into_response())
}

/// DELETE /containers/:id - the collaborator enforces emptiness
pub async fn delete_container(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_id(&id, "container id").map_err(|err| err.with_operation("delete_container"))?;
    state.containers.delete(&id).await.map_err(|err| {
        ApiError::from(err)
            .with_operation("delete_container")
            .with_context([("containerID".to_string(), json!(id.clone()))])
    })?;
    Ok(Json(DeleteSummary { id, deleted: true }).into_response())
}

/// HEAD /containers/:id - headers-only mirror of GET, bare status codes
pub async fn head_container(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if id.trim().is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let format = negotiate(accept_header(&headers)).unwrap_or_else(RdfFormat::default_format);
    match container_snapshot(&state, &id, &params).await {
        Ok((container, listing)) => {
            let Ok(body) = serde_json::to_vec(&render_container_document(&container, &listing))
            else {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            };
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.media_type().to_string()),
                    (header::CONTENT_LENGTH, body.len().to_string()),
                    (header::ETAG, container_etag(&id, listing.total)),
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                    (header::LINK, LDP_BASIC_CONTAINER_LINK.to_string()),
                    (header::ALLOW, CONTAINER_ALLOW.to_string()),
                    (ACCEPT_POST, sumika_core::supported_media_types().join(", ")),
                ],
            )
                .into_response()
        }
        Err(err) => {
            let code = err.code();
            if code.is_client_error() {
                warn!(id = %id, code = %code, "container head failed");
            } else {
                error!(id = %id, code = %code, "container head failed");
            }
            match code {
                ErrorCode::ContainerNotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
            .into_response()
        }
    }
}

/// OPTIONS /containers/:id - static capability advertisement
pub async fn container_options() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, CONTAINER_ALLOW.to_string()),
            (ACCEPT_POST, sumika_core::supported_media_types().join(", ")),
            (header::LINK, LDP_BASIC_CONTAINER_LINK.to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sumika_core::PaginationOptions;

    fn create_test_snapshot() -> (Container, ContainerListing) {
        let container = Container::new("c1", None).with_title("Catalog");
        let listing = ContainerListing {
            container_id: "c1".to_string(),
            members: vec!["r1".to_string(), "r2".to_string()],
            total: 5,
            pagination: PaginationOptions { limit: 2, offset: 0 },
        };
        (container, listing)
    }

    #[test]
    fn test_document_renders_member_paths() {
        let (container, listing) = create_test_snapshot();
        let doc = render_container_document(&container, &listing);
        assert_eq!(doc["@id"], "/containers/c1");
        assert_eq!(doc["ldp:contains"][0], "/resources/r1");
        assert_eq!(doc["ldp:contains"][1], "/resources/r2");
    }

    #[test]
    fn test_document_types_and_counts() {
        let (container, listing) = create_test_snapshot();
        let doc = render_container_document(&container, &listing);
        assert_eq!(doc["@type"][0], "ldp:BasicContainer");
        assert_eq!(doc["@type"][1], "ldp:Container");
        // memberCount is the total, not the page size
        assert_eq!(doc["ldp:memberCount"], 5);
        assert_eq!(doc["pagination"]["returned"], 2);
        assert_eq!(doc["pagination"]["limit"], 2);
    }

    #[test]
    fn test_document_optional_metadata() {
        let (container, listing) = create_test_snapshot();
        let doc = render_container_document(&container, &listing);
        assert_eq!(doc["dcterms:title"], "Catalog");
        assert!(doc.get("dcterms:description").is_none());
        assert!(doc["dcterms:created"].is_string());
    }
}
