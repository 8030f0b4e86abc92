//! Protocol handlers for single RDF resources
//!
//! Each handler is an independent unit of work: extract, negotiate or
//! validate, delegate to the storage collaborator, shape the response.
//! Nothing is cached between requests.

use axum::extract::{Extension, Path};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use sumika_core::ErrorCode;
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::etag::resource_etag;
use crate::models::{DeleteSummary, PutOutcome, ResourceSummary};
use crate::negotiation::negotiate;
use crate::state::AppState;
use crate::ACCEPT_POST;

pub(crate) fn accept_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

pub(crate) fn required_content_type(headers: &HeaderMap) -> ApiResult<String> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(ApiError::missing_content_type)
}

pub(crate) fn require_id(id: &str, what: &str) -> ApiResult<()> {
    if id.trim().is_empty() {
        return Err(ApiError::invalid_request(&format!("{what} must not be empty")));
    }
    Ok(())
}

/// GET /resources/:id
pub async fn get_resource(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    require_id(&id, "resource id").map_err(|err| err.with_operation("get_resource"))?;
    // An Accept header that matches nothing is a 406 on resource reads
    let format = negotiate(accept_header(&headers)).ok_or_else(|| {
        ApiError::not_acceptable()
            .with_operation("get_resource")
            .with_context([("resourceID".to_string(), json!(id.clone()))])
    })?;
    let resource = state
        .resources
        .retrieve(&id, Some(format))
        .await
        .map_err(|err| {
            ApiError::from(err)
                .with_operation("get_resource")
                .with_context([
                    ("resourceID".to_string(), json!(id.clone())),
                    ("format".to_string(), json!(format.media_type())),
                ])
        })?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, resource.content_type.clone()),
            (header::CONTENT_LENGTH, resource.size.to_string()),
            (header::ETAG, resource_etag(&resource)),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        resource.data,
    )
        .into_response())
}

/// POST /resources - id is generated server-side
pub async fn create_resource(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let content_type =
        required_content_type(&headers).map_err(|err| err.with_operation("create_resource"))?;
    if body.is_empty() {
        return Err(ApiError::empty_body().with_operation("create_resource"));
    }
    // UUIDv7: time-ordered and collision-free under concurrent POSTs
    let id = Uuid::now_v7().to_string();
    store_created(&state, &id, body, &content_type, "create_resource").await
}

/// POST /resources/:id - client names the resource
pub async fn create_resource_with_id(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    require_id(&id, "resource id").map_err(|err| err.with_operation("create_resource"))?;
    let content_type =
        required_content_type(&headers).map_err(|err| err.with_operation("create_resource"))?;
    if body.is_empty() {
        return Err(ApiError::empty_body().with_operation("create_resource"));
    }
    store_created(&state, &id, body, &content_type, "create_resource").await
}

async fn store_created(
    state: &AppState,
    id: &str,
    body: Bytes,
    content_type: &str,
    operation: &str,
) -> ApiResult<Response> {
    let size = body.len();
    let resource = state
        .resources
        .store_new(id, body, content_type)
        .await
        .map_err(|err| {
            ApiError::from(err).with_operation(operation).with_context([
                ("resourceID".to_string(), json!(id)),
                ("contentType".to_string(), json!(content_type)),
                ("size".to_string(), json!(size)),
            ])
        })?;
    let summary = ResourceSummary {
        id: resource.id.clone(),
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

/// PUT /resources/:id - create or replace; the status code reports which
pub async fn put_resource(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    require_id(&id, "resource id").map_err(|err| err.with_operation("put_resource"))?;
    let content_type =
        required_content_type(&headers).map_err(|err| err.with_operation("put_resource"))?;
    if body.is_empty() {
        return Err(ApiError::empty_body().with_operation("put_resource"));
    }
    // Existence decides 200-vs-201 before the write lands
    let existed = state.resources.exists(&id).await.map_err(|err| {
        ApiError::from(err)
            .with_operation("put_resource")
            .with_context([("resourceID".to_string(), json!(id.clone()))])
    })?;
    let size = body.len();
    let resource = state
        .resources
        .store(&id, body, &content_type)
        .await
        .map_err(|err| {
            ApiError::from(err)
                .with_operation("put_resource")
                .with_context([
                    ("resourceID".to_string(), json!(id.clone())),
                    ("contentType".to_string(), json!(content_type.clone())),
                    ("size".to_string(), json!(size)),
                ])
        })?;
    let outcome = PutOutcome {
        id: resource.id.clone(),
        status: if existed { "updated" } else { "created" }.to_string(),
        content_type: resource.content_type.clone(),
        size: resource.size,
    };
    if existed {
        Ok((
            StatusCode::OK,
            [(header::ETAG, resource_etag(&resource))],
            Json(outcome),
        )
            .into_response())
    } else {
        Ok((
            StatusCode::CREATED,
            [
                (header::LOCATION, format!("/resources/{}", resource.id)),
                (header::ETAG, resource_etag(&resource)),
            ],
            Json(outcome),
        )
            .into_response())
    }
}

/// DELETE /resources/:id - the collaborator owns the existence check
pub async fn delete_resource(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    require_id(&id, "resource id").map_err(|err| err.with_operation("delete_resource"))?;
    state.resources.delete(&id).await.map_err(|err| {
        ApiError::from(err)
            .with_operation("delete_resource")
            .with_context([("resourceID".to_string(), json!(id.clone()))])
    })?;
    Ok(Json(DeleteSummary { id, deleted: true }).into_response())
}

/// HEAD /resources/:id - headers only, bare status codes, no envelope
pub async fn head_resource(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if id.trim().is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let Some(format) = negotiate(accept_header(&headers)) else {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    };
    match state.resources.retrieve(&id, Some(format)).await {
        Ok(resource) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, resource.content_type.clone()),
                (header::CONTENT_LENGTH, resource.size.to_string()),
                (header::ETAG, resource_etag(&resource)),
                (header::CACHE_CONTROL, "no-cache".to_string()),
            ],
        )
            .into_response(),
        Err(err) => {
            let code = err.code();
            if code.is_client_error() {
                warn!(id = %id, code = %code, "resource head failed");
            } else {
                error!(id = %id, code = %code, "resource head failed");
            }
            match code {
                ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
                ErrorCode::UnsupportedFormat => StatusCode::NOT_ACCEPTABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
            .into_response()
        }
    }
}

/// OPTIONS /resources/:id - static capability advertisement
pub async fn resource_options() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (
                header::ALLOW,
                "GET, POST, PUT, DELETE, HEAD, OPTIONS".to_string(),
            ),
            (ACCEPT_POST, sumika_core::supported_media_types().join(", ")),
        ],
    )
}

/// OPTIONS /resources
pub async fn resource_collection_options() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ALLOW, "POST, OPTIONS".to_string()),
            (ACCEPT_POST, sumika_core::supported_media_types().join(", ")),
        ],
    )
}
