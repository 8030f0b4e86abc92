//! Translation of collaborator errors into HTTP error envelopes
//!
//! Classification is table-driven on [`ErrorCode`], never on message text.
//! The envelope is the sole error shape on the wire: every failure leaves
//! this module as `{"error": {...}}` with a stable code, HTTP status and
//! timestamp, plus whitelisted context where a handler attached it.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use sumika_core::{supported_media_types, ErrorCode, StoreError};
use tracing::{error, warn};

/// Context keys allowed into an envelope; everything else is dropped
pub const CONTEXT_WHITELIST: [&str; 6] = [
    "resourceID",
    "containerID",
    "contentType",
    "format",
    "operation",
    "size",
];

/// Vocabulary that marks a cause string as a client-side format problem
///
/// Only causes containing one of these markers are ever disclosed;
/// filesystem, network and database flavored causes never reach the wire.
/// This list gates disclosure only - status classification stays on the
/// error code.
const SAFE_CAUSE_MARKERS: [&str; 9] = [
    "format",
    "parse",
    "syntax",
    "malformed",
    "invalid",
    "unexpected token",
    "encoding",
    "utf-8",
    "json",
];

/// Whether a cause string is safe to show to the client
pub fn is_safe_cause(cause: &str) -> bool {
    let lowered = cause.to_ascii_lowercase();
    SAFE_CAUSE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Fixed code-to-status table; total over the closed taxonomy
pub const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ResourceNotFound | ErrorCode::ContainerNotFound => StatusCode::NOT_FOUND,
        ErrorCode::UnsupportedFormat => StatusCode::NOT_ACCEPTABLE,
        ErrorCode::InsufficientStorage => StatusCode::INSUFFICIENT_STORAGE,
        ErrorCode::DataCorruption | ErrorCode::ChecksumMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::FormatConversionFailed
        | ErrorCode::InvalidId
        | ErrorCode::InvalidRequest
        | ErrorCode::InvalidResource
        | ErrorCode::InvalidHierarchy
        | ErrorCode::EmptyBody => StatusCode::BAD_REQUEST,
        ErrorCode::ResourceExists | ErrorCode::ContainerExists | ErrorCode::ContainerNotEmpty => {
            StatusCode::CONFLICT
        }
        ErrorCode::StorageOperationFailed | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_formats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorEnvelope {
    fn new(code: ErrorCode, message: String) -> Self {
        ErrorEnvelope {
            code: code.as_str().to_string(),
            message,
            status: status_for(code).as_u16(),
            timestamp: Utc::now(),
            operation: None,
            context: None,
            supported_formats: None,
            suggestion: None,
        }
    }
}

/// A translated protocol error, ready to become an HTTP response
#[derive(Debug, Clone)]
pub struct ApiError {
    code: ErrorCode,
    envelope: ErrorEnvelope,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn new(code: ErrorCode, message: String) -> Self {
        ApiError {
            code,
            envelope: ErrorEnvelope::new(code, message),
        }
    }

    /// 400 INVALID_REQUEST with a handler-supplied reason
    pub fn invalid_request(reason: &str) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, reason.to_string())
    }

    /// 400 EMPTY_BODY for write verbs called without a payload
    pub fn empty_body() -> Self {
        ApiError::new(
            ErrorCode::EmptyBody,
            "request body must not be empty".to_string(),
        )
    }

    /// 400 INVALID_REQUEST for write verbs missing a Content-Type header
    pub fn missing_content_type() -> Self {
        ApiError::new(
            ErrorCode::InvalidRequest,
            "Content-Type header is required".to_string(),
        )
    }

    /// 406 with the supported media type list attached
    pub fn not_acceptable() -> Self {
        let mut err = ApiError::new(
            ErrorCode::UnsupportedFormat,
            "no supported representation matches the Accept header".to_string(),
        );
        err.envelope.supported_formats = Some(owned_media_types());
        err
    }

    /// 500 with a fixed message; internal detail never reaches the wire
    pub fn internal() -> Self {
        ApiError::new(
            ErrorCode::InternalError,
            "an internal error occurred".to_string(),
        )
    }

    /// Attach the failing operation name
    pub fn with_operation(mut self, operation: &str) -> Self {
        self.envelope.operation = Some(operation.to_string());
        self
    }

    /// Attach diagnostic context, keeping only whitelisted keys
    pub fn with_context<I>(mut self, context: I) -> Self
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        let filtered: BTreeMap<String, serde_json::Value> = context
            .into_iter()
            .filter(|(key, _)| CONTEXT_WHITELIST.contains(&key.as_str()))
            .collect();
        if !filtered.is_empty() {
            self.envelope.context = Some(filtered);
        }
        self
    }

    /// Machine code of this error
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }

    /// The envelope that will be serialized
    pub fn envelope(&self) -> &ErrorEnvelope {
        &self.envelope
    }
}

/// Client-facing message for a collaborator error
///
/// Storage failures collapse to a generic line; conversion and corruption
/// details pass through only when the cause is format-flavored.
fn public_message(err: &StoreError) -> String {
    match err {
        StoreError::StorageFailure { operation, .. } => {
            format!("storage operation {operation} failed")
        }
        StoreError::FormatConversionFailed { from, to, detail } => {
            if is_safe_cause(detail) {
                format!("format conversion from {from} to {to} failed: {detail}")
            } else {
                format!("format conversion from {from} to {to} failed")
            }
        }
        StoreError::DataCorruption { id, detail } => {
            if is_safe_cause(detail) {
                format!("data corruption detected for {id}: {detail}")
            } else {
                format!("data corruption detected for {id}")
            }
        }
        other => other.to_string(),
    }
}

fn owned_media_types() -> Vec<String> {
    supported_media_types()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let code = err.code();
        let mut translated = ApiError::new(code, public_message(&err));
        match code {
            ErrorCode::UnsupportedFormat => {
                translated.envelope.supported_formats = Some(owned_media_types());
            }
            ErrorCode::InsufficientStorage => {
                translated.envelope.suggestion =
                    Some("reduce the payload size or delete unused resources".to_string());
            }
            ErrorCode::DataCorruption | ErrorCode::ChecksumMismatch => {
                translated.envelope.suggestion = Some("retry the upload".to_string());
            }
            _ => {}
        }
        translated
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let operation = self.envelope.operation.as_deref().unwrap_or("-");
        if self.code.is_client_error() {
            warn!(
                code = %self.envelope.code,
                status = status.as_u16(),
                operation,
                context = ?self.envelope.context,
                "{}",
                self.envelope.message
            );
        } else {
            error!(
                code = %self.envelope.code,
                status = status.as_u16(),
                operation,
                context = ?self.envelope.context,
                "{}",
                self.envelope.message
            );
        }
        (status, Json(json!({ "error": self.envelope }))).into_response()
    }
}
