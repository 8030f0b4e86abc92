//! Closed error taxonomy shared by the collaborators and the protocol layer
//!
//! Collaborators return [`StoreError`] variants; protocol code classifies
//! them through [`StoreError::code`] and matches on [`ErrorCode`], never on
//! message text. The taxonomy is closed: adding a variant means extending
//! the tables here and in the HTTP translator together.

use thiserror::Error;

/// Stable machine codes carried on the wire
///
/// The set is a superset of what collaborators produce: `EmptyBody` and
/// `InternalError` are minted by the protocol layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ResourceNotFound,
    ContainerNotFound,
    UnsupportedFormat,
    InsufficientStorage,
    DataCorruption,
    ChecksumMismatch,
    FormatConversionFailed,
    InvalidId,
    InvalidRequest,
    InvalidResource,
    InvalidHierarchy,
    ResourceExists,
    ContainerExists,
    ContainerNotEmpty,
    StorageOperationFailed,
    EmptyBody,
    InternalError,
}

impl ErrorCode {
    /// Wire representation used in error envelopes
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ContainerNotFound => "CONTAINER_NOT_FOUND",
            ErrorCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorCode::InsufficientStorage => "INSUFFICIENT_STORAGE",
            ErrorCode::DataCorruption => "DATA_CORRUPTION",
            ErrorCode::ChecksumMismatch => "CHECKSUM_MISMATCH",
            ErrorCode::FormatConversionFailed => "FORMAT_CONVERSION_FAILED",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InvalidResource => "INVALID_RESOURCE",
            ErrorCode::InvalidHierarchy => "INVALID_HIERARCHY",
            ErrorCode::ResourceExists => "RESOURCE_EXISTS",
            ErrorCode::ContainerExists => "CONTAINER_EXISTS",
            ErrorCode::ContainerNotEmpty => "CONTAINER_NOT_EMPTY",
            ErrorCode::StorageOperationFailed => "STORAGE_OPERATION_FAILED",
            ErrorCode::EmptyBody => "EMPTY_BODY",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Client-caused codes log at warn level, system/storage codes at error
    pub const fn is_client_error(&self) -> bool {
        !matches!(
            self,
            ErrorCode::InsufficientStorage
                | ErrorCode::StorageOperationFailed
                | ErrorCode::InternalError
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors returned by the storage and container collaborators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("resource not found: {id}")]
    ResourceNotFound { id: String },

    #[error("container not found: {id}")]
    ContainerNotFound { id: String },

    #[error("unsupported format: {format}")]
    UnsupportedFormat { format: String },

    #[error("insufficient storage: {requested} bytes requested, {available} available")]
    InsufficientStorage { requested: usize, available: usize },

    #[error("data corruption detected for {id}: {detail}")]
    DataCorruption { id: String, detail: String },

    #[error("checksum mismatch for {id}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("format conversion from {from} to {to} failed: {detail}")]
    FormatConversionFailed {
        from: String,
        to: String,
        detail: String,
    },

    #[error("invalid id {id:?}: {reason}")]
    InvalidId { id: String, reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("invalid resource {id}: {reason}")]
    InvalidResource { id: String, reason: String },

    #[error("invalid hierarchy for container {container_id}: {reason}")]
    InvalidHierarchy { container_id: String, reason: String },

    #[error("resource already exists: {id}")]
    ResourceExists { id: String },

    #[error("container already exists: {id}")]
    ContainerExists { id: String },

    #[error("container {id} is not empty ({member_count} members)")]
    ContainerNotEmpty { id: String, member_count: usize },

    #[error("storage operation {operation} failed: {detail}")]
    StorageFailure { operation: String, detail: String },
}

impl StoreError {
    /// Total mapping into the wire code table
    pub const fn code(&self) -> ErrorCode {
        match self {
            StoreError::ResourceNotFound { .. } => ErrorCode::ResourceNotFound,
            StoreError::ContainerNotFound { .. } => ErrorCode::ContainerNotFound,
            StoreError::UnsupportedFormat { .. } => ErrorCode::UnsupportedFormat,
            StoreError::InsufficientStorage { .. } => ErrorCode::InsufficientStorage,
            StoreError::DataCorruption { .. } => ErrorCode::DataCorruption,
            StoreError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
            StoreError::FormatConversionFailed { .. } => ErrorCode::FormatConversionFailed,
            StoreError::InvalidId { .. } => ErrorCode::InvalidId,
            StoreError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            StoreError::InvalidResource { .. } => ErrorCode::InvalidResource,
            StoreError::InvalidHierarchy { .. } => ErrorCode::InvalidHierarchy,
            StoreError::ResourceExists { .. } => ErrorCode::ResourceExists,
            StoreError::ContainerExists { .. } => ErrorCode::ContainerExists,
            StoreError::ContainerNotEmpty { .. } => ErrorCode::ContainerNotEmpty,
            StoreError::StorageFailure { .. } => ErrorCode::StorageOperationFailed,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
