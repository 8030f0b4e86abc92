//! # Sumika API
//!
//! LDPスタイルAPIのHTTPプロトコル層
//! Content negotiation, error translation, cache validation, pagination
//! and the resource/container verb handlers, behind an axum router.

use axum::http::HeaderName;

pub mod containers;
pub mod error;
pub mod etag;
pub mod models;
pub mod negotiation;
pub mod pagination;
pub mod resources;
pub mod routes;
pub mod server;
pub mod state;

pub use containers::*;
pub use error::*;
pub use etag::*;
pub use models::*;
pub use negotiation::*;
pub use resources::*;
pub use routes::*;
pub use server::*;
pub use state::*;

/// LDP `Accept-Post` response header
pub const ACCEPT_POST: HeaderName = HeaderName::from_static("accept-post");
