//! Protocol route definitions

use axum::{
    extract::Extension,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::containers::*;
use crate::models::HealthResponse;
use crate::resources::*;
use crate::state::AppState;

/// Liveness probe handler
pub async fn health_check(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Create the main protocol router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health and status routes
        .route("/health", get(health_check))

        // Resource protocol routes
        .route(
            "/resources",
            post(create_resource).options(resource_collection_options),
        )
        .route(
            "/resources/:id",
            get(get_resource)
                .post(create_resource_with_id)
                .put(put_resource)
                .delete(delete_resource)
                .head(head_resource)
                .options(resource_options),
        )

        // Container protocol routes
        .route(
            "/containers/:id",
            get(get_container)
                .post(create_container_member)
                .put(update_container)
                .delete(delete_container)
                .head(head_container)
                .options(container_options),
        )

        // Apply middleware
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
