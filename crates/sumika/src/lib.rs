//! # 🏠 Sumika - Linked Data Platform Server Stack
//!
//! Sumika is a Rust stack for serving linked data resources and containers over HTTP.
//! Built on LDP-style container semantics and JSON-LD, Turtle, and RDF/XML serializations,
//! it provides RFC 7231 content negotiation, validated caching, and a closed error taxonomy.
//!
//! ## Features
//!
//! - **🤝 Content Negotiation**: Quality-ranked Accept handling with wildcard and alias support
//! - **📦 Container Semantics**: LDP BasicContainer membership with atomic create-then-link
//! - **🏷️ Validated Caching**: Deterministic SHA-256 ETags on every read surface
//! - **🚦 Closed Error Taxonomy**: Stable machine-readable codes with whitelisted context
//! - **📄 Lenient Pagination**: Per-field fallback so malformed queries never fail a listing
//! - **🔧 Rust Ecosystem**: Memory-safe, async-first, constructor-injected collaborators
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sumika::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a server over fresh in-memory stores
//!     let server = LdpServer::new();
//!
//!     println!("Serving on {}", server.address());
//!
//!     // Serve until ctrl-c or SIGTERM
//!     server.run_with_shutdown(shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Sumika consists of several specialized crates:
//!
//! - **`sumika-core`**: Domain model, RDF format registry, and error taxonomy
//! - **`sumika-store`**: In-memory resource and container stores
//! - **`sumika-api`**: RESTful web API with content negotiation
//! - **`sumika-cli`**: Command-line interface
//!
//! ## Feature Flags
//!
//! - `full` (default): All crates included
//! - `core`: Only core data models
//! - `store`: In-memory store implementations
//! - `api`: REST API server
//! - `cli`: Command-line tools

// Re-export all public APIs from sub-crates (feature-gated)

#[cfg(feature = "sumika-core")]
pub use sumika_core as core;

#[cfg(feature = "sumika-store")]
pub use sumika_store as store;

#[cfg(feature = "sumika-api")]
pub use sumika_api as api;

#[cfg(feature = "sumika-cli")]
pub use sumika_cli as cli;

// Convenience re-exports for common types (feature-gated)
#[cfg(feature = "sumika-core")]
pub use sumika_core::model;

#[cfg(feature = "sumika-core")]
pub use sumika_core::{Container, RdfFormat, Resource, StoreError};

#[cfg(feature = "sumika-store")]
pub use sumika_store::{MemoryContainerStore, MemoryResourceStore};

#[cfg(feature = "sumika-api")]
pub use sumika_api::{shutdown_signal, LdpServer, ServerConfig};

// Commonly used external dependencies
pub use anyhow;
pub use serde;
pub use serde_json;
pub use tokio;

/// Prelude module for convenient imports
///
/// ```rust
/// use sumika::prelude::*;
/// ```
pub mod prelude {
    // Core types (feature-gated)
    #[cfg(feature = "sumika-core")]
    pub use crate::model::*;

    #[cfg(feature = "sumika-core")]
    pub use sumika_core::{ContainerStore, ResourceStore};

    #[cfg(feature = "sumika-store")]
    pub use crate::MemoryContainerStore;
    #[cfg(feature = "sumika-store")]
    pub use crate::MemoryResourceStore;

    #[cfg(feature = "sumika-api")]
    pub use crate::shutdown_signal;
    #[cfg(feature = "sumika-api")]
    pub use crate::LdpServer;
    #[cfg(feature = "sumika-api")]
    pub use crate::ServerConfig;

    // Common external types
    pub use anyhow::Result;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::Value;
    pub use tokio;
}

// Module declarations for organization (feature-gated)
#[cfg(feature = "sumika-api")]
pub mod web {
    //! Web API and services
    pub use sumika_api::*;
}

#[cfg(feature = "sumika-cli")]
pub mod cli_tools {
    //! Command-line tools
    pub use sumika_cli::*;
}

// Version information
/// Current version of Sumika
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
pub mod build_info {
    /// Build timestamp (fallback value)
    pub const BUILD_TIME: &str = "2024-01-01T00:00:00Z";
    /// Git commit hash (fallback value)
    pub const GIT_SHA: &str = "unknown";
    /// Git commit date (fallback value)
    pub const GIT_COMMIT_DATE: &str = "2024-01-01T00:00:00Z";
}

/// Health check function
///
/// Returns basic system information to verify Sumika is working correctly.
pub fn health_check() -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "version": VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "modules": {
            "core": cfg!(feature = "sumika-core"),
            "store": cfg!(feature = "sumika-store"),
            "api": cfg!(feature = "sumika-api"),
            "cli": cfg!(feature = "sumika-cli")
        }
    })
}
