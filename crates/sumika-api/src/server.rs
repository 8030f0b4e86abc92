//! HTTP server implementation

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::routes::create_router;
use crate::state::AppState;
use sumika_core::{ContainerStore, ResourceStore};
use sumika_store::{MemoryContainerStore, MemoryResourceStore};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_connections: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4010,
            max_connections: 100,
        }
    }
}

/// LDP protocol server
pub struct LdpServer {
    config: ServerConfig,
    state: AppState,
}

impl LdpServer {
    /// Create a server over fresh in-memory collaborators
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a server with custom configuration
    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(MemoryResourceStore::new()),
            Arc::new(MemoryContainerStore::new()),
        )
    }

    /// Create a server over caller-provided collaborators
    pub fn with_stores(
        config: ServerConfig,
        resources: Arc<dyn ResourceStore>,
        containers: Arc<dyn ContainerStore>,
    ) -> Self {
        LdpServer {
            config,
            state: AppState::new(resources, containers),
        }
    }

    /// The configured bind address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Create the application router
    pub fn create_app(&self) -> Router {
        create_router(Arc::new(self.state.clone()))
    }

    /// Start the server
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.address();
        let app = self.create_app();

        info!(%addr, "starting LDP protocol server");

        let listener = TcpListener::bind(&addr).await?;
        info!(local = %listener.local_addr()?, "server listening");

        axum::serve(listener, app).await.map_err(|err| {
            error!(error = %err, "server error");
            err.into()
        })
    }

    /// Run the server with graceful shutdown
    pub async fn run_with_shutdown(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let addr = self.address();
        let app = self.create_app();

        info!(%addr, "starting LDP protocol server with graceful shutdown");

        let listener = TcpListener::bind(&addr).await?;
        info!(local = %listener.local_addr()?, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| {
                error!(error = %err, "server error");
                err.into()
            })
    }
}

impl Default for LdpServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve when the process receives ctrl-c or SIGTERM
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to install interrupt handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
