//! CLI command definitions and execution

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use sumika_api::{shutdown_signal, LdpServer, ServerConfig};
use sumika_core::{supported_media_types, RdfFormat, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use sumika_store::{MemoryContainerStore, MemoryResourceStore};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "sumika-cli", version, about = "Linked data platform server and tooling")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server over in-memory stores
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind
        #[arg(long, default_value_t = 4010)]
        port: u16,
        /// Bootstrap a root container with this id before serving
        #[arg(long, value_name = "ID")]
        root: Option<String>,
    },
    /// Print the effective configuration and supported formats
    Check,
}

/// Outcome of an executed command
#[derive(Debug, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Executes parsed commands
pub struct CommandExecutor;

impl CommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute a command to completion
    pub async fn execute(&mut self, command: Commands) -> Result<CommandResult> {
        match command {
            Commands::Serve { host, port, root } => self.serve(host, port, root).await,
            Commands::Check => self.check(),
        }
    }

    async fn serve(
        &mut self,
        host: String,
        port: u16,
        root: Option<String>,
    ) -> Result<CommandResult> {
        let config = ServerConfig {
            host,
            port,
            ..ServerConfig::default()
        };

        let resources = Arc::new(MemoryResourceStore::new());
        let containers = Arc::new(MemoryContainerStore::new());

        if let Some(root_id) = root.as_deref() {
            containers.bootstrap_root(root_id).await?;
            info!(root = root_id, "root container ready");
        }

        let server = LdpServer::with_stores(config, resources, containers);
        let address = server.address();
        server.run_with_shutdown(shutdown_signal()).await?;

        Ok(CommandResult {
            success: true,
            message: format!("Server on {} stopped", address),
            data: None,
        })
    }

    fn check(&self) -> Result<CommandResult> {
        let defaults = ServerConfig::default();
        let data = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "defaultAddress": format!("{}:{}", defaults.host, defaults.port),
            "maxConnections": defaults.max_connections,
            "defaultFormat": RdfFormat::default_format().media_type(),
            "supportedFormats": supported_media_types(),
            "pagination": {
                "defaultLimit": DEFAULT_PAGE_LIMIT,
                "maxLimit": MAX_PAGE_LIMIT,
            },
        });

        Ok(CommandResult {
            success: true,
            message: format!("sumika {} configuration ok", env!("CARGO_PKG_VERSION")),
            data: Some(data),
        })
    }
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}
