//! Sumika CLI main entry point

use anyhow::Result;
use clap::Parser;
use sumika_cli::commands::{Cli, CommandExecutor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Execute the command
    let mut executor = CommandExecutor::new();
    let result = executor.execute(cli.command).await?;

    if !result.message.is_empty() {
        println!("{}", result.message);
    }
    if let Some(data) = &result.data {
        println!("{}", serde_json::to_string_pretty(data)?);
    }

    // Exit with appropriate code
    if result.success {
        std::process::exit(0);
    } else {
        std::process::exit(1);
    }
}
