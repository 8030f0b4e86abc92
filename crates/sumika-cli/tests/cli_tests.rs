//! Tests for the cli crate

use clap::Parser;
use sumika_cli::commands::{Cli, CommandExecutor, CommandResult, Commands};

#[test]
fn test_cli_parsing_serve_defaults() {
    let args = vec!["sumika-cli", "serve"];
    let cli = Cli::try_parse_from(args).unwrap();

    match cli.command {
        Commands::Serve { host, port, root } => {
            assert_eq!(host, "0.0.0.0");
            assert_eq!(port, 4010);
            assert_eq!(root, None);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_cli_parsing_serve() {
    let args = vec![
        "sumika-cli",
        "serve",
        "--host",
        "127.0.0.1",
        "--port",
        "8080",
        "--root",
        "root",
    ];
    let cli = Cli::try_parse_from(args).unwrap();

    match cli.command {
        Commands::Serve { host, port, root } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, 8080);
            assert_eq!(root, Some("root".to_string()));
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_cli_parsing_check() {
    let args = vec!["sumika-cli", "check"];
    let cli = Cli::try_parse_from(args).unwrap();

    match cli.command {
        Commands::Check => {} // Expected
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_cli_requires_subcommand() {
    let args = vec!["sumika-cli"];
    let result = Cli::try_parse_from(args);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_invalid_port() {
    let args = vec!["sumika-cli", "serve", "--port", "not-a-port"];
    let result = Cli::try_parse_from(args);
    assert!(result.is_err());
}

#[test]
fn test_command_result_creation() {
    let success_result = CommandResult {
        success: true,
        message: "Operation completed".to_string(),
        data: Some(serde_json::json!({"count": 5})),
    };

    assert!(success_result.success);
    assert_eq!(success_result.message, "Operation completed");
    assert!(success_result.data.is_some());

    let error_result = CommandResult {
        success: false,
        message: "Operation failed".to_string(),
        data: None,
    };

    assert!(!error_result.success);
    assert_eq!(error_result.message, "Operation failed");
    assert!(error_result.data.is_none());
}

#[tokio::test]
async fn test_command_executor_check() {
    let mut executor = CommandExecutor::new();
    let result = executor.execute(Commands::Check).await.unwrap();

    assert!(result.success);
    assert!(result.message.contains("configuration ok"));

    let data = result.data.unwrap();
    let info = data.as_object().unwrap();
    assert!(info.contains_key("name"));
    assert!(info.contains_key("version"));
    assert!(info.contains_key("defaultAddress"));

    let formats = data["supportedFormats"].as_array().unwrap();
    assert_eq!(formats[0], "application/ld+json");
    assert_eq!(formats.len(), 3);

    assert_eq!(data["pagination"]["defaultLimit"], 50);
    assert_eq!(data["pagination"]["maxLimit"], 1000);
}
