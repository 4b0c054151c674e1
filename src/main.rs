// Rulebridge - Automated ad rule transfer tool
// Copyright (c) 2025 Rulebridge Contributors
// Licensed under the MIT License

use clap::Parser;
use rulebridge::cli::{Cli, Commands};
use rulebridge::config::{load_config, LoggingConfig};
use rulebridge::log_error_with_context;
use rulebridge::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // File logging follows the config file when it loads; commands report
    // config errors themselves, so a bad file here only means console logging
    let file_config = load_config(&cli.config).ok();
    let logging_config = file_config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(LoggingConfig::default);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Rulebridge - Automated ad rule transfer tool"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            log_error_with_context!(e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, flush the file writer first
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Accounts(args) => args.execute(&cli.config).await,
        Commands::Rules(args) => args.execute(&cli.config).await,
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Import(args) => args.execute(&cli.config).await,
        Commands::Delete(args) => args.execute(&cli.config).await,
        Commands::DeleteRule(args) => args.execute(&cli.config).await,
        Commands::Execute(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
