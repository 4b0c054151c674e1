//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Rulebridge configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Graph API: {}", config.graph.api_root());
        println!("  Locale: {}", config.graph.locale);
        println!("  Request Timeout: {}s", config.graph.timeout_seconds);
        println!("  Batch Size: {}", config.transfer.batch_size);
        println!(
            "  Delays: {}ms between batches, {}ms between accounts, {}ms between deletes",
            config.transfer.batch_delay_ms,
            config.transfer.account_delay_ms,
            config.transfer.delete_delay_ms
        );
        println!("  Batch Requests: {}", config.transfer.use_batch_requests);
        println!("  Default Status: {}", config.transfer.default_status);
        println!("  Output Directory: {}", config.transfer.output_dir);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
