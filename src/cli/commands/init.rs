//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "rulebridge.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Rulebridge configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your session token:");
                println!("     - Set RULEBRIDGE_ACCESS_TOKEN");
                println!("  3. Validate configuration: rulebridge validate-config");
                println!("  4. List your ad accounts: rulebridge accounts");
                println!("  5. Export rules: rulebridge export --account <ID>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Sample configuration with every option at its default
    pub fn generate_config() -> String {
        r#"# Rulebridge Configuration File
# Export, import and bulk-delete automated ad rules across ad accounts

[application]
log_level = "info"
# Read from the API but never create or delete anything
dry_run = false

[graph]
base_url = "https://adsmanager-graph.facebook.com"
api_version = "v23.0"
# Session access token, read from the environment (or .env)
access_token = "${RULEBRIDGE_ACCESS_TOKEN}"
timeout_seconds = 60
locale = "en_US"

[transfer]
# Rules per batch request (Graph accepts at most 50)
batch_size = 40
# Pauses between rate-limited requests
batch_delay_ms = 600
account_delay_ms = 1000
delete_delay_ms = 300
# false creates rules one request at a time
use_batch_requests = true
# Status for imported rules that don't carry one (ENABLED or DISABLED)
default_status = "ENABLED"
# Where export bundles are written
output_dir = "."

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
