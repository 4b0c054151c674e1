//! Accounts command implementation
//!
//! Lists every ad account the session can see, with the currency data the
//! transfers convert with.

use super::session::Session;
use crate::cli::console::print_account_table;
use clap::Args;

/// Arguments for the accounts command
#[derive(Args, Debug)]
pub struct AccountsArgs {}

impl AccountsArgs {
    /// Execute the accounts command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting accounts command");

        let session = match Session::connect(config_path).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };

        if session.directory.is_empty() {
            println!("⚠️  No ad accounts are visible to this session");
            return Ok(0);
        }

        print_account_table(session.directory.all());
        println!();
        Ok(0)
    }
}
