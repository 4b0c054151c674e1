//! Export command implementation
//!
//! This module implements the `export` command: each selected account's
//! rules are normalized to USD and written to a bundle file.

use super::session::{report_summary, Session};
use crate::cli::AccountSelection;
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: AccountSelection,

    /// Directory the bundle files are written to (overrides `transfer.output_dir`)
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut session = match Session::connect(config_path).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            session.config.transfer.output_dir = dir.clone();
        }

        let account_ids = match session.resolve(&self.selection) {
            Ok(ids) => ids,
            Err(code) => return Ok(code),
        };

        println!(
            "🚀 Exporting autorules from {} account(s) to {}",
            account_ids.len(),
            session.config.transfer.output_dir
        );
        println!();

        let coordinator = session.coordinator(false);
        let summary = coordinator
            .export_accounts(&session.directory, &account_ids)
            .await;

        Ok(report_summary(&summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_args_defaults() {
        let args = ExportArgs {
            selection: AccountSelection {
                account: Some("1".to_string()),
                all: false,
            },
            output_dir: None,
        };

        assert!(!args.selection.all);
        assert!(args.output_dir.is_none());
    }
}
