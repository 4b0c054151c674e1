//! Delete command implementation
//!
//! This module implements the `delete` command: every automated rule of each
//! selected account is deleted in chunks.

use super::session::{confirm, report_summary, Session};
use crate::cli::AccountSelection;
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub selection: AccountSelection,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - count the rules without deleting them
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteArgs {
    /// Execute the delete command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting delete command");

        let mut session = match Session::connect(config_path).await {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };
        let account_ids = match session.resolve(&self.selection) {
            Ok(ids) => ids,
            Err(code) => return Ok(code),
        };

        let dry_run = self.dry_run || session.config.application.dry_run;
        if dry_run {
            println!("🔍 DRY RUN MODE - No rules will be deleted");
            println!();
        }

        if !self.yes && !dry_run {
            println!("⚠️  This will DELETE ALL autorules from:");
            for id in &account_ids {
                let rules = session
                    .directory
                    .find_by_id(id)
                    .map_or(0, |a| a.rule_count);
                println!("    - {} ({rules} rules)", session.directory.label_for(id));
            }
            println!();

            if !confirm("Proceed with delete?")? {
                println!("Delete cancelled.");
                return Ok(0);
            }
        }

        let coordinator = session.coordinator(dry_run);
        let summary = coordinator
            .delete_accounts(&mut session.directory, &account_ids)
            .await;

        Ok(report_summary(&summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_args_defaults() {
        let args = DeleteArgs {
            selection: AccountSelection {
                account: Some("1,2".to_string()),
                all: false,
            },
            yes: false,
            dry_run: false,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert_eq!(args.selection.account.as_deref(), Some("1,2"));
    }
}
