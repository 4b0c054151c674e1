//! Import command implementation
//!
//! This module implements the `import` command: a bundle file is validated,
//! then its rules are converted from USD to each target account's currency and
//! created in chunks.

use super::session::{confirm, report_summary, Session};
use crate::cli::AccountSelection;
use crate::domain::load_bundle;
use clap::Args;

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Bundle file written by `export`
    #[arg(short, long)]
    pub file: String,

    #[command(flatten)]
    pub selection: AccountSelection,

    /// Delete every existing rule of each target account first
    #[arg(long)]
    pub clear_existing: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - log what would be created without sending writes
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, "Starting import command");

        let bundle = match load_bundle(&self.file) {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::error!(file = %self.file, error = %e, "Invalid bundle file");
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(metadata) = &bundle.metadata {
            println!(
                "📦 {} rules exported from account {} ({}) on {}",
                bundle.rules.len(),
                metadata.source_account_id,
                metadata.source_currency,
                metadata.export_date
            );
        } else {
            println!("📦 {} rules in {}", bundle.rules.len(), self.file);
        }

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
            tracing::info!("Dry run mode enabled - no rules will be written");
            println!("🔍 DRY RUN MODE - No rules will be created or deleted");
            println!();
        }

        if !self.yes && !dry_run {
            println!("Import Configuration:");
            println!("  Rules: {}", bundle.rules.len());
            println!("  Target accounts:");
            for id in &account_ids {
                println!("    - {}", session.directory.label_for(id));
            }
            if self.clear_existing {
                println!("  ⚠️  Existing autorules of every target account will be DELETED first");
            }
            println!();

            if !confirm("Proceed with import?")? {
                println!("Import cancelled.");
                return Ok(0);
            }
        }

        let coordinator = session.coordinator(dry_run);
        let report = coordinator
            .import_accounts(
                &mut session.directory,
                &account_ids,
                &bundle.rules,
                self.clear_existing,
            )
            .await;

        println!();
        println!("📥 Per-account results:");
        for result in &report.accounts {
            let label = session.directory.label_for(&result.account_id);
            let marker = if result.success { "✅" } else { "❌" };
            println!(
                "  {marker} {label}: {}/{} imported",
                result.imported_count, result.total_rules
            );
            for error in result.errors.iter().take(10) {
                println!("      - {error}");
            }
            if result.errors.len() > 10 {
                println!("      ... and {} more errors", result.errors.len() - 10);
            }
        }
        println!("  Total rules imported: {}", report.imported_total());

        Ok(report_summary(&report.summary))
    }
}
