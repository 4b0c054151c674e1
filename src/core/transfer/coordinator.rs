//! Transfer coordinator - orchestrates export, import and bulk deletion
//!
//! Everything runs strictly in sequence: one account at a time, one chunk at a
//! time, with the pacer's pause between units. A failure aborts the remaining
//! steps of the unit it happened in and never its siblings.

use super::delete::clear_rules;
use super::export::{build_bundle, prepare_export};
use super::import::{prepare_import, upload_message};
use super::progress::{ProgressLog, ProgressSink, Severity};
use super::summary::{
    AccountImportResult, DeleteOutcome, ExportOutcome, FanoutSummary, ImportReport, Operation,
};
use crate::adapters::graph::models::{slot_error_message, slot_succeeded, BatchSlot};
use crate::adapters::graph::RuleStore;
use crate::config::TransferConfig;
use crate::core::directory::AccountDirectory;
use crate::core::pacing::Pacer;
use crate::domain::{AccountId, RawRule, Result, Rule, RuleId};
use crate::{log_chunk_progress, log_transfer_start};
use chrono::Utc;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

/// Knobs of a transfer run
#[derive(Debug, Clone, PartialEq)]
pub struct TransferSettings {
    /// Operations per batch request
    pub batch_size: usize,
    /// Create through the batch endpoint, or one request per rule
    pub use_batch_requests: bool,
    /// Status for imported rules that don't carry one
    pub default_status: String,
    /// Where export bundles are written
    pub output_dir: PathBuf,
    /// Log writes instead of sending them
    pub dry_run: bool,
}

impl TransferSettings {
    pub fn from_config(config: &TransferConfig, dry_run: bool) -> Self {
        Self {
            batch_size: config.batch_size,
            use_batch_requests: config.use_batch_requests,
            default_status: config.default_status.clone(),
            output_dir: PathBuf::from(&config.output_dir),
            dry_run,
        }
    }
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self::from_config(&TransferConfig::default(), false)
    }
}

/// Transfer coordinator
pub struct TransferCoordinator {
    store: Arc<dyn RuleStore>,
    pacer: Pacer,
    sink: Arc<dyn ProgressSink>,
    settings: TransferSettings,
}

impl TransferCoordinator {
    pub fn new(
        store: Arc<dyn RuleStore>,
        pacer: Pacer,
        sink: Arc<dyn ProgressSink>,
        settings: TransferSettings,
    ) -> Self {
        Self {
            store,
            pacer,
            sink,
            settings,
        }
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    /// Lists an account's rules as the server reports them
    pub async fn list_rules(&self, account_id: &AccountId) -> Result<Vec<RawRule>> {
        self.store.list_rules(account_id).await
    }

    /// Exports one account's rules, normalized to USD, into a bundle file
    ///
    /// # Errors
    ///
    /// Listing the rules or writing the file failed. Individual bad rules are
    /// skipped, not errors.
    pub async fn export_account(
        &self,
        directory: &AccountDirectory,
        account_id: &AccountId,
    ) -> Result<ExportOutcome> {
        let mut log = ProgressLog::new(self.sink.as_ref());
        self.export_with_log(directory, account_id, &mut log).await
    }

    /// Exports each account in turn, pausing between accounts
    pub async fn export_accounts(
        &self,
        directory: &AccountDirectory,
        account_ids: &[AccountId],
    ) -> FanoutSummary {
        let mut summary = FanoutSummary::new(Operation::Export);

        for (idx, account_id) in account_ids.iter().enumerate() {
            if idx > 0 {
                self.pacer.between_accounts().await;
            }

            let mut log = ProgressLog::new(self.sink.as_ref());
            match self.export_with_log(directory, account_id, &mut log).await {
                Ok(_) => summary.record_success(),
                Err(e) => {
                    let message = format!(
                        "Export failed for {}: {e}",
                        directory.label_for(account_id)
                    );
                    log.error(message.clone());
                    summary.record_failure(account_id, message);
                }
            }
            summary.log.extend(log.into_lines());
        }

        self.finish(&mut summary, directory);
        summary
    }

    async fn export_with_log(
        &self,
        directory: &AccountDirectory,
        account_id: &AccountId,
        log: &mut ProgressLog<'_>,
    ) -> Result<ExportOutcome> {
        let label = directory.label_for(account_id);
        let currency = directory.currency_for(account_id);

        let raw_rules = self.store.list_rules(account_id).await?;
        log_transfer_start!("export", account_id, raw_rules.len());
        log.info(format!(
            "Exporting {} rules from {label} ({})...",
            raw_rules.len(),
            currency.currency
        ));

        let prepared = prepare_export(raw_rules, &currency, log);
        if prepared.rules.is_empty() {
            log.warn(format!("No rules to export for {label}"));
            return Ok(ExportOutcome {
                account_id: account_id.clone(),
                path: None,
                exported: 0,
                skipped: prepared.skipped,
            });
        }

        let exported_at = Utc::now();
        let exported = prepared.rules.len();
        let bundle = build_bundle(prepared.rules, account_id, &currency, exported_at);
        let path = bundle.write_to_dir(&self.settings.output_dir, exported_at.date_naive())?;

        log.emit(
            format!(
                "Exported {exported} rules from {label} to {}",
                path.display()
            ),
            Severity::Success,
        );

        Ok(ExportOutcome {
            account_id: account_id.clone(),
            path: Some(path),
            exported,
            skipped: prepared.skipped,
        })
    }

    /// Imports bundle rules into one account
    ///
    /// Never fails as a whole: the returned result says whether the account
    /// completed, how many rules made it, and carries the account's log (success
    /// line first). Every line is also appended to `aggregate_log`.
    pub async fn import_account(
        &self,
        directory: &mut AccountDirectory,
        account_id: &AccountId,
        rules: &[Value],
        clear_existing: bool,
        aggregate_log: &mut Vec<String>,
    ) -> AccountImportResult {
        let label = directory.label_for(account_id);
        let mut log = ProgressLog::new(self.sink.as_ref());
        let mut result = AccountImportResult::new(account_id.clone(), rules.len());

        let run = self
            .run_import(directory, account_id, rules, clear_existing, &mut log, &mut result)
            .await;

        match run {
            Ok(()) => {
                result.success = true;
                let headline = format!(
                    "Imported {}/{} rules into {label}",
                    result.imported_count, result.total_rules
                );
                self.sink.log(&headline, Severity::Success);
                result.log.push(headline);
                result.log.extend(log.into_lines());

                if !self.settings.dry_run {
                    if clear_existing {
                        directory.update_rule_count(account_id, result.imported_count);
                    } else {
                        directory.add_to_rule_count(account_id, result.imported_count);
                    }
                }
            }
            Err(e) => {
                let message = format!("Import failed for {label}: {e}");
                log.error(message.clone());
                result.errors.push(message);
                result.log.extend(log.into_lines());
            }
        }

        aggregate_log.extend(result.log.iter().cloned());
        result
    }

    /// `PENDING -> clearing? -> converting -> chunk 1 -> delay -> chunk 2 ... -> DONE`
    async fn run_import(
        &self,
        directory: &AccountDirectory,
        account_id: &AccountId,
        rules: &[Value],
        clear_existing: bool,
        log: &mut ProgressLog<'_>,
        result: &mut AccountImportResult,
    ) -> Result<()> {
        let label = directory.label_for(account_id);
        let currency = directory.currency_for(account_id);
        let batch_size = self.settings.batch_size.max(1);

        log_transfer_start!("import", account_id, rules.len());

        if clear_existing {
            if self.settings.dry_run {
                log.info(format!("[dry run] Would delete existing autorules of {label}"));
            } else {
                let outcome =
                    clear_rules(self.store.as_ref(), &self.pacer, log, account_id, batch_size)
                        .await?;
                result.cleared = outcome.deleted;
                log.info(format!(
                    "Cleared {} existing autorules from {label}",
                    outcome.deleted
                ));
            }
        }

        let first_skip_line = log.lines().len();
        let prepared = prepare_import(rules, &currency, &self.settings.default_status, log);
        result
            .errors
            .extend(log.lines()[first_skip_line..].iter().cloned());

        if prepared.is_empty() {
            log.warn(format!("No valid rules to import into {label}"));
            return Ok(());
        }

        if self.settings.dry_run {
            log.info(format!(
                "[dry run] Would import {} rules into {label} ({})",
                prepared.len(),
                currency.currency
            ));
            return Ok(());
        }

        let chunks: Vec<&[Rule]> = prepared.chunks(batch_size).collect();
        let total_chunks = chunks.len();

        for (idx, chunk) in chunks.iter().enumerate() {
            log_chunk_progress!(idx + 1, total_chunks, chunk.len());

            if self.settings.use_batch_requests {
                log.info(upload_message(idx, batch_size, chunk.len(), prepared.len()));
                match self.store.create_rules_batch(account_id, chunk).await {
                    Ok(slots) => self.record_batch(chunk, &slots, log, result),
                    Err(e) => {
                        let message = format!("Batch error for {label}: {e}");
                        log.error(message.clone());
                        result.errors.push(message);
                    }
                }
            } else {
                for rule in chunk.iter() {
                    match self.store.create_rule(account_id, rule).await {
                        Ok(_) => result.imported_count += 1,
                        Err(e) => {
                            let message = format!("Failed to import rule '{}': {e}", rule.name);
                            log.warn(message.clone());
                            result.errors.push(message);
                        }
                    }
                }
            }

            if idx + 1 < total_chunks {
                log.info(format!(
                    "Batch {}/{total_chunks} complete. Waiting {}ms before next batch...",
                    idx + 1,
                    self.pacer.policy().batch_delay.as_millis()
                ));
                self.pacer.between_chunks().await;
            }
        }

        Ok(())
    }

    fn record_batch(
        &self,
        chunk: &[Rule],
        slots: &[BatchSlot],
        log: &mut ProgressLog<'_>,
        result: &mut AccountImportResult,
    ) {
        for (idx, rule) in chunk.iter().enumerate() {
            let slot = slots.get(idx).cloned().flatten();
            if slot_succeeded(&slot) {
                result.imported_count += 1;
            } else {
                let message = format!(
                    "Failed to import rule '{}': {}",
                    rule.name,
                    slot_error_message(&slot)
                );
                log.warn(message.clone());
                result.errors.push(message);
            }
        }
    }

    /// Imports the same rules into each account in turn
    pub async fn import_accounts(
        &self,
        directory: &mut AccountDirectory,
        account_ids: &[AccountId],
        rules: &[Value],
        clear_existing: bool,
    ) -> ImportReport {
        let mut summary = FanoutSummary::new(Operation::Import);
        let mut accounts = Vec::with_capacity(account_ids.len());

        for (idx, account_id) in account_ids.iter().enumerate() {
            if idx > 0 {
                self.pacer.between_accounts().await;
            }

            let result = self
                .import_account(directory, account_id, rules, clear_existing, &mut summary.log)
                .await;

            if result.success {
                summary.record_success();
            } else {
                let reason = result
                    .errors
                    .last()
                    .cloned()
                    .unwrap_or_else(|| "Import failed".to_string());
                summary.record_failure(account_id, reason);
            }
            accounts.push(result);
        }

        self.finish(&mut summary, directory);
        ImportReport { summary, accounts }
    }

    /// Deletes every rule of one account
    ///
    /// # Errors
    ///
    /// Only when listing the account's rules fails; failed chunks are counted
    /// in the outcome.
    pub async fn delete_account_rules(
        &self,
        directory: &mut AccountDirectory,
        account_id: &AccountId,
    ) -> Result<DeleteOutcome> {
        let mut log = ProgressLog::new(self.sink.as_ref());
        self.delete_with_log(directory, account_id, &mut log).await
    }

    /// Deletes every rule of each account in turn
    pub async fn delete_accounts(
        &self,
        directory: &mut AccountDirectory,
        account_ids: &[AccountId],
    ) -> FanoutSummary {
        let mut summary = FanoutSummary::new(Operation::Delete);

        for (idx, account_id) in account_ids.iter().enumerate() {
            if idx > 0 {
                self.pacer.between_accounts().await;
            }

            let label = directory.label_for(account_id);
            let mut log = ProgressLog::new(self.sink.as_ref());
            match self.delete_with_log(directory, account_id, &mut log).await {
                Ok(outcome) if outcome.is_complete() => summary.record_success(),
                Ok(outcome) => summary.record_failure(
                    account_id,
                    format!(
                        "{} of {} rules not deleted for {label} ({} batches failed)",
                        outcome.found.saturating_sub(outcome.deleted),
                        outcome.found,
                        outcome.failed_chunks
                    ),
                ),
                Err(e) => {
                    let message = format!("Delete failed for {label}: {e}");
                    log.error(message.clone());
                    summary.record_failure(account_id, message);
                }
            }
            summary.log.extend(log.into_lines());
        }

        self.finish(&mut summary, directory);
        summary
    }

    async fn delete_with_log(
        &self,
        directory: &mut AccountDirectory,
        account_id: &AccountId,
        log: &mut ProgressLog<'_>,
    ) -> Result<DeleteOutcome> {
        let label = directory.label_for(account_id);

        if self.settings.dry_run {
            let found = self.store.list_rules(account_id).await?.len();
            log.info(format!("[dry run] Would delete {found} autorules from {label}"));
            return Ok(DeleteOutcome {
                found,
                ..DeleteOutcome::default()
            });
        }

        log_transfer_start!("delete", account_id, "all");
        let outcome = clear_rules(
            self.store.as_ref(),
            &self.pacer,
            log,
            account_id,
            self.settings.batch_size,
        )
        .await?;

        directory.update_rule_count(account_id, outcome.found.saturating_sub(outcome.deleted));
        let severity = if outcome.is_complete() {
            Severity::Success
        } else {
            Severity::Warning
        };
        log.emit(
            format!(
                "Deleted {}/{} autorules from {label}",
                outcome.deleted, outcome.found
            ),
            severity,
        );
        Ok(outcome)
    }

    /// Deletes a single rule
    pub async fn delete_rule(&self, rule_id: &RuleId) -> Result<()> {
        if self.settings.dry_run {
            self.sink
                .log(&format!("[dry run] Would delete rule {rule_id}"), Severity::Info);
            return Ok(());
        }
        self.store.delete_rule(rule_id).await?;
        self.sink
            .log(&format!("Deleted rule {rule_id}"), Severity::Success);
        Ok(())
    }

    /// Runs a single rule now
    pub async fn execute_rule(&self, rule_id: &RuleId) -> Result<()> {
        if self.settings.dry_run {
            self.sink
                .log(&format!("[dry run] Would execute rule {rule_id}"), Severity::Info);
            return Ok(());
        }
        self.store.execute_rule(rule_id).await?;
        self.sink
            .log(&format!("Executed rule {rule_id}"), Severity::Success);
        Ok(())
    }

    fn finish(&self, summary: &mut FanoutSummary, directory: &AccountDirectory) {
        let headline = summary.headline();
        let severity = if summary.is_successful() {
            Severity::Success
        } else {
            Severity::Warning
        };
        self.sink.log(&headline, severity);
        summary.log.push(headline);
        summary.log_summary();
        self.sink.refresh(directory.all());
    }
}
