//! Transfer results and reporting
//!
//! Per-account outcomes and the aggregate summary every multi-account
//! operation ends with, whatever happened along the way.

use crate::domain::AccountId;
use std::fmt;
use std::path::PathBuf;

/// Multi-account operation kind, for summaries and log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Export,
    Import,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Export => "export",
            Operation::Import => "import",
            Operation::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Summary of a multi-account operation
#[derive(Debug, Clone, PartialEq)]
pub struct FanoutSummary {
    pub operation: Operation,

    /// Accounts attempted
    pub processed: usize,

    /// Accounts that completed
    pub succeeded: usize,

    /// Accounts that failed
    pub failed: usize,

    /// Every progress line emitted, in order
    pub log: Vec<String>,

    /// `(account, message)` for each failed account
    pub failures: Vec<(AccountId, String)>,
}

impl FanoutSummary {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            processed: 0,
            succeeded: 0,
            failed: 0,
            log: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.processed += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, account_id: &AccountId, message: impl Into<String>) {
        self.processed += 1;
        self.failed += 1;
        self.failures.push((account_id.clone(), message.into()));
    }

    /// Check if every account completed
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.processed as f64) * 100.0
    }

    /// One-line summary, e.g. `Import finished: 3 processed, 2 succeeded, 1 failed`
    pub fn headline(&self) -> String {
        let operation = self.operation.to_string();
        let mut chars = operation.chars();
        let capitalized = chars
            .next()
            .map(|c| c.to_uppercase().collect::<String>() + chars.as_str())
            .unwrap_or_default();
        format!(
            "{capitalized} finished: {} processed, {} succeeded, {} failed",
            self.processed, self.succeeded, self.failed
        )
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            operation = %self.operation,
            processed = self.processed,
            succeeded = self.succeeded,
            failed = self.failed,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Transfer completed"
        );

        for (account_id, message) in &self.failures {
            tracing::warn!(account_id = %account_id, message = %message, "Account failed");
        }
    }
}

/// Outcome of exporting one account
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub account_id: AccountId,

    /// Written bundle; `None` when the account had nothing to export
    pub path: Option<PathBuf>,

    /// Rules written to the bundle
    pub exported: usize,

    /// Rules excluded because they failed to parse or convert
    pub skipped: usize,
}

/// Outcome of deleting an account's rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Rules found in the library
    pub found: usize,

    /// Rules the server confirmed as deleted
    pub deleted: usize,

    /// Chunks whose request failed outright
    pub failed_chunks: usize,

    /// Rules not deleted, whether rejected or part of a failed chunk
    pub failed: usize,
}

impl DeleteOutcome {
    /// No rule was left behind by a rejected item or a failed chunk
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Result of importing into one account
#[derive(Debug, Clone, PartialEq)]
pub struct AccountImportResult {
    pub account_id: AccountId,

    /// False when the account aborted (clearing failed, or a fatal error)
    pub success: bool,

    pub imported_count: usize,

    /// Rules in the input, valid or not
    pub total_rules: usize,

    /// Rules deleted before import
    pub cleared: usize,

    pub errors: Vec<String>,

    /// This account's progress lines, success line first
    pub log: Vec<String>,
}

impl AccountImportResult {
    pub fn new(account_id: AccountId, total_rules: usize) -> Self {
        Self {
            account_id,
            success: false,
            imported_count: 0,
            total_rules,
            cleared: 0,
            errors: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Rules that were not imported, for whatever reason
    pub fn not_imported(&self) -> usize {
        self.total_rules.saturating_sub(self.imported_count)
    }
}

/// Result of a multi-account import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub summary: FanoutSummary,
    pub accounts: Vec<AccountImportResult>,
}

impl ImportReport {
    /// Rules imported across all accounts
    pub fn imported_total(&self) -> usize {
        self.accounts.iter().map(|a| a.imported_count).sum()
    }
}
