//! Terminal presentation of transfer progress

use crate::core::transfer::progress::{trace_message, ProgressSink, Severity};
use crate::domain::Account;

/// Prints progress lines to stdout and mirrors them to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    /// Print the account table when a bulk operation finishes
    pub show_accounts: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            show_accounts: true,
        }
    }
}

impl ProgressSink for ConsoleSink {
    fn log(&self, message: &str, severity: Severity) {
        println!("{} {message}", status_prefix(severity));
        trace_message(message, severity);
    }

    fn refresh(&self, accounts: &[Account]) {
        if self.show_accounts && !accounts.is_empty() {
            println!();
            print_account_table(accounts);
        }
    }
}

fn status_prefix(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️ ",
        Severity::Success => "✅",
        Severity::Warning => "⚠️ ",
        Severity::Error => "❌",
    }
}

/// Prints id, name, currency, rate and rule count for each account
pub fn print_account_table(accounts: &[Account]) {
    for line in account_table(accounts) {
        println!("{line}");
    }
}

/// Account table as text lines, header first
pub fn account_table(accounts: &[Account]) -> Vec<String> {
    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(4, 40);

    let mut lines = Vec::with_capacity(accounts.len() + 2);
    lines.push(format!(
        "  {:<18} {:<name_width$} {:<8} {:>12} {:>6}",
        "ID", "Name", "Currency", "Rate to USD", "Rules"
    ));
    lines.push(format!("  {}", "-".repeat(18 + name_width + 8 + 12 + 6 + 4)));

    for account in accounts {
        let name: String = account.name.chars().take(name_width).collect();
        lines.push(format!(
            "  {:<18} {:<name_width$} {:<8} {:>12.4} {:>6}",
            account.id.as_str(),
            name,
            account.currency,
            account.conversion_rate,
            account.rule_count
        ));
    }

    lines
}
