//! Startup shared by the commands that talk to the Graph API
//!
//! Every helper here that can end a command returns `Err(exit_code)` after
//! printing the reason; the command returns that code as-is.

use crate::adapters::graph::{GraphClient, RuleRepository};
use crate::cli::console::ConsoleSink;
use crate::cli::AccountSelection;
use crate::config::{load_config, RuleBridgeConfig};
use crate::core::directory::AccountDirectory;
use crate::core::pacing::{Pacer, PacingPolicy};
use crate::core::transfer::{FanoutSummary, TransferCoordinator, TransferSettings};
use crate::domain::ids::parse_account_list;
use crate::domain::AccountId;
use crate::log_error_with_context;
use std::io::{self, Write};
use std::sync::Arc;

/// Loaded configuration, a Graph client and the account directory
pub struct Session {
    pub config: RuleBridgeConfig,
    pub client: GraphClient,
    pub directory: AccountDirectory,
}

/// Loads and validates the configuration file
///
/// Prints the failure and returns exit code 2 on error.
pub fn load_session_config(config_path: &str) -> Result<RuleBridgeConfig, i32> {
    match load_config(config_path) {
        Ok(config) => Ok(config),
        Err(e) => {
            log_error_with_context!(e, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration from {config_path}");
            eprintln!("   Error: {e}");
            Err(2)
        }
    }
}

impl Session {
    /// Builds the Graph client; the directory starts empty
    pub fn open(config: RuleBridgeConfig) -> Result<Self, i32> {
        let client = match GraphClient::new(&config.graph) {
            Ok(client) => client,
            Err(e) => {
                log_error_with_context!(e, "Failed to create Graph client");
                eprintln!("❌ Failed to create Graph client: {e}");
                return Err(2);
            }
        };

        Ok(Self {
            config,
            client,
            directory: AccountDirectory::new(),
        })
    }

    /// Loads the config file, builds the client and loads every account
    pub async fn connect(config_path: &str) -> Result<Self, i32> {
        let config = load_session_config(config_path)?;
        let mut session = Self::open(config)?;
        session.load_accounts().await?;
        Ok(session)
    }

    /// Fills the directory; exit code 4 when the accounts can't be fetched
    pub async fn load_accounts(&mut self) -> Result<(), i32> {
        println!("🔄 Loading ad accounts...");
        match self.directory.load_all(&self.client).await {
            Ok(accounts) => {
                println!("✅ Loaded {} ad accounts", accounts.len());
                println!();
                Ok(())
            }
            Err(e) => {
                log_error_with_context!(e, "Failed to load ad accounts");
                eprintln!("❌ Failed to load ad accounts: {e}");
                Err(4)
            }
        }
    }

    /// Coordinator over the Graph rule repository, printing to the console
    pub fn coordinator(&self, dry_run: bool) -> TransferCoordinator {
        let dry_run = dry_run || self.config.application.dry_run;
        TransferCoordinator::new(
            Arc::new(RuleRepository::new(
                self.client.clone(),
                self.config.graph.locale.clone(),
            )),
            Pacer::tokio(PacingPolicy::from(&self.config.transfer)),
            Arc::new(ConsoleSink::new()),
            TransferSettings::from_config(&self.config.transfer, dry_run),
        )
    }

    /// Resolves `--account`/`--all` against the loaded directory
    pub fn resolve(&self, selection: &AccountSelection) -> Result<Vec<AccountId>, i32> {
        match select_accounts(&self.directory, selection) {
            Ok(ids) => Ok(ids),
            Err(message) => {
                eprintln!("❌ {message}");
                Err(2)
            }
        }
    }
}

/// Account ids named by a selection, in the order given
///
/// Ids are checked against the directory because conversion needs each
/// account's currency.
pub fn select_accounts(
    directory: &AccountDirectory,
    selection: &AccountSelection,
) -> Result<Vec<AccountId>, String> {
    let ids = if selection.all {
        directory.ids()
    } else {
        let input = selection.account.as_deref().unwrap_or_default();
        let mut ids = parse_account_list(input)?;
        let mut seen = std::collections::HashSet::new();
        ids.retain(|id| seen.insert(id.clone()));
        ids
    };

    if ids.is_empty() {
        return Err("No accounts selected".to_string());
    }

    let unknown: Vec<&str> = ids
        .iter()
        .filter(|id| directory.find_by_id(id).is_none())
        .map(AccountId::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(format!(
            "Unknown account(s): {}. Run `rulebridge accounts` to list available accounts.",
            unknown.join(", ")
        ));
    }

    Ok(ids)
}

/// Asks a yes/no question on stdin; anything but `y` is a no
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Prints a multi-account summary and maps it to an exit code
pub fn report_summary(summary: &FanoutSummary) -> i32 {
    println!();
    println!("📊 Summary:");
    println!("  Accounts processed: {}", summary.processed);
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed: {}", summary.failed);
    println!("  Success Rate: {:.2}%", summary.success_rate());

    if !summary.failures.is_empty() {
        println!();
        println!("⚠️  Failures:");
        for (account_id, message) in &summary.failures {
            println!("  - {account_id}: {message}");
        }
    }
    println!();

    if summary.is_successful() {
        0
    } else {
        1 // Partial success
    }
}
