//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Rulebridge using clap.

pub mod commands;
pub mod console;

use clap::{Args, Parser, Subcommand};

/// Rulebridge - move automated ad rules between ad accounts
#[derive(Parser, Debug)]
#[command(name = "rulebridge")]
#[command(version, about, long_about = None)]
#[command(author = "Rulebridge Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "rulebridge.toml", env = "RULEBRIDGE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RULEBRIDGE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the ad accounts visible to the session
    Accounts(commands::accounts::AccountsArgs),

    /// List the automated rules of one account
    Rules(commands::rules::RulesArgs),

    /// Export rules to USD-normalized bundle files
    Export(commands::export::ExportArgs),

    /// Import a bundle file into one or more accounts
    Import(commands::import::ImportArgs),

    /// Delete every automated rule of one or more accounts
    Delete(commands::delete::DeleteArgs),

    /// Delete a single rule
    DeleteRule(commands::rule::DeleteRuleArgs),

    /// Run a single rule now
    Execute(commands::rule::ExecuteArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Target accounts of a multi-account command
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct AccountSelection {
    /// Account ID(s), comma-separated (`act_` prefix optional)
    #[arg(short, long, value_name = "IDS")]
    pub account: Option<String>,

    /// Every account visible to the session
    #[arg(long)]
    pub all: bool,
}
