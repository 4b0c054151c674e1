// Rulebridge - Automated ad rule transfer tool
// Copyright (c) 2025 Rulebridge Contributors
// Licensed under the MIT License

//! # Rulebridge - automated ad rule transfer
//!
//! Rulebridge exports the automated rules of an ad account to a portable JSON
//! bundle, imports such bundles into other accounts, and bulk-deletes rules,
//! all through the Ads Manager Graph API.
//!
//! ## Overview
//!
//! Accounts bill in different currencies, so every monetary threshold in a rule
//! is normalized to USD on export and converted to the target account's currency
//! on import:
//!
//! - **Exporting** lists an account's rules and writes them with USD values
//! - **Importing** validates bundle rules, converts them and creates them in chunks
//! - **Deleting** removes an account's rules through the batch endpoint
//! - **Pacing** keeps a fixed pause between rate-limited requests
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Account directory, pacing and transfer orchestration
//! - [`currency`] - Currency table and the USD conversion engine
//! - [`adapters`] - Graph API client and rule repository
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rulebridge::adapters::graph::{GraphClient, RuleRepository};
//! use rulebridge::config::load_config;
//! use rulebridge::core::directory::AccountDirectory;
//! use rulebridge::core::pacing::{Pacer, PacingPolicy};
//! use rulebridge::core::transfer::{TracingSink, TransferCoordinator, TransferSettings};
//! use rulebridge::domain::load_bundle;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("rulebridge.toml")?;
//!     let client = GraphClient::new(&config.graph)?;
//!
//!     let mut directory = AccountDirectory::new();
//!     directory.load_all(&client).await?;
//!
//!     let coordinator = TransferCoordinator::new(
//!         Arc::new(RuleRepository::new(client, config.graph.locale.clone())),
//!         Pacer::tokio(PacingPolicy::from(&config.transfer)),
//!         Arc::new(TracingSink),
//!         TransferSettings::from_config(&config.transfer, false),
//!     );
//!
//!     let bundle = load_bundle("autorules_123_2025-01-31.json")?;
//!     let targets = directory.ids();
//!     let report = coordinator
//!         .import_accounts(&mut directory, &targets, &bundle.rules, false)
//!         .await;
//!
//!     println!("Imported {} rules", report.imported_total());
//!     Ok(())
//! }
//! ```
//!
//! ## Currency Conversion
//!
//! Conversion uses the account's "native units per USD" rate and the currency's
//! offset (minor units per major unit):
//!
//! `usd = native / rate * usd_offset / native_offset`, rounded half up to a
//! whole minor unit. See [`currency::convert`].
//!
//! ## Error Handling
//!
//! Rulebridge uses the [`domain::RuleBridgeError`] type for all errors:
//!
//! ```rust,no_run
//! use rulebridge::domain::RuleBridgeError;
//!
//! fn example() -> Result<(), RuleBridgeError> {
//!     let config = rulebridge::config::load_config("rulebridge.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Rulebridge uses structured logging with the `tracing` crate:
//!
//! ```rust
//! tracing::info!(account_id = "123", rules = 12, "Starting export");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod logging;
