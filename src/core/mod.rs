//! Core business logic for Rulebridge.
//!
//! # Modules
//!
//! - [`directory`] - Ad account cache with currency and rule counts
//! - [`pacing`] - Fixed-interval gate between rate-limited requests
//! - [`transfer`] - Export, import and bulk delete orchestration
//!
//! # Transfer Workflow
//!
//! 1. **Load accounts**: fill the [`directory::AccountDirectory`] from the Graph API
//! 2. **Export**: list rules, convert monetary filters to USD, write a bundle
//! 3. **Import**: validate bundle rules, convert from USD, create in chunks
//! 4. **Report**: every multi-account run ends with a processed/succeeded/failed summary
//!
//! # Example
//!
//! ```rust,no_run
//! use rulebridge::adapters::graph::{GraphClient, RuleRepository};
//! use rulebridge::config::load_config;
//! use rulebridge::core::directory::AccountDirectory;
//! use rulebridge::core::pacing::{Pacer, PacingPolicy};
//! use rulebridge::core::transfer::{TracingSink, TransferCoordinator, TransferSettings};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rulebridge.toml")?;
//! let client = GraphClient::new(&config.graph)?;
//!
//! let mut directory = AccountDirectory::new();
//! directory.load_all(&client).await?;
//!
//! let coordinator = TransferCoordinator::new(
//!     Arc::new(RuleRepository::new(client, &config.graph.locale)),
//!     Pacer::tokio(PacingPolicy::from(&config.transfer)),
//!     Arc::new(TracingSink),
//!     TransferSettings::from_config(&config.transfer, false),
//! );
//!
//! let summary = coordinator
//!     .export_accounts(&directory, &directory.ids())
//!     .await;
//! println!("{}", summary.headline());
//! # Ok(())
//! # }
//! ```

pub mod directory;
pub mod pacing;
pub mod transfer;
