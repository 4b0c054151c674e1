//! Configuration management for Rulebridge.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Rulebridge uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - `RULEBRIDGE_<SECTION>_<KEY>` environment overrides
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rulebridge::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("rulebridge.toml")?;
//!
//! println!("Graph root: {}", config.graph.api_root());
//! println!("Batch size: {}", config.transfer.batch_size);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run switch
//! - [`GraphConfig`] - Endpoint, API version and session token
//! - [`TransferConfig`] - Batch size, pacing delays and output directory
//! - [`LoggingConfig`] - Local JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [graph]
//! api_version = "v23.0"
//! access_token = "${RULEBRIDGE_ACCESS_TOKEN}"
//!
//! [transfer]
//! batch_size = 40
//! batch_delay_ms = 600
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, GraphConfig, LoggingConfig, RuleBridgeConfig, TransferConfig,
    MAX_BATCH_SIZE,
};
pub use secret::{secret_string, SecretString, SecretValue};
