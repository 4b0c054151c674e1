//! External system integrations for Rulebridge.
//!
//! - [`graph`] - Ads Manager Graph API (pagination, batch endpoint, rules)
//!
//! # Design Pattern
//!
//! Adapters isolate the HTTP stack behind the [`graph::RuleStore`] trait so the
//! transfer orchestrator can be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use rulebridge::adapters::graph::{GraphClient, RuleRepository, RuleStore};
//! use rulebridge::config::{secret_string, GraphConfig};
//! use rulebridge::domain::AccountId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GraphConfig::new(secret_string("EAAB...".to_string()));
//! let repository = RuleRepository::new(GraphClient::new(&config)?, &config.locale);
//!
//! let rules = repository.list_rules(&AccountId::new("123")?).await?;
//! println!("{} rules", rules.len());
//! # Ok(())
//! # }
//! ```

pub mod graph;
