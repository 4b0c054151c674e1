//! Domain models and types for Rulebridge.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`AccountId`], [`RuleId`])
//! - **Domain models** ([`Rule`], [`RawRule`], [`Account`], [`ExportBundle`])
//! - **Error types** ([`RuleBridgeError`], [`GraphError`])
//! - **Result type alias** ([`Result`])
//!
//! # Boundary validation
//!
//! Anything read from the Graph API or from an export file enters as a
//! [`RawRule`] and becomes a [`Rule`] only after its required fields are
//! checked:
//!
//! ```rust
//! use rulebridge::domain::{RawRule, Rule};
//!
//! let raw = RawRule { name: Some("no specs".to_string()), ..Default::default() };
//! assert!(Rule::try_from_raw(raw).is_err());
//! ```

pub mod account;
pub mod bundle;
pub mod errors;
pub mod ids;
pub mod result;
pub mod rule;

// Re-export commonly used types for convenience
pub use account::{Account, CurrencyContext};
pub use bundle::{load_bundle, BundleMetadata, ExportBundle, ImportBundle};
pub use errors::{GraphError, RuleBridgeError};
pub use ids::{AccountId, RuleId};
pub use result::Result;
pub use rule::{EvaluationSpec, Filter, RawRule, Rule};
