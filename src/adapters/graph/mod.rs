//! Graph API adapter
//!
//! Transport, wire models and the rule repository for the Ads Manager Graph
//! endpoint.

pub mod client;
pub mod models;
pub mod rules;

pub use client::GraphClient;
pub use models::{BatchEntry, BatchItemResponse, BatchSlot, Page, Paging};
pub use rules::{RuleRepository, RuleStore};
