//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod accounts;
pub mod delete;
pub mod export;
pub mod import;
pub mod init;
pub mod rule;
pub mod rules;
pub mod session;
pub mod validate;
