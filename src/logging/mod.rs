//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (overridable through `RUST_LOG`)
//! - Local JSON file logging with rotation
//! - Helper macros for the recurring transfer events
//!
//! # Example
//!
//! ```no_run
//! use rulebridge::logging::init_logging;
//! use rulebridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a transfer for one account
///
/// # Example
///
/// ```no_run
/// use rulebridge::log_transfer_start;
/// use rulebridge::domain::AccountId;
///
/// let account_id = AccountId::new("act_123").unwrap();
/// log_transfer_start!("import", &account_id, 12);
/// ```
#[macro_export]
macro_rules! log_transfer_start {
    ($operation:expr, $account_id:expr, $rules:expr) => {
        tracing::info!(
            operation = $operation,
            account_id = %$account_id,
            rules = $rules,
            "Starting transfer"
        );
    };
}

/// Log progress through the chunks of one account
///
/// # Example
///
/// ```no_run
/// use rulebridge::log_chunk_progress;
///
/// log_chunk_progress!(2, 3, 40);
/// ```
#[macro_export]
macro_rules! log_chunk_progress {
    ($chunk:expr, $chunks:expr, $size:expr) => {
        tracing::debug!(
            chunk = $chunk,
            chunks = $chunks,
            size = $size,
            progress_pct = ($chunk as f64 / $chunks as f64 * 100.0),
            "Processing chunk"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use rulebridge::log_error_with_context;
/// use rulebridge::domain::RuleBridgeError;
///
/// let error = RuleBridgeError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{AccountId, RuleBridgeError};

    #[test]
    fn test_macros_expand() {
        let account_id = AccountId::new("42").unwrap();
        log_transfer_start!("export", &account_id, 3usize);
        log_chunk_progress!(1usize, 2usize, 40usize);
        log_error_with_context!(&RuleBridgeError::Other("boom".to_string()), "test");
    }
}
