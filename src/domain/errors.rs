//! Domain error types
//!
//! This module defines the error hierarchy for Rulebridge.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Rulebridge error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RuleBridgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Graph API errors
    #[error("Graph API error: {0}")]
    Graph(#[from] GraphError),

    /// Currency conversion errors
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Validation errors (malformed rules, malformed export files)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transfer orchestration errors
    #[error("Transfer error: {0}")]
    Transfer(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Graph API errors
///
/// Errors that occur when talking to the Ads Manager Graph endpoint.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to Graph endpoint: {0}")]
    ConnectionFailed(String),

    /// Response body was not the JSON shape we expected
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The server answered with an `error` object
    #[error("Graph API error {code}: {message}")]
    Api { code: i64, message: String },

    /// A page was returned without a `data` array
    #[error("Page for {0} has no data field")]
    MissingData(String),

    /// A `paging.next` cursor pointed back at an already fetched page
    #[error("Pagination loop detected at {0}")]
    PaginationLoop(String),

    /// Server error (5xx) with a non-JSON body
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx) with a non-JSON body
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl From<reqwest::Error> for GraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GraphError::Timeout(err.to_string())
        } else {
            GraphError::ConnectionFailed(err.to_string())
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RuleBridgeError {
    fn from(err: std::io::Error) -> Self {
        RuleBridgeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RuleBridgeError {
    fn from(err: serde_json::Error) -> Self {
        RuleBridgeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RuleBridgeError {
    fn from(err: toml::de::Error) -> Self {
        RuleBridgeError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuleBridgeError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_graph_error_conversion() {
        let graph_err = GraphError::Api {
            code: 190,
            message: "Invalid OAuth access token".to_string(),
        };
        let err: RuleBridgeError = graph_err.into();
        assert!(matches!(err, RuleBridgeError::Graph(GraphError::Api { code: 190, .. })));
        assert!(err.to_string().contains("Invalid OAuth access token"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: RuleBridgeError = io_err.into();
        assert!(matches!(err, RuleBridgeError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: RuleBridgeError = json_err.into();
        assert!(matches!(err, RuleBridgeError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: RuleBridgeError = toml_err.into();
        assert!(matches!(err, RuleBridgeError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = RuleBridgeError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = GraphError::MissingData("me/adaccounts".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
