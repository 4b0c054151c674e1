//! Result type alias for Rulebridge

use super::errors::RuleBridgeError;

/// Result type alias for Rulebridge operations
///
/// # Examples
///
/// ```
/// use rulebridge::domain::result::Result;
/// use rulebridge::domain::errors::RuleBridgeError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RuleBridgeError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RuleBridgeError>;
