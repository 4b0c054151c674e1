//! Domain identifier types with validation
//!
//! Newtype wrappers for ad account and rule identifiers. Each type ensures
//! type safety and validates the format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ad account identifier
///
/// Always stored as the bare numeric id. The Graph API reports accounts as
/// `act_<digits>`; the prefix is stripped on construction and added back by
/// [`AccountId::graph_node`] when building request paths.
///
/// # Examples
///
/// ```
/// use rulebridge::domain::ids::AccountId;
/// use std::str::FromStr;
///
/// let id = AccountId::from_str("act_123456").unwrap();
/// assert_eq!(id.as_str(), "123456");
/// assert_eq!(id.graph_node(), "act_123456");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Creates a new AccountId, stripping an `act_` prefix if present
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        let bare = trimmed.strip_prefix("act_").unwrap_or(trimmed);

        if bare.is_empty() {
            return Err("Account ID cannot be empty".to_string());
        }
        if !bare.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Account ID must be numeric, got: {id}"));
        }

        Ok(Self(bare.to_string()))
    }

    /// Returns the bare numeric id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the Graph node name (`act_<id>`)
    pub fn graph_node(&self) -> String {
        format!("act_{}", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Automated rule identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleId(String);

impl RuleId {
    /// Creates a new RuleId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Rule ID cannot be empty".to_string());
        }
        Ok(Self(id.trim().to_string()))
    }

    /// Returns the rule ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RuleId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RuleId> for String {
    fn from(id: RuleId) -> Self {
        id.0
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parses a comma-separated list of account ids, as accepted on the command line
pub fn parse_account_list(input: &str) -> Result<Vec<AccountId>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(AccountId::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("123456", "123456" ; "bare id")]
    #[test_case("act_123456", "123456" ; "prefixed id")]
    #[test_case("  act_42 ", "42" ; "surrounding whitespace")]
    fn test_account_id_normalization(input: &str, expected: &str) {
        let id = AccountId::new(input).unwrap();
        assert_eq!(id.as_str(), expected);
        assert_eq!(id.graph_node(), format!("act_{expected}"));
    }

    #[test_case("" ; "empty")]
    #[test_case("act_" ; "prefix only")]
    #[test_case("act_12a4" ; "non numeric")]
    fn test_account_id_invalid(input: &str) {
        assert!(AccountId::new(input).is_err());
    }

    #[test]
    fn test_account_id_serde_roundtrip() {
        let id: AccountId = serde_json::from_str("\"act_99\"").unwrap();
        assert_eq!(id.as_str(), "99");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"99\"");
    }

    #[test]
    fn test_rule_id_validation() {
        assert!(RuleId::new("").is_err());
        assert!(RuleId::new("   ").is_err());
        assert_eq!(RuleId::new("2384").unwrap().as_str(), "2384");
    }

    #[test]
    fn test_parse_account_list() {
        let ids = parse_account_list("act_1, 2,,3").unwrap();
        let bare: Vec<&str> = ids.iter().map(AccountId::as_str).collect();
        assert_eq!(bare, vec!["1", "2", "3"]);

        assert!(parse_account_list("1,abc").is_err());
    }
}
