//! Ad account record

use super::ids::AccountId;
use serde::{Deserialize, Serialize};

/// Currency assumed when the platform doesn't report one
pub const DEFAULT_CURRENCY: &str = "USD";

/// An ad account as known to the Account Directory
///
/// `conversion_rate` is "native currency units per 1 USD" as reported by the
/// platform; exactly `1.0` means the account is already in USD and rule values
/// are transferred untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Platform account status code (1 = active)
    pub status: Option<i64>,
    pub currency: String,
    pub conversion_rate: f64,
    /// Locally maintained after imports and deletes, never re-fetched
    pub rule_count: usize,
}

impl Account {
    /// Creates an account with USD currency and no rules
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: None,
            currency: DEFAULT_CURRENCY.to_string(),
            conversion_rate: 1.0,
            rule_count: 0,
        }
    }

    /// Sets the currency and its USD conversion rate
    pub fn with_currency(mut self, currency: impl Into<String>, conversion_rate: f64) -> Self {
        self.currency = currency.into();
        self.conversion_rate = conversion_rate;
        self
    }

    /// Sets the rule count
    pub fn with_rule_count(mut self, rule_count: usize) -> Self {
        self.rule_count = rule_count;
        self
    }

    /// Human readable label used in log lines: `Name (id)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

/// Currency context for a transfer, resolved from the directory
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyContext {
    pub currency: String,
    pub conversion_rate: f64,
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            conversion_rate: 1.0,
        }
    }
}

impl From<&Account> for CurrencyContext {
    fn from(account: &Account) -> Self {
        Self {
            currency: account.currency.clone(),
            conversion_rate: account.conversion_rate,
        }
    }
}
