//! Account directory
//!
//! In-memory cache of the ad accounts visible to the session, with their
//! currency, USD conversion rate and rule count. Loaded once from the Graph API;
//! rule counts are then maintained locally by the transfer orchestrator after
//! each successful operation.

use crate::adapters::graph::GraphClient;
use crate::domain::account::DEFAULT_CURRENCY;
use crate::domain::{Account, AccountId, CurrencyContext, Result};
use serde_json::Value;

/// Fields requested for each account, including the rule library for counts
pub const ACCOUNT_FIELDS: &str =
    "id,name,account_status,currency,account_currency_ratio_to_usd,adrules_library.limit(100){id,name}";

const ACCOUNTS_PATH: &str = "me/adaccounts";

/// Ordered account cache
///
/// Single writer: only the orchestrator mutates it, between operations.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory over already known accounts
    pub fn from_accounts(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }

    /// Replaces the cache with every account the session can see
    ///
    /// Accounts with an unusable id are logged and left out.
    ///
    /// # Errors
    ///
    /// Any failure fetching a page of accounts.
    pub async fn load_all(&mut self, client: &GraphClient) -> Result<&[Account]> {
        let items = client
            .fetch_all_pages(ACCOUNTS_PATH, &[("fields", ACCOUNT_FIELDS), ("limit", "100")])
            .await?;

        self.accounts = items.iter().filter_map(parse_account).collect();

        tracing::info!(
            accounts = self.accounts.len(),
            skipped = items.len() - self.accounts.len(),
            "Loaded ad accounts"
        );
        Ok(&self.accounts)
    }

    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn ids(&self) -> Vec<AccountId> {
        self.accounts.iter().map(|a| a.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn find_by_id(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    /// Sets an account's rule count; unknown ids are ignored
    pub fn update_rule_count(&mut self, id: &AccountId, count: usize) {
        if let Some(account) = self.accounts.iter_mut().find(|a| &a.id == id) {
            account.rule_count = count;
        }
    }

    /// Adds to an account's rule count; unknown ids are ignored
    pub fn add_to_rule_count(&mut self, id: &AccountId, delta: usize) {
        if let Some(account) = self.accounts.iter_mut().find(|a| &a.id == id) {
            account.rule_count += delta;
        }
    }

    /// Currency context for an account, USD at rate 1 when unknown
    pub fn currency_for(&self, id: &AccountId) -> CurrencyContext {
        self.find_by_id(id)
            .map(CurrencyContext::from)
            .unwrap_or_default()
    }

    /// Display label for an account, the bare id when unknown
    pub fn label_for(&self, id: &AccountId) -> String {
        self.find_by_id(id)
            .map(Account::label)
            .unwrap_or_else(|| id.to_string())
    }
}

/// Builds an account from one `me/adaccounts` item
///
/// Missing name falls back to the id, missing currency to USD, a missing or
/// zero ratio to 1.
pub fn parse_account(item: &Value) -> Option<Account> {
    let raw_id = match item.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            tracing::warn!("Skipping account without id");
            return None;
        }
    };

    let id = match AccountId::new(raw_id.as_str()) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(account_id = %raw_id, error = %e, "Skipping account");
            return None;
        }
    };

    let name = item
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map_or_else(|| id.to_string(), str::to_string);
    let currency = item
        .get("currency")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CURRENCY);
    let rate = item
        .get("account_currency_ratio_to_usd")
        .and_then(number_like)
        .filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(1.0);
    let rule_count = item
        .pointer("/adrules_library/data")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    let mut account = Account::new(id, name)
        .with_currency(currency, rate)
        .with_rule_count(rule_count);
    account.status = item.get("account_status").and_then(Value::as_i64);
    Some(account)
}

fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(s: &str) -> AccountId {
        AccountId::new(s).unwrap()
    }

    #[test]
    fn test_parse_account_full() {
        let account = parse_account(&json!({
            "id": "act_1001",
            "name": "Shop DE",
            "account_status": 1,
            "currency": "EUR",
            "account_currency_ratio_to_usd": 0.92,
            "adrules_library": {"data": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]}
        }))
        .unwrap();

        assert_eq!(account.id.as_str(), "1001");
        assert_eq!(account.name, "Shop DE");
        assert_eq!(account.status, Some(1));
        assert_eq!(account.currency, "EUR");
        assert_eq!(account.conversion_rate, 0.92);
        assert_eq!(account.rule_count, 2);
    }

    #[test]
    fn test_parse_account_defaults() {
        let account = parse_account(&json!({
            "id": "act_7",
            "account_currency_ratio_to_usd": 0
        }))
        .unwrap();

        assert_eq!(account.name, "7");
        assert_eq!(account.currency, "USD");
        assert_eq!(account.conversion_rate, 1.0);
        assert_eq!(account.rule_count, 0);
        assert_eq!(account.status, None);
    }

    #[test]
    fn test_parse_account_string_ratio() {
        let account = parse_account(&json!({
            "id": "8",
            "currency": "JPY",
            "account_currency_ratio_to_usd": "150.5"
        }))
        .unwrap();
        assert_eq!(account.conversion_rate, 150.5);
    }

    #[test]
    fn test_parse_account_rejects_bad_ids() {
        assert!(parse_account(&json!({"name": "no id"})).is_none());
        assert!(parse_account(&json!({"id": "act_abc"})).is_none());
    }

    #[test]
    fn test_rule_count_updates() {
        let mut directory = AccountDirectory::from_accounts(vec![
            Account::new(id("1"), "One").with_rule_count(5),
            Account::new(id("2"), "Two"),
        ]);

        directory.update_rule_count(&id("1"), 2);
        directory.add_to_rule_count(&id("2"), 3);
        directory.add_to_rule_count(&id("2"), 1);
        directory.update_rule_count(&id("99"), 7);

        assert_eq!(directory.find_by_id(&id("1")).unwrap().rule_count, 2);
        assert_eq!(directory.find_by_id(&id("2")).unwrap().rule_count, 4);
        assert!(directory.find_by_id(&id("99")).is_none());
    }

    #[test]
    fn test_currency_for_unknown_account_is_usd() {
        let directory = AccountDirectory::from_accounts(vec![
            Account::new(id("1"), "One").with_currency("EUR", 0.92)
        ]);

        assert_eq!(directory.currency_for(&id("1")).currency, "EUR");
        let unknown = directory.currency_for(&id("2"));
        assert_eq!(unknown.currency, "USD");
        assert_eq!(unknown.conversion_rate, 1.0);
        assert_eq!(directory.label_for(&id("1")), "One (1)");
        assert_eq!(directory.label_for(&id("2")), "2");
    }
}
