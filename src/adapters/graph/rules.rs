//! Rule repository over the Graph client
//!
//! One account at a time, identified by its bare numeric id. The orchestrator
//! depends on the [`RuleStore`] trait so transfers can run against fakes.

use super::client::GraphClient;
use super::models::{BatchEntry, BatchSlot};
use crate::domain::{AccountId, RawRule, Result, Rule, RuleId};
use async_trait::async_trait;
use serde_json::Value;
use url::form_urlencoded;

/// Fields requested when listing an account's rule library
pub const RULE_FIELDS: &str = "id,name,evaluation_spec,execution_spec,schedule_spec,status";

/// Page size for rule listings
pub const RULE_PAGE_LIMIT: &str = "100";

/// Extra batch parameters Ads Manager sends with rule creation
const CREATE_BATCH_PARAMS: &[(&str, &str)] = &[("_app", "ADS_MANAGER"), ("_reqName", "rule creation")];

/// Storage of automated rules
///
/// Batch methods return one slot per input, in input order. Chunking to the
/// batch limit is the caller's job.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// All rules of the account, every page
    async fn list_rules(&self, account_id: &AccountId) -> Result<Vec<RawRule>>;

    /// Creates one rule; returns the server's response body
    async fn create_rule(&self, account_id: &AccountId, rule: &Rule) -> Result<Value>;

    /// Creates rules in a single batch request
    async fn create_rules_batch(&self, account_id: &AccountId, rules: &[Rule])
        -> Result<Vec<BatchSlot>>;

    /// Deletes one rule
    async fn delete_rule(&self, rule_id: &RuleId) -> Result<Value>;

    /// Deletes rules in a single batch request
    async fn delete_rules_batch(&self, rule_ids: &[RuleId]) -> Result<Vec<BatchSlot>>;

    /// Runs a rule immediately
    async fn execute_rule(&self, rule_id: &RuleId) -> Result<Value>;
}

/// [`RuleStore`] backed by the Graph API
#[derive(Debug, Clone)]
pub struct RuleRepository {
    client: GraphClient,
    locale: String,
}

impl RuleRepository {
    pub fn new(client: GraphClient, locale: impl Into<String>) -> Self {
        Self {
            client,
            locale: locale.into(),
        }
    }

    fn library_path(account_id: &AccountId) -> String {
        format!("{}/adrules_library", account_id.graph_node())
    }

    /// Batch entry creating `rule` in the account's library
    fn create_entry(&self, account_id: &AccountId, rule: &Rule, idx: usize) -> Result<BatchEntry> {
        let body = encode_rule_form(rule, &self.locale)?;
        Ok(BatchEntry::post(Self::library_path(account_id), body).named(format!("rule_{idx}")))
    }
}

#[async_trait]
impl RuleStore for RuleRepository {
    async fn list_rules(&self, account_id: &AccountId) -> Result<Vec<RawRule>> {
        let items = self
            .client
            .fetch_all_pages(
                &Self::library_path(account_id),
                &[("fields", RULE_FIELDS), ("limit", RULE_PAGE_LIMIT)],
            )
            .await?;

        let mut rules = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<RawRule>(item) {
                Ok(rule) => rules.push(rule),
                Err(e) => tracing::warn!(
                    account_id = %account_id,
                    error = %e,
                    "Skipping rule with unexpected shape"
                ),
            }
        }

        tracing::debug!(account_id = %account_id, count = rules.len(), "Listed rules");
        Ok(rules)
    }

    async fn create_rule(&self, account_id: &AccountId, rule: &Rule) -> Result<Value> {
        let fields = rule_form_fields(rule, &self.locale)?;
        let params: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        self.client
            .post(&Self::library_path(account_id), &params)
            .await
    }

    async fn create_rules_batch(
        &self,
        account_id: &AccountId,
        rules: &[Rule],
    ) -> Result<Vec<BatchSlot>> {
        let entries = rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| self.create_entry(account_id, rule, idx))
            .collect::<Result<Vec<_>>>()?;

        self.client
            .submit_batch(&entries, CREATE_BATCH_PARAMS)
            .await
    }

    async fn delete_rule(&self, rule_id: &RuleId) -> Result<Value> {
        self.client
            .post(&format!("{rule_id}?method=delete"), &[("method", "delete")])
            .await
    }

    async fn delete_rules_batch(&self, rule_ids: &[RuleId]) -> Result<Vec<BatchSlot>> {
        let entries: Vec<BatchEntry> = rule_ids
            .iter()
            .map(|id| BatchEntry::delete(id.as_str()))
            .collect();

        self.client.submit_batch(&entries, &[]).await
    }

    async fn execute_rule(&self, rule_id: &RuleId) -> Result<Value> {
        self.client
            .post(
                &format!("{rule_id}/execute?method=post"),
                &[("method", "post"), ("locale", self.locale.as_str())],
            )
            .await
    }
}

/// Create parameters in the order Ads Manager sends them
fn rule_form_fields(rule: &Rule, locale: &str) -> Result<Vec<(&'static str, String)>> {
    Ok(vec![
        (
            "evaluation_spec",
            serde_json::to_string(&rule.evaluation_spec)?,
        ),
        ("execution_spec", serde_json::to_string(&rule.execution_spec)?),
        ("locale", locale.to_string()),
        ("name", rule.name.clone()),
        ("schedule_spec", serde_json::to_string(&rule.schedule_spec)?),
        ("status", rule.status.clone()),
    ])
}

/// Form-encoded create body for a batch entry
pub fn encode_rule_form(rule: &Rule, locale: &str) -> Result<String> {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in rule_form_fields(rule, locale)? {
        serializer.append_pair(key, &value);
    }
    Ok(serializer.finish())
}
