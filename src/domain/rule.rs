//! Automated rule domain model
//!
//! Rules arrive from two untrusted places: the Graph API (where the three
//! sub-specs are sometimes JSON-encoded strings) and export bundles written by
//! hand or by older tooling. Both are read into [`RawRule`] and validated into
//! a [`Rule`] before anything downstream touches them.

use super::errors::RuleBridgeError;
use super::ids::RuleId;
use super::result::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status assigned to rules that don't carry one
pub const DEFAULT_RULE_STATUS: &str = "ENABLED";

/// A single condition inside an evaluation spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Metric or attribute the filter tests (e.g. `cpm`, `entity_type`)
    pub field: String,

    /// Comparison value. Numeric strings for monetary fields, anything otherwise.
    #[serde(default)]
    pub value: Value,

    /// Comparison operator (`GREATER_THAN`, `IN`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,

    /// Keys we don't model, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Filter {
    /// Creates a filter without an operator
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: None,
            extra: Map::new(),
        }
    }

    /// Sets the operator
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

/// Condition portion of a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,

    /// `evaluation_type`, `trigger` and anything else, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EvaluationSpec {
    /// Creates an evaluation spec holding the given filters
    pub fn with_filters(filters: Vec<Filter>) -> Self {
        Self {
            filters: Some(filters),
            extra: Map::new(),
        }
    }
}

/// A structurally complete automated rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Server id; absent for rules that have not been created yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RuleId>,

    pub name: String,

    pub evaluation_spec: EvaluationSpec,

    pub execution_spec: Value,

    pub schedule_spec: Value,

    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    DEFAULT_RULE_STATUS.to_string()
}

impl Rule {
    /// Validates a raw rule, parsing any stringified sub-specs
    ///
    /// # Errors
    ///
    /// Returns [`RuleBridgeError::Validation`] naming every missing field when
    /// any of `name`, `evaluation_spec`, `execution_spec` or `schedule_spec` is
    /// absent, and when a sub-spec is not valid JSON.
    pub fn try_from_raw(raw: RawRule) -> Result<Self> {
        let missing = raw.missing_fields();
        if !missing.is_empty() {
            return Err(RuleBridgeError::Validation(format!(
                "Rule {} is missing required fields: {}",
                raw.display_name(),
                missing.join(", ")
            )));
        }

        let label = raw.display_name();
        let id = raw.id.as_ref().and_then(value_to_rule_id);
        let evaluation_spec = parse_sub_spec(raw.evaluation_spec, "evaluation_spec", &label)?;
        let evaluation_spec: EvaluationSpec =
            serde_json::from_value(evaluation_spec).map_err(|e| {
                RuleBridgeError::Validation(format!(
                    "Rule {label} has a malformed evaluation_spec: {e}"
                ))
            })?;
        let execution_spec = parse_sub_spec(raw.execution_spec, "execution_spec", &label)?;
        let schedule_spec = parse_sub_spec(raw.schedule_spec, "schedule_spec", &label)?;

        Ok(Self {
            id,
            name: raw.name.unwrap_or_default(),
            evaluation_spec,
            execution_spec,
            schedule_spec,
            status: raw
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(default_status),
        })
    }

    /// Returns a copy without the server id, ready to be created elsewhere
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }

    /// Filters of the evaluation spec, empty when there are none
    pub fn filters(&self) -> &[Filter] {
        self.evaluation_spec.filters.as_deref().unwrap_or(&[])
    }
}

/// A rule as received from the API or an export file, nothing guaranteed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_spec: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_spec: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_spec: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl RawRule {
    /// Names of the required fields that are absent or empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if !is_present(&self.evaluation_spec) {
            missing.push("evaluation_spec");
        }
        if !is_present(&self.execution_spec) {
            missing.push("execution_spec");
        }
        if !is_present(&self.schedule_spec) {
            missing.push("schedule_spec");
        }
        missing
    }

    /// Name for log lines; falls back to the id, then to `unknown`
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        self.id
            .as_ref()
            .and_then(value_to_rule_id)
            .map(|id| id.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        Self {
            id: rule.id.map(|id| Value::String(id.into())),
            name: Some(rule.name),
            evaluation_spec: serde_json::to_value(rule.evaluation_spec).ok(),
            execution_spec: Some(rule.execution_spec),
            schedule_spec: Some(rule.schedule_spec),
            status: Some(rule.status),
        }
    }
}

fn is_present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn value_to_rule_id(value: &Value) -> Option<RuleId> {
    match value {
        Value::String(s) => RuleId::new(s.clone()).ok(),
        Value::Number(n) => RuleId::new(n.to_string()).ok(),
        _ => None,
    }
}

/// Sub-specs come back from the API as JSON-encoded strings
fn parse_sub_spec(value: Option<Value>, field: &str, label: &str) -> Result<Value> {
    match value {
        Some(Value::String(encoded)) => serde_json::from_str(&encoded).map_err(|e| {
            RuleBridgeError::Validation(format!("Rule {label} has unparsable {field}: {e}"))
        }),
        Some(value) => Ok(value),
        None => Err(RuleBridgeError::Validation(format!(
            "Rule {label} is missing {field}"
        ))),
    }
}
