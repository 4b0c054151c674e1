//! Rule value conversion between an account's currency and USD
//!
//! Monetary filter values are integers in the currency's minor units. Moving a
//! rule to USD divides by the account's rate and rescales between minor-unit
//! offsets; moving it back does the inverse. Every step rounds to a whole
//! minor unit, so a round trip may drift by one unit (more for currencies where
//! one USD cent spans several native minor units, see [`round_trip_tolerance`]).

use super::table::{is_monetary_field, minor_unit_offset};
use crate::domain::{Filter, Result, Rule, RuleBridgeError};
use serde_json::Value;

const USD: &str = "USD";

/// Which way values move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Native currency → USD (export)
    ToUsd,
    /// USD → native currency (import)
    FromUsd,
}

/// Converts a rule's monetary filter values from `from_currency` to USD
///
/// # Errors
///
/// Returns [`RuleBridgeError::Conversion`] when `rate` is not a positive finite number.
///
/// # Example
///
/// ```
/// use rulebridge::currency::to_usd;
/// use rulebridge::domain::{EvaluationSpec, Filter, Rule};
/// use serde_json::json;
///
/// let rule = Rule {
///     id: None,
///     name: "cpm guard".to_string(),
///     evaluation_spec: EvaluationSpec::with_filters(vec![Filter::new("cpm", "50")]),
///     execution_spec: json!({}),
///     schedule_spec: json!({}),
///     status: "ENABLED".to_string(),
/// };
///
/// let usd = to_usd(&rule, 0.92, "EUR").unwrap();
/// assert_eq!(usd.filters()[0].value, json!("54"));
/// ```
pub fn to_usd(rule: &Rule, rate: f64, from_currency: &str) -> Result<Rule> {
    convert_rule(rule, rate, from_currency, Direction::ToUsd)
}

/// Converts a rule's monetary filter values from USD to `to_currency`
///
/// # Errors
///
/// Returns [`RuleBridgeError::Conversion`] when `rate` is not a positive finite number.
pub fn from_usd(rule: &Rule, rate: f64, to_currency: &str) -> Result<Rule> {
    convert_rule(rule, rate, to_currency, Direction::FromUsd)
}

/// Converts in the given direction; `currency` is the account's native currency
pub fn convert_rule(rule: &Rule, rate: f64, currency: &str, direction: Direction) -> Result<Rule> {
    if rate == 1.0 {
        return Ok(rule.clone());
    }
    if !rate.is_finite() || rate <= 0.0 {
        return Err(RuleBridgeError::Conversion(format!(
            "Invalid conversion rate {rate} for {currency}"
        )));
    }

    let native_offset = f64::from(minor_unit_offset(currency));
    let usd_offset = f64::from(minor_unit_offset(USD));

    let mut converted = rule.clone();
    if let Some(filters) = converted.evaluation_spec.filters.as_mut() {
        for filter in filters.iter_mut() {
            let Some(amount) = monetary_amount(filter) else {
                continue;
            };

            let result = match direction {
                Direction::ToUsd => (amount / rate) * (usd_offset / native_offset),
                Direction::FromUsd => (amount / usd_offset) * rate * native_offset,
            };
            filter.value = Value::String(round_half_up(result).to_string());
        }
    }

    Ok(converted)
}

/// Largest drift, in native minor units, a to-USD/from-USD round trip can introduce
///
/// One USD minor unit lost to rounding comes back as `rate * native_offset /
/// usd_offset` native minor units, so the bound is half that plus the final
/// rounding, never less than one.
pub fn round_trip_tolerance(rate: f64, currency: &str) -> i64 {
    let ratio =
        rate * f64::from(minor_unit_offset(currency)) / f64::from(minor_unit_offset(USD));
    ((0.5 * ratio + 0.5 + 1e-9).floor() as i64).max(1)
}

/// The filter's numeric amount, if it is a monetary filter with a numeric value
fn monetary_amount(filter: &Filter) -> Option<f64> {
    if !is_monetary_field(&filter.field) {
        return None;
    }
    match &filter.value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Nearest integer, halves rounded toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
