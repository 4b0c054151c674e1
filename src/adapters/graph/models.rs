//! Graph API wire models
//!
//! Request and response shapes for the Graph endpoint. These are kept apart from
//! the domain model: pages and batch slots carry raw JSON, and the repository
//! turns them into [`crate::domain::Rule`]s and [`crate::domain::Account`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a Graph edge listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    /// Items of this page. Absent means the response was not a listing.
    #[serde(default)]
    pub data: Option<Vec<Value>>,

    #[serde(default)]
    pub paging: Option<Paging>,
}

impl Page {
    /// Absolute URL of the next page, if the server reported one
    pub fn next_url(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

/// Cursor block of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,

    /// Opaque cursors, kept for debugging
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Value>,
}

/// `{"error": {...}}` envelope the Graph API answers with on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

/// Error object inside an [`ErrorEnvelope`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub error_subcode: Option<i64>,

    #[serde(default)]
    pub error_user_msg: Option<String>,
}

impl ApiError {
    /// The server's `message`, falling back to `error_user_msg`
    pub fn describe(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.error_user_msg.as_deref())
            .unwrap_or("Unknown Graph error")
            .to_string()
    }
}

/// Extracts the `error` object from a JSON body, if it has one
pub fn api_error(body: &Value) -> Option<ApiError> {
    let error = body.get("error")?;
    Some(serde_json::from_value(error.clone()).unwrap_or_default())
}

/// One operation in a batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// Entry name (`rule_<idx>`), lets later entries reference this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub method: String,

    /// Path relative to the versioned API root
    pub relative_url: String,

    /// Form-encoded body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl BatchEntry {
    /// `DELETE <relative_url>` without a body
    pub fn delete(relative_url: impl Into<String>) -> Self {
        Self {
            name: None,
            method: "DELETE".to_string(),
            relative_url: relative_url.into(),
            body: None,
        }
    }

    /// `POST <relative_url>` with a form-encoded body
    pub fn post(relative_url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: None,
            method: "POST".to_string(),
            relative_url: relative_url.into(),
            body: Some(body.into()),
        }
    }

    /// Sets the entry name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Server's answer for one batch entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchItemResponse {
    #[serde(default)]
    pub code: u16,

    /// JSON-encoded body of the individual response
    #[serde(default)]
    pub body: Option<String>,
}

impl BatchItemResponse {
    /// Body parsed as JSON; `None` when absent or not JSON
    pub fn parsed_body(&self) -> Option<Value> {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
    }

    /// 2xx code and no `error` in the body
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
            && self
                .parsed_body()
                .map_or(true, |body| body.get("error").is_none())
    }

    /// Server error message if present, else the raw body, else a generic marker
    pub fn error_message(&self) -> String {
        if let Some(error) = self.parsed_body().as_ref().and_then(api_error) {
            return error.describe();
        }
        match self.body.as_deref() {
            Some(raw) if !raw.is_empty() => raw.to_string(),
            _ => format!("Unknown error (code {})", self.code),
        }
    }
}

/// Outcome of one batch slot. `None` when the server returned `null` for it.
pub type BatchSlot = Option<BatchItemResponse>;

/// Message for a slot that might be `null`
pub fn slot_error_message(slot: &BatchSlot) -> String {
    match slot {
        Some(item) => item.error_message(),
        None => "Unknown error (no response)".to_string(),
    }
}

/// Whether a slot is present and successful
pub fn slot_succeeded(slot: &BatchSlot) -> bool {
    slot.as_ref().is_some_and(BatchItemResponse::is_success)
}
