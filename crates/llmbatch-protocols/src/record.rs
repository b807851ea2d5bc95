//! Batch request record data model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Endpoint path embedded in every request record.
pub const CHAT_COMPLETIONS_URL: &str = "/v1/chat/completions";

/// One line of a newline-delimited batch requests file.
///
/// `custom_id` must be unique within one batch file; `body` is an opaque
/// chat-completion payload in the target provider's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    pub custom_id: String,
    pub method: String,
    pub url: String,
    pub body: Value,
}

impl RequestRecord {
    /// Build a record around a chat-completion payload.
    pub fn new(custom_id: impl Into<String>, body: Value) -> Self {
        Self {
            custom_id: custom_id.into(),
            method: "POST".to_string(),
            url: CHAT_COMPLETIONS_URL.to_string(),
            body,
        }
    }
}
