//! Anthropic message batches API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request inside a batch creation payload.
#[derive(Debug, Serialize)]
pub struct BatchRequestItem {
    pub custom_id: String,
    pub params: MessageParams,
}

/// Non-streaming message creation parameters.
#[derive(Debug, Serialize)]
pub struct MessageParams {
    pub model: String,
    pub max_tokens: u64,
    pub messages: Value,
}

/// Batch creation payload.
#[derive(Debug, Serialize)]
pub struct CreateBatchBody {
    pub requests: Vec<BatchRequestItem>,
}

/// One message batch as returned by create/retrieve/list.
#[derive(Debug, Deserialize)]
pub struct MessageBatch {
    pub id: String,
    pub processing_status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub results_url: Option<String>,
}

/// Batch list envelope.
#[derive(Debug, Deserialize)]
pub struct BatchList {
    pub data: Vec<MessageBatch>,
}

/// Error envelope: `{"error": {"message": "...", "type": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
