//! OpenAI batch API types.

use serde::{Deserialize, Serialize};

/// Uploaded file handle.
#[derive(Debug, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Batch creation payload.
#[derive(Debug, Serialize)]
pub struct CreateBatchBody {
    pub input_file_id: String,
    pub endpoint: String,
    pub completion_window: String,
    pub metadata: BatchMetadata,
}

#[derive(Debug, Serialize)]
pub struct BatchMetadata {
    pub description: String,
}

/// One batch as returned by create/retrieve/list.
#[derive(Debug, Deserialize)]
pub struct BatchObject {
    pub id: String,
    pub status: String,
    pub created_at: i64,
    #[serde(default)]
    pub output_file_id: Option<String>,
}

/// Batch list envelope.
#[derive(Debug, Deserialize)]
pub struct BatchList {
    pub data: Vec<BatchObject>,
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
