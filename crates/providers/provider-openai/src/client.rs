//! OpenAI API client for file upload and batch management.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::debug;

use llmbatch_protocols::error::ProviderError;

use crate::api::{ApiErrorEnvelope, BatchList, BatchObject, CreateBatchBody, FileObject};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client.
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for tests and compatible APIs).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Upload a batch requests file with `purpose=batch`.
    pub async fn upload_batch_file(&self, path: &Path) -> Result<FileObject, ProviderError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "batch.jsonl".to_string());
        let bytes = std::fs::read(path)?;

        debug!("uploading batch file: {}", path.display());
        let form = Form::new()
            .text("purpose", "batch")
            .part("file", Part::bytes(bytes).file_name(file_name));

        let response = self
            .client
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// Create a batch over a previously uploaded input file.
    pub async fn create_batch(&self, body: &CreateBatchBody) -> Result<BatchObject, ProviderError> {
        let response = self
            .client
            .post(format!("{}/batches", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// List batches, capped at `limit`.
    pub async fn list_batches(&self, limit: u32) -> Result<BatchList, ProviderError> {
        let response = self
            .client
            .get(format!("{}/batches", self.base_url))
            .query(&[("limit", limit)])
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// Retrieve one batch by ID.
    pub async fn retrieve_batch(&self, batch_id: &str) -> Result<BatchObject, ProviderError> {
        let response = self
            .client
            .get(format!("{}/batches/{batch_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// Download a result file's content verbatim.
    pub async fn file_content(&self, file_id: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(format!("{}/files/{file_id}/content", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(Self::classify(status.as_u16(), text));
        }
        Ok(text)
    }

    async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::classify(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::ApiError {
            status: status.as_u16(),
            message: format!("Failed to parse response: {e}"),
        })
    }

    fn classify(status: u16, body: String) -> ProviderError {
        let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message)
            .unwrap_or(body);
        ProviderError::from_api_response(status, message)
    }
}
