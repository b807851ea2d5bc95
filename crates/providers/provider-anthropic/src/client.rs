//! Anthropic API client for message batch management.

use tracing::debug;

use llmbatch_protocols::error::ProviderError;

use crate::api::{ApiErrorEnvelope, BatchList, CreateBatchBody, MessageBatch};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Anthropic API client.
pub struct AnthropicClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a message batch from the converted requests.
    pub async fn create_batch(&self, body: &CreateBatchBody) -> Result<MessageBatch, ProviderError> {
        debug!("creating message batch ({} requests)", body.requests.len());
        let response = self
            .client
            .post(format!("{}/v1/messages/batches", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// List message batches, capped at `limit`.
    pub async fn list_batches(&self, limit: u32) -> Result<BatchList, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v1/messages/batches", self.base_url))
            .query(&[("limit", limit)])
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// Retrieve one message batch by ID.
    pub async fn retrieve_batch(&self, batch_id: &str) -> Result<MessageBatch, ProviderError> {
        let response = self
            .client
            .get(format!("{}/v1/messages/batches/{batch_id}", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        Self::parse_json(response).await
    }

    /// Download result content verbatim from the batch's results URL.
    pub async fn results(&self, results_url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(results_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
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
