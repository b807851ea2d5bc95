//! Synchronous chat-completion client.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use llmbatch_protocols::error::ProviderError;

/// A synchronous (single request, single response) completion call.
///
/// The template pipeline receives its client explicitly so tests can
/// substitute a scripted implementation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Post one rendered request body and return the provider's response
    /// document verbatim.
    async fn complete(&self, body: &Value) -> Result<Value, ProviderError>;
}

/// HTTP implementation posting to an OpenAI-compatible chat-completions
/// endpoint with bearer authentication.
pub struct HttpCompletionClient {
    api_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, body: &Value) -> Result<Value, ProviderError> {
        debug!(
            "completion call: model={}",
            body.get("model").and_then(serde_json::Value::as_str).unwrap_or("?")
        );

        let mut request = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(String::from))
                .unwrap_or(text);
            return Err(ProviderError::from_api_response(status, message));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
