//! Anthropic batch provider implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use llmbatch_protocols::error::ProviderError;
use llmbatch_protocols::provider::{sort_by_creation, BatchProvider, BatchSummary, FetchStatus};
use llmbatch_protocols::record::RequestRecord;

use crate::api::{BatchRequestItem, CreateBatchBody, MessageParams};
use crate::client::AnthropicClient;

const STATUS_ENDED: &str = "ended";

/// Anthropic batch backend: request records are rewritten into the
/// message-batches schema before submission.
pub struct AnthropicBatch {
    client: AnthropicClient,
}

impl AnthropicBatch {
    pub fn new(api_key: String) -> Self {
        Self {
            client: AnthropicClient::new(api_key),
        }
    }

    pub fn with_client(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Convert a batch requests file into message-batch items.
    ///
    /// Each line must be a [`RequestRecord`] whose body carries `model`,
    /// `max_tokens` and `messages`; batch-local ids replace the file-derived
    /// custom ids since the batch file itself is not uploaded.
    fn convert_batch_file(batch_file: &Path) -> Result<Vec<BatchRequestItem>, ProviderError> {
        let contents = std::fs::read_to_string(batch_file)?;
        let mut items = Vec::new();

        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: RequestRecord = serde_json::from_str(line).map_err(|e| {
                ProviderError::InvalidBatchFile(format!("line {}: {e}", idx + 1))
            })?;
            let params = Self::message_params(&record).ok_or_else(|| {
                ProviderError::InvalidBatchFile(format!(
                    "line {}: body is missing model, max_tokens or messages",
                    idx + 1
                ))
            })?;
            items.push(BatchRequestItem {
                custom_id: format!("id-{idx}"),
                params,
            });
        }
        Ok(items)
    }

    fn message_params(record: &RequestRecord) -> Option<MessageParams> {
        let body = record.body.as_object()?;
        Some(MessageParams {
            model: body.get("model")?.as_str()?.to_string(),
            max_tokens: body.get("max_tokens")?.as_u64()?,
            messages: body.get("messages")?.clone(),
        })
    }
}

#[async_trait]
impl BatchProvider for AnthropicBatch {
    fn id(&self) -> &str {
        "anthropic"
    }

    async fn send(&self, batch_file: &Path, _description: &str) -> Result<String, ProviderError> {
        let requests = Self::convert_batch_file(batch_file)?;
        info!(
            "Submitting {} requests from {}",
            requests.len(),
            batch_file.display()
        );

        let batch = self.client.create_batch(&CreateBatchBody { requests }).await?;
        info!("Batch created: {}", batch.id);
        Ok(batch.id)
    }

    async fn check(&self, limit: u32) -> Result<Vec<BatchSummary>, ProviderError> {
        let list = self.client.list_batches(limit).await?;
        let mut summaries: Vec<BatchSummary> = list
            .data
            .into_iter()
            .map(|b| BatchSummary {
                id: b.id,
                status: b.processing_status,
                created_at: b.created_at,
            })
            .collect();
        sort_by_creation(&mut summaries);
        Ok(summaries)
    }

    async fn fetch(&self, batch_id: &str) -> Result<FetchStatus, ProviderError> {
        let batch = self.client.retrieve_batch(batch_id).await?;
        info!("Batch {}: status {}", batch.id, batch.processing_status);

        if batch.processing_status != STATUS_ENDED {
            return Ok(FetchStatus::Pending {
                status: batch.processing_status,
            });
        }

        let results_url = batch.results_url.ok_or_else(|| {
            ProviderError::InvalidRequest(format!("ended batch {batch_id} has no results URL"))
        })?;
        let content = self.client.results(&results_url).await?;
        Ok(FetchStatus::Completed { content })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
