//! OpenAI batch provider implementation.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use llmbatch_protocols::error::ProviderError;
use llmbatch_protocols::provider::{sort_by_creation, BatchProvider, BatchSummary, FetchStatus};
use llmbatch_protocols::record::CHAT_COMPLETIONS_URL;

use crate::api::{BatchMetadata, CreateBatchBody};
use crate::client::OpenAIClient;

const COMPLETION_WINDOW: &str = "24h";
const STATUS_COMPLETED: &str = "completed";

/// OpenAI batch backend: one file upload plus one batch creation per send.
pub struct OpenAIBatch {
    client: OpenAIClient,
}

impl OpenAIBatch {
    pub fn new(api_key: String) -> Self {
        Self {
            client: OpenAIClient::new(api_key),
        }
    }

    pub fn with_client(client: OpenAIClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BatchProvider for OpenAIBatch {
    fn id(&self) -> &str {
        "openai"
    }

    async fn send(&self, batch_file: &Path, description: &str) -> Result<String, ProviderError> {
        let uploaded = self.client.upload_batch_file(batch_file).await?;
        info!(
            "Uploaded batch file: {} (file id {})",
            batch_file.display(),
            uploaded.id
        );

        let file_name = batch_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let batch = self
            .client
            .create_batch(&CreateBatchBody {
                input_file_id: uploaded.id,
                endpoint: CHAT_COMPLETIONS_URL.to_string(),
                completion_window: COMPLETION_WINDOW.to_string(),
                metadata: BatchMetadata {
                    description: format!("{description}: {file_name}"),
                },
            })
            .await?;

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
                status: b.status,
                created_at: DateTime::<Utc>::from_timestamp(b.created_at, 0).unwrap_or_default(),
            })
            .collect();
        sort_by_creation(&mut summaries);
        Ok(summaries)
    }

    async fn fetch(&self, batch_id: &str) -> Result<FetchStatus, ProviderError> {
        let batch = self.client.retrieve_batch(batch_id).await?;
        info!("Batch {}: status {}", batch.id, batch.status);

        if batch.status != STATUS_COMPLETED {
            return Ok(FetchStatus::Pending {
                status: batch.status,
            });
        }

        let output_file_id = batch.output_file_id.ok_or_else(|| {
            ProviderError::InvalidRequest(format!("completed batch {batch_id} has no output file"))
        })?;
        let content = self.client.file_content(&output_file_id).await?;
        Ok(FetchStatus::Completed { content })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
