//! Gemini batch provider placeholder.

use std::path::Path;

use async_trait::async_trait;

use llmbatch_protocols::error::ProviderError;
use llmbatch_protocols::provider::{BatchProvider, BatchSummary, FetchStatus};

/// Gemini batch backend. Accepts an API key so the CLI surface matches the
/// other providers, but every operation fails with [`ProviderError::Unsupported`].
pub struct GeminiBatch {
    _api_key: String,
}

impl GeminiBatch {
    pub fn new(api_key: String) -> Self {
        Self { _api_key: api_key }
    }

    fn unsupported(operation: &str) -> ProviderError {
        ProviderError::Unsupported(format!("Gemini batch {operation} is not implemented yet"))
    }
}

#[async_trait]
impl BatchProvider for GeminiBatch {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn send(&self, _batch_file: &Path, _description: &str) -> Result<String, ProviderError> {
        Err(Self::unsupported("send"))
    }

    async fn check(&self, _limit: u32) -> Result<Vec<BatchSummary>, ProviderError> {
        Err(Self::unsupported("check"))
    }

    async fn fetch(&self, _batch_id: &str) -> Result<FetchStatus, ProviderError> {
        Err(Self::unsupported("fetch"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_operations_report_unsupported() {
        let provider = GeminiBatch::new("test-key".to_string());
        assert_eq!(provider.id(), "gemini");

        let err = provider.send(Path::new("x.jsonl"), "desc").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));

        let err = provider.check(100).await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));

        let err = provider.fetch("batch_1").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(_)));
    }
}
