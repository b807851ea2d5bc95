//! Batch provider trait definition.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ProviderError;

/// One batch as reported by a provider's list endpoint.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a single-shot fetch. A pending batch carries only its current
/// status; no result content is downloaded for it.
#[derive(Debug, Clone)]
pub enum FetchStatus {
    Completed { content: String },
    Pending { status: String },
}

/// Core trait for provider batch backends.
///
/// Each backend exposes the same three operations; they differ only in wire
/// formats and status vocabulary.
#[async_trait]
pub trait BatchProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Submit a previously assembled batch file. Returns the
    /// provider-assigned batch identifier.
    async fn send(&self, batch_file: &Path, description: &str) -> Result<String, ProviderError>;

    /// List batches, capped at `limit`, ascending by creation time.
    async fn check(&self, limit: u32) -> Result<Vec<BatchSummary>, ProviderError>;

    /// Query one batch. Downloads result content only when the provider
    /// reports the batch complete; never polls.
    async fn fetch(&self, batch_id: &str) -> Result<FetchStatus, ProviderError>;
}

/// Order batch summaries ascending by creation time.
pub fn sort_by_creation(batches: &mut [BatchSummary]) {
    batches.sort_by_key(|b| b.created_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(id: &str, secs: i64) -> BatchSummary {
        BatchSummary {
            id: id.to_string(),
            status: "completed".to_string(),
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_sort_by_creation_ascending() {
        let mut batches = vec![summary("b", 200), summary("c", 300), summary("a", 100)];
        sort_by_creation(&mut batches);
        let ids: Vec<&str> = batches.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_by_creation_stable_for_ties() {
        let mut batches = vec![summary("first", 100), summary("second", 100)];
        sort_by_creation(&mut batches);
        assert_eq!(batches[0].id, "first");
        assert_eq!(batches[1].id, "second");
    }

    #[test]
    fn test_fetch_status_variants() {
        let pending = FetchStatus::Pending {
            status: "in_progress".to_string(),
        };
        assert!(matches!(pending, FetchStatus::Pending { .. }));

        let done = FetchStatus::Completed {
            content: String::new(),
        };
        match done {
            FetchStatus::Completed { content } => assert!(content.is_empty()),
            _ => panic!("Expected Completed"),
        }
    }
}
