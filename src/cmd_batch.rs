//! Batch command handlers: assembling request files and driving the
//! provider backends.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use llmbatch_core::assemble_dir;
use llmbatch_protocols::provider::{BatchProvider, FetchStatus};
use llmbatch_provider_anthropic::AnthropicBatch;
use llmbatch_provider_gemini::GeminiBatch;
use llmbatch_provider_openai::OpenAIBatch;

use crate::cli::{BatchAction, ProviderAction};

pub(crate) async fn handle(action: BatchAction) -> anyhow::Result<()> {
    match action {
        BatchAction::Make {
            in_dir,
            out,
            batch_name,
        } => make(&in_dir, &out, &batch_name),
        BatchAction::Openai { action } => {
            let provider = OpenAIBatch::new(api_key("OPENAI_API_KEY")?);
            run_provider(&provider, action).await
        }
        BatchAction::Anthropic { action } => {
            let provider = AnthropicBatch::new(api_key("ANTHROPIC_API_KEY")?);
            run_provider(&provider, action).await
        }
        BatchAction::Gemini { action } => {
            let provider = GeminiBatch::new(api_key("GEMINI_API_KEY")?);
            run_provider(&provider, action).await
        }
    }
}

/// Build a batch requests file from a directory of per-request JSON files.
fn make(in_dir: &Path, out: &Path, batch_name: &str) -> anyhow::Result<()> {
    match assemble_dir(in_dir, out, batch_name)? {
        Some(out_file) => println!("Batch file created: {}", out_file.display()),
        None => println!("No JSON files found in the input directory."),
    }
    Ok(())
}

/// Keys are read at call time and never persisted.
fn api_key(var: &str) -> anyhow::Result<String> {
    std::env::var(var).with_context(|| format!("{var} environment variable is not set"))
}

async fn run_provider(
    provider: &dyn BatchProvider,
    action: ProviderAction,
) -> anyhow::Result<()> {
    match action {
        ProviderAction::Send {
            batch_file,
            description,
        } => {
            let batch_id = provider.send(&batch_file, &description).await?;
            println!("Batch created: {batch_id}");
        }
        ProviderAction::Check { limit } => {
            for batch in provider.check(limit).await? {
                println!("{} {} {}", batch.id, batch.status, batch.created_at);
            }
        }
        ProviderAction::Fetch {
            batch_id,
            out,
            batch_name,
        } => {
            match provider.fetch(&batch_id).await? {
                FetchStatus::Completed { content } => {
                    std::fs::create_dir_all(&out)?;
                    let out_file = out.join(format!("{batch_name}-responses.jsonl"));
                    // Truncates any earlier fetch of the same batch name.
                    std::fs::write(&out_file, content)?;
                    info!("writing json output to {}", out_file.display());
                    println!("writing json output to {}", out_file.display());
                }
                FetchStatus::Pending { status } => {
                    println!("Batch {batch_id} is not complete yet: status {status}");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use llmbatch_protocols::error::ProviderError;
    use tempfile::TempDir;

    /// Scripted backend answering every fetch with a fixed outcome.
    struct ScriptedProvider {
        outcome: FetchStatus,
    }

    #[async_trait]
    impl BatchProvider for ScriptedProvider {
        fn id(&self) -> &str {
            "scripted"
        }

        async fn send(
            &self,
            _batch_file: &std::path::Path,
            _description: &str,
        ) -> Result<String, ProviderError> {
            Ok("batch_scripted".to_string())
        }

        async fn check(
            &self,
            _limit: u32,
        ) -> Result<Vec<llmbatch_protocols::provider::BatchSummary>, ProviderError> {
            Ok(Vec::new())
        }

        async fn fetch(&self, _batch_id: &str) -> Result<FetchStatus, ProviderError> {
            Ok(self.outcome.clone())
        }
    }

    fn fetch_action(out: &Path) -> ProviderAction {
        ProviderAction::Fetch {
            batch_id: "batch_1".to_string(),
            out: out.to_path_buf(),
            batch_name: "batch".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_with_empty_results_still_creates_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let provider = ScriptedProvider {
            outcome: FetchStatus::Completed {
                content: String::new(),
            },
        };

        run_provider(&provider, fetch_action(&out)).await.unwrap();

        let responses = out.join("batch-responses.jsonl");
        assert!(responses.is_file());
        assert!(std::fs::read_to_string(&responses).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_truncates_earlier_results() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(out.join("batch-responses.jsonl"), "stale line\n").unwrap();
        let provider = ScriptedProvider {
            outcome: FetchStatus::Completed {
                content: "{\"custom_id\": \"id_a.json\"}\n".to_string(),
            },
        };

        run_provider(&provider, fetch_action(&out)).await.unwrap();

        let content = std::fs::read_to_string(out.join("batch-responses.jsonl")).unwrap();
        assert!(content.contains("id_a.json"));
        assert!(!content.contains("stale"));
    }

    #[tokio::test]
    async fn test_fetch_pending_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let provider = ScriptedProvider {
            outcome: FetchStatus::Pending {
                status: "in_progress".to_string(),
            },
        };

        run_provider(&provider, fetch_action(&out)).await.unwrap();

        assert!(!out.exists());
    }

    #[test]
    fn test_make_reports_created_file() {
        let dir = TempDir::new().unwrap();
        let in_dir = dir.path().join("in");
        let out = dir.path().join("out");
        std::fs::create_dir_all(&in_dir).unwrap();
        std::fs::write(in_dir.join("a.json"), r#"{"model": "gpt-4"}"#).unwrap();

        make(&in_dir, &out, "batch").unwrap();
        assert!(out.join("batch-requests.jsonl").is_file());
    }

    #[test]
    fn test_make_with_empty_dir_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let in_dir = dir.path().join("in");
        let out = dir.path().join("out");
        std::fs::create_dir_all(&in_dir).unwrap();

        make(&in_dir, &out, "batch").unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = api_key("LLM_BATCH_TEST_UNSET_KEY").unwrap_err();
        assert!(err.to_string().contains("LLM_BATCH_TEST_UNSET_KEY"));
    }
}
