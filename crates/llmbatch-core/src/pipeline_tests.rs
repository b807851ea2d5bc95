use super::*;
use async_trait::async_trait;
use llmbatch_protocols::error::ProviderError;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Scripted completion client: fails the first `fail_times` calls, then
/// answers with a canned response.
struct ScriptedClient {
    calls: AtomicU32,
    fail_times: u32,
}

impl ScriptedClient {
    fn new(fail_times: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            fail_times,
        }
    }

    fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, body: &Value) -> Result<Value, ProviderError> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst);
        if count < self.fail_times {
            Err(ProviderError::Network("connection failed".to_string()))
        } else {
            Ok(json!({
                "id": "chatcmpl-test",
                "model": body["model"],
                "choices": [{"message": {"role": "assistant", "content": "ok"}}]
            }))
        }
    }
}

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 10,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        jitter: false,
    }
}

fn write_fixtures(dir: &TempDir, template: &str, grid: &str) -> TemplateRun {
    let template_path = dir.path().join("template.json");
    let grid_path = dir.path().join("data.yml");
    fs::write(&template_path, template).unwrap();
    fs::write(&grid_path, grid).unwrap();
    TemplateRun {
        template: template_path,
        grid: grid_path,
        out_dir: dir.path().join("output"),
        execute: false,
    }
}

fn artifacts_in(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(artifacts_in(&path));
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

const CHAT_TEMPLATE: &str = r#"{"model": "{{ model }}", "messages": [{"role": "user", "content": "value {{ x }}"}], "max_tokens": 16}"#;

#[tokio::test]
async fn test_dry_run_writes_one_artifact_per_combination() {
    let dir = TempDir::new().unwrap();
    let run = write_fixtures(&dir, CHAT_TEMPLATE, "model: [A, B]\nx: [1, 2]\n");

    let report = run_template(&run, None, &fast_retry()).await.unwrap();

    assert_eq!(
        report,
        RunReport {
            total: 4,
            executed: 0,
            failed: 0
        }
    );
    assert_eq!(artifacts_in(&run.out_dir.join("A")).len(), 2);
    assert_eq!(artifacts_in(&run.out_dir.join("B")).len(), 2);
}

#[tokio::test]
async fn test_dry_run_artifact_contents() {
    let dir = TempDir::new().unwrap();
    let run = write_fixtures(&dir, CHAT_TEMPLATE, "model: [A]\nx: [7]\n");

    run_template(&run, None, &fast_retry()).await.unwrap();

    let artifact = &artifacts_in(&run.out_dir)[0];
    let doc: Value = serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(doc["template_params"]["model"], "A");
    assert_eq!(doc["template_params"]["x"], 7);
    assert_eq!(doc["request"]["model"], "A");
    assert_eq!(doc["request"]["messages"][0]["content"], "value 7");
    assert!(doc.get("response").is_none());
}

#[tokio::test]
async fn test_model_name_sanitized_for_directory() {
    let dir = TempDir::new().unwrap();
    let run = write_fixtures(&dir, CHAT_TEMPLATE, "model: [\"openai/gpt-4\"]\nx: [1]\n");

    run_template(&run, None, &fast_retry()).await.unwrap();

    assert!(run.out_dir.join("openai_gpt-4").is_dir());
}

#[tokio::test]
async fn test_undefined_placeholder_aborts_without_artifacts() {
    let dir = TempDir::new().unwrap();
    // Template references {{ y }}; the grid only defines model and x.
    let run = write_fixtures(
        &dir,
        r#"{"model": "{{ model }}", "y": "{{ y }}"}"#,
        "model: [A, B]\nx: [1, 2]\n",
    );

    let err = run_template(&run, None, &fast_retry()).await.unwrap_err();

    assert!(matches!(err, BatchError::Render(_)));
    assert!(artifacts_in(&run.out_dir).is_empty());
}

#[tokio::test]
async fn test_rendered_body_must_be_json() {
    let dir = TempDir::new().unwrap();
    let run = write_fixtures(&dir, "plain text {{ x }}", "x: [1]\n");

    let err = run_template(&run, None, &fast_retry()).await.unwrap_err();

    assert!(matches!(err, BatchError::InvalidBody(_)));
}

#[tokio::test]
async fn test_execute_records_response_after_transient_failures() {
    let dir = TempDir::new().unwrap();
    let mut run = write_fixtures(&dir, CHAT_TEMPLATE, "model: [A]\nx: [1]\n");
    run.execute = true;
    // Fails 3 times, succeeds on the 4th attempt - inside the budget.
    let client = ScriptedClient::new(3);

    let report = run_template(&run, Some(&client), &fast_retry())
        .await
        .unwrap();

    assert_eq!(report.executed, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(client.call_count(), 4);

    let artifact = &artifacts_in(&run.out_dir)[0];
    let doc: Value = serde_json::from_str(&fs::read_to_string(artifact).unwrap()).unwrap();
    assert_eq!(doc["response"]["id"], "chatcmpl-test");
    assert!(doc.get("error").is_none());
}

#[tokio::test]
async fn test_execute_failure_marks_artifact_and_continues() {
    let dir = TempDir::new().unwrap();
    let mut run = write_fixtures(&dir, CHAT_TEMPLATE, "model: [A, B]\nx: [1]\n");
    run.execute = true;
    let client = ScriptedClient::new(u32::MAX);
    let retry = RetryConfig {
        max_attempts: 2,
        ..fast_retry()
    };

    let report = run_template(&run, Some(&client), &retry).await.unwrap();

    // Both combinations failed, neither aborted the run.
    assert_eq!(
        report,
        RunReport {
            total: 2,
            executed: 0,
            failed: 2
        }
    );
    for artifact in artifacts_in(&run.out_dir) {
        let doc: Value = serde_json::from_str(&fs::read_to_string(&artifact).unwrap()).unwrap();
        assert!(doc["error"].as_str().unwrap().contains("connection failed"));
    }
}

#[tokio::test]
async fn test_missing_template_is_precondition_failure() {
    let dir = TempDir::new().unwrap();
    let mut run = write_fixtures(&dir, CHAT_TEMPLATE, "x: [1]\n");
    run.template = dir.path().join("nonexistent.json");

    let err = run_template(&run, None, &fast_retry()).await.unwrap_err();

    assert!(matches!(err, BatchError::Precondition(_)));
}

#[tokio::test]
async fn test_missing_grid_is_precondition_failure() {
    let dir = TempDir::new().unwrap();
    let mut run = write_fixtures(&dir, CHAT_TEMPLATE, "x: [1]\n");
    run.grid = dir.path().join("nonexistent.yml");

    let err = run_template(&run, None, &fast_retry()).await.unwrap_err();

    assert!(matches!(err, BatchError::Precondition(_)));
}

#[tokio::test]
async fn test_output_path_as_file_is_precondition_failure() {
    let dir = TempDir::new().unwrap();
    let mut run = write_fixtures(&dir, CHAT_TEMPLATE, "x: [1]\n");
    let blocker = dir.path().join("output.txt");
    fs::write(&blocker, "existing content").unwrap();
    run.out_dir = blocker;

    let err = run_template(&run, None, &fast_retry()).await.unwrap_err();

    assert!(matches!(err, BatchError::Precondition(_)));
}
