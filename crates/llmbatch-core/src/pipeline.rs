//! The render-and-execute pipeline: expand a grid, render the template for
//! every combination, persist one artifact per combination, and optionally
//! call the completion API with retry.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{error, info};

use llmbatch_protocols::error::BatchError;

use crate::combinations::{expand, Combination};
use crate::completion::CompletionClient;
use crate::retry::{with_retry, RetryConfig};
use crate::template::{load_grid, render_strict};

/// Inputs for one template run.
#[derive(Debug, Clone)]
pub struct TemplateRun {
    pub template: PathBuf,
    pub grid: PathBuf,
    pub out_dir: PathBuf,
    pub execute: bool,
}

/// What happened across the whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Combinations processed (artifacts written).
    pub total: usize,
    /// Combinations whose completion call succeeded.
    pub executed: usize,
    /// Combinations whose completion call exhausted the retry budget.
    pub failed: usize,
}

/// Run the template pipeline.
///
/// Rendering errors and invalid rendered bodies abort the whole run: they
/// indicate a structural grid/template mismatch, and failing fast here
/// means no API call is ever made against a broken setup. Execution
/// failures, by contrast, mark the affected combination's artifact and the
/// loop moves on.
pub async fn run_template(
    run: &TemplateRun,
    client: Option<&dyn CompletionClient>,
    retry: &RetryConfig,
) -> Result<RunReport, BatchError> {
    if !run.template.is_file() {
        return Err(BatchError::Precondition(format!(
            "template file {} does not exist",
            run.template.display()
        )));
    }
    if !run.grid.is_file() {
        return Err(BatchError::Precondition(format!(
            "data file {} does not exist",
            run.grid.display()
        )));
    }
    if run.out_dir.exists() && !run.out_dir.is_dir() {
        return Err(BatchError::Precondition(format!(
            "output path {} is a file, expected a directory",
            run.out_dir.display()
        )));
    }
    fs::create_dir_all(&run.out_dir)?;

    if run.execute {
        info!("Running in execute mode, API calls will be made");
    } else {
        info!("Running in dry-run mode, no API calls will be made");
    }

    let template_src = fs::read_to_string(&run.template)?;
    let grid = load_grid(&run.grid)?;
    let combinations = expand(&grid);

    let mut report = RunReport::default();
    for (idx, combination) in combinations.iter().enumerate() {
        let rendered = render_strict(&template_src, combination)?;
        let body: Value = serde_json::from_str(&rendered)
            .map_err(|e| BatchError::InvalidBody(e.to_string()))?;

        let model_dir = run.out_dir.join(model_dir_name(&body));
        fs::create_dir_all(&model_dir)?;
        let artifact = model_dir.join(artifact_name());
        write_artifact(&artifact, combination, &body, None)?;
        report.total += 1;

        if run.execute {
            if let Some(client) = client {
                match with_retry(retry, || client.complete(&body)).await {
                    Ok(response) => {
                        write_artifact(&artifact, combination, &body, Some(Ok(&response)))?;
                        report.executed += 1;
                    }
                    Err(e) => {
                        error!("Error processing combination {:04}: {}", idx + 1, e);
                        write_artifact(&artifact, combination, &body, Some(Err(&e.to_string())))?;
                        report.failed += 1;
                        continue;
                    }
                }
            }
        }

        info!("Executed combination {:05}", idx + 1);
    }

    Ok(report)
}

/// Directory name for a rendered body, keyed by its model and made
/// filesystem-safe.
fn model_dir_name(body: &Value) -> String {
    body.get("model")
        .and_then(Value::as_str)
        .unwrap_or("unknown_model")
        .replace('/', "_")
}

/// Timestamp-based artifact file name, unique per combination.
fn artifact_name() -> String {
    let now = Utc::now();
    format!(
        "{}.{:06}.json",
        now.timestamp(),
        now.timestamp_subsec_micros()
    )
}

/// Persist one combination's artifact: the template parameters, the
/// rendered request, and (after execution) the response or the error.
fn write_artifact(
    path: &Path,
    combination: &Combination,
    body: &Value,
    outcome: Option<Result<&Value, &String>>,
) -> Result<(), BatchError> {
    let mut artifact = Map::new();
    artifact.insert(
        "template_params".to_string(),
        Value::Object(combination.clone()),
    );
    artifact.insert("request".to_string(), body.clone());
    match outcome {
        Some(Ok(response)) => {
            artifact.insert("response".to_string(), response.clone());
        }
        Some(Err(message)) => {
            artifact.insert("error".to_string(), Value::String(message.clone()));
        }
        None => {}
    }

    let text = serde_json::to_string_pretty(&Value::Object(artifact))
        .map_err(|e| BatchError::InvalidBody(e.to_string()))?;
    fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
