//! Batch request file assembly from a directory of JSON request files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use llmbatch_protocols::error::BatchError;
use llmbatch_protocols::record::RequestRecord;

/// Wrapper key recognized in individual request files. A file may hold
/// either the raw chat-completion payload or `{"request": <payload>}`.
const WRAPPER_KEY: &str = "request";

/// Assemble a newline-delimited batch requests file from every `*.json`
/// file directly inside `in_dir`.
///
/// Files are processed in name order so reruns produce identical records.
/// A file that fails to parse is logged and skipped; it never aborts the
/// batch. Returns the output path, or `None` when the directory holds no
/// JSON files (in which case nothing is written).
pub fn assemble_dir(
    in_dir: &Path,
    out_dir: &Path,
    batch_name: &str,
) -> Result<Option<PathBuf>, BatchError> {
    if !in_dir.is_dir() {
        return Err(BatchError::Precondition(format!(
            "input directory {} does not exist",
            in_dir.display()
        )));
    }

    let mut json_files: Vec<PathBuf> = fs::read_dir(in_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    json_files.sort();

    if json_files.is_empty() {
        info!("No JSON files found in {}", in_dir.display());
        return Ok(None);
    }

    let mut records = Vec::new();
    for path in &json_files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(path)?;
        let parsed: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error decoding JSON in file {}: {}", path.display(), e);
                continue;
            }
        };
        info!("Found JSON file: {}", path.display());

        let body = match parsed {
            Value::Object(mut map) if map.contains_key(WRAPPER_KEY) => {
                map.remove(WRAPPER_KEY).unwrap_or(Value::Null)
            }
            other => other,
        };
        records.push(RequestRecord::new(format!("id_{file_name}"), body));
    }

    fs::create_dir_all(out_dir)?;
    let out_file = out_dir.join(format!("{batch_name}-requests.jsonl"));
    let lines: Vec<String> = records
        .iter()
        .map(|r| serde_json::to_string(r).unwrap_or_default())
        .collect();
    fs::write(&out_file, lines.join("\n"))?;

    info!(
        "Batch file created: {} ({} records)",
        out_file.display(),
        records.len()
    );
    Ok(Some(out_file))
}

#[cfg(test)]
#[path = "assemble_tests.rs"]
mod tests;
