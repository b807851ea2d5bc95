//! Strict template rendering and parameter grid loading.

use std::fs;
use std::path::Path;

use minijinja::{Environment, UndefinedBehavior};

use llmbatch_protocols::error::BatchError;

use crate::combinations::{Combination, Grid};

/// Load a parameter grid from a YAML document.
///
/// The document must be a top-level mapping; each value is a list of
/// candidate values (or a scalar, which behaves as a fixed parameter).
pub fn load_grid(path: &Path) -> Result<Grid, BatchError> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_yml::from_str(&text).map_err(|e| BatchError::Grid(e.to_string()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(BatchError::Grid(format!(
            "expected a mapping of parameter names to value lists, got {other}"
        ))),
    }
}

/// Render a template against one combination with strict-undefined
/// semantics: any placeholder missing from the combination is an error.
///
/// Strictness is deliberate - an unresolved placeholder means the grid and
/// the template disagree, and the whole run must stop before any API call.
pub fn render_strict(template_src: &str, combination: &Combination) -> Result<String, BatchError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template("prompt", template_src)
        .map_err(|e| BatchError::Render(e.to_string()))?;
    let template = env
        .get_template("prompt")
        .map_err(|e| BatchError::Render(e.to_string()))?;
    template
        .render(combination)
        .map_err(|e| BatchError::Render(e.to_string()))
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
