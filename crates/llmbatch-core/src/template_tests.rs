use super::*;
use serde_json::json;
use tempfile::TempDir;

fn combination_from(value: serde_json::Value) -> Combination {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("combination fixture must be an object"),
    }
}

#[test]
fn test_render_substitutes_placeholders() {
    let combination = combination_from(json!({"name": "John", "purpose": "testing"}));

    let rendered = render_strict("Hello {{ name }}, this is {{ purpose }}", &combination).unwrap();

    assert_eq!(rendered, "Hello John, this is testing");
}

#[test]
fn test_render_undefined_placeholder_fails() {
    let combination = combination_from(json!({"name": "John"}));

    let err = render_strict("value: {{ y }}", &combination).unwrap_err();

    assert!(matches!(err, BatchError::Render(_)));
}

#[test]
fn test_render_json_template() {
    let combination = combination_from(json!({"model": "gpt-4", "prompt": "Hello"}));
    let template = r#"{"model": "{{ model }}", "messages": [{"role": "user", "content": "{{ prompt }}"}]}"#;

    let rendered = render_strict(template, &combination).unwrap();
    let body: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(body["model"], "gpt-4");
    assert_eq!(body["messages"][0]["content"], "Hello");
}

#[test]
fn test_render_numeric_values() {
    let combination = combination_from(json!({"temperature": 0.7, "max_tokens": 100}));

    let rendered = render_strict(
        r#"{"temperature": {{ temperature }}, "max_tokens": {{ max_tokens }}}"#,
        &combination,
    )
    .unwrap();

    assert!(rendered.contains("0.7"));
    assert!(rendered.contains("100"));
}

#[test]
fn test_render_invalid_template_syntax_fails() {
    let combination = combination_from(json!({"a": 1}));

    let err = render_strict("{{ a", &combination).unwrap_err();

    assert!(matches!(err, BatchError::Render(_)));
}

#[test]
fn test_load_grid_from_yaml() {
    let dir = TempDir::new().unwrap();
    let grid_file = dir.path().join("data.yml");
    fs::write(
        &grid_file,
        "model:\n  - gpt-3.5-turbo\n  - gpt-4\ntemperature:\n  - 0.1\n  - 0.7\n",
    )
    .unwrap();

    let grid = load_grid(&grid_file).unwrap();

    assert_eq!(grid.len(), 2);
    assert_eq!(grid["model"].as_array().unwrap().len(), 2);
}

#[test]
fn test_load_grid_preserves_key_order() {
    let dir = TempDir::new().unwrap();
    let grid_file = dir.path().join("data.yml");
    fs::write(&grid_file, "zeta: [1]\nalpha: [2]\nmid: [3]\n").unwrap();

    let grid = load_grid(&grid_file).unwrap();

    let keys: Vec<&String> = grid.keys().collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn test_load_grid_rejects_non_mapping() {
    let dir = TempDir::new().unwrap();
    let grid_file = dir.path().join("data.yml");
    fs::write(&grid_file, "- just\n- a\n- list\n").unwrap();

    let err = load_grid(&grid_file).unwrap_err();

    assert!(matches!(err, BatchError::Grid(_)));
}

#[test]
fn test_load_grid_missing_file_is_io_error() {
    let err = load_grid(Path::new("/nonexistent/data.yml")).unwrap_err();

    assert!(matches!(err, BatchError::Io(_)));
}
