//! Utility command handlers: configuration display and PDF text extraction.

use std::path::Path;

use anyhow::Context;

use llmbatch_core::extract_dir;

use crate::config::Config;

/// Display the resolved configuration plus the provider API keys, masked
/// down to a short identifying prefix.
pub(crate) fn config(config: &Config) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{rendered}");
    println!("OPENAI_API_KEY: {}", masked_key("OPENAI_API_KEY", 12));
    println!("ANTHROPIC_API_KEY: {}", masked_key("ANTHROPIC_API_KEY", 12));
    println!("GEMINI_API_KEY: {}", masked_key("GEMINI_API_KEY", 5));
    Ok(())
}

fn masked_key(var: &str, visible: usize) -> String {
    let value = std::env::var(var).unwrap_or_else(|_| "Not Set".to_string());
    format!("{}***", value.chars().take(visible).collect::<String>())
}

pub(crate) fn pdf2text(in_dir: &Path, out: &Path, start: u32, end: u32) -> anyhow::Result<()> {
    let extracted = extract_dir(in_dir, out, start, end)?;
    println!("Extracted text from {extracted} PDF file(s)");
    Ok(())
}
