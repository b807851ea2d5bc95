//! Template command handler.

use std::path::PathBuf;

use llmbatch_core::{run_template, HttpCompletionClient, TemplateRun};

use crate::config::Config;

pub(crate) async fn handle(
    config: &Config,
    template: PathBuf,
    data: PathBuf,
    out: PathBuf,
    execute: bool,
) -> anyhow::Result<()> {
    let run = TemplateRun {
        template,
        grid: data,
        out_dir: out,
        execute,
    };

    let client = if execute {
        let api_key = std::env::var(&config.completion.api_key_env).ok();
        Some(HttpCompletionClient::new(
            config.completion.api_url.clone(),
            api_key,
        ))
    } else {
        None
    };

    let report = run_template(
        &run,
        client.as_ref().map(|c| c as &dyn llmbatch_core::CompletionClient),
        &config.retry_config(),
    )
    .await?;

    if execute {
        println!(
            "Processed {} combinations: {} executed, {} failed",
            report.total, report.executed, report.failed
        );
    } else {
        println!("Rendered {} combinations", report.total);
    }
    Ok(())
}
