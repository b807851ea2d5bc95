//! llm-batch - LLM batch job toolkit
//!
//! Main entry point for the llm-batch CLI.

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod cmd_batch;
mod cmd_template;
mod cmd_utils;
mod config;

use cli::{Cli, Commands, UtilsAction};
use config::Config;

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.llm-batch/logs/ with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = config::app_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("llm-batch")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer guard alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer (human-readable text format with colors)
        .with(fmt::layer().with_target(true).with_ansi(true))
        // File layer (text format without colors)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Batch { action } => cmd_batch::handle(action).await,
        Commands::Template {
            template,
            data,
            out,
            execute,
        } => cmd_template::handle(&config, template, data, out, execute).await,
        Commands::Utils { action } => match action {
            UtilsAction::Config => cmd_utils::config(&config),
            UtilsAction::Pdf2text {
                in_dir,
                out,
                start,
                end,
            } => cmd_utils::pdf2text(&in_dir, &out, start, end),
        },
    }
}
