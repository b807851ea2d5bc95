//! CLI definitions for llm-batch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// llm-batch CLI.
#[derive(Parser)]
#[command(name = "llm-batch")]
#[command(about = "Commands to execute LLM batch jobs")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (defaults to ~/.llm-batch/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Batching commands
    Batch {
        #[command(subcommand)]
        action: BatchAction,
    },

    /// Generate prompts from a template and data file, and optionally make API calls
    Template {
        /// Prompt template (minijinja)
        template: PathBuf,

        /// Template data (YAML parameter grid)
        data: PathBuf,

        /// Output directory for the responses
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Run the template and make synchronous API calls
        #[arg(long)]
        execute: bool,
    },

    /// Utility commands
    Utils {
        #[command(subcommand)]
        action: UtilsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum BatchAction {
    /// Make a batch requests file from a directory of JSON request files
    Make {
        /// Path to input files
        #[arg(long, default_value = ".")]
        in_dir: PathBuf,

        /// Path to output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Batch name
        #[arg(long = "batch", default_value = "batch")]
        batch_name: String,
    },

    /// OpenAI batching commands
    Openai {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// Anthropic batching commands
    Anthropic {
        #[command(subcommand)]
        action: ProviderAction,
    },

    /// Gemini batching commands
    Gemini {
        #[command(subcommand)]
        action: ProviderAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProviderAction {
    /// Upload a batch requests file
    Send {
        /// Batch file
        batch_file: PathBuf,

        /// Description of the batch job
        #[arg(long = "desc", default_value = "batch job from batch")]
        description: String,
    },

    /// Display batches for your account
    Check {
        /// Limit the number of batches to list
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Download batch results to a file if the batch job is completed,
    /// else job status is displayed
    Fetch {
        /// Batch ID
        batch_id: String,

        /// Path to output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Batch name
        #[arg(long = "batch", default_value = "batch")]
        batch_name: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum UtilsAction {
    /// Display configuration parameters
    Config,

    /// Extract text from a collection of PDF files and write each output
    /// to a text file
    Pdf2text {
        /// Path to input PDF files
        #[arg(long)]
        in_dir: PathBuf,

        /// Path to output text files
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Start page (zero-based, inclusive)
        #[arg(long, default_value_t = 0)]
        start: u32,

        /// End page (zero-based, inclusive)
        #[arg(long, default_value_t = 10_000_000)]
        end: u32,
    },
}
