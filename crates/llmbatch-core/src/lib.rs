//! # llm-batch Core
//!
//! The algorithmic core of the llm-batch toolkit:
//!
//! - [`combinations`] - Cartesian-product expansion of parameter grids
//! - [`assemble`] - batch request file assembly from a directory of JSON files
//! - [`template`] - strict template rendering against one combination
//! - [`pipeline`] - the render-and-optionally-execute loop
//! - [`retry`] - randomized exponential backoff for completion calls
//! - [`completion`] - synchronous chat-completion client
//! - [`pdf`] - PDF text extraction utility

pub mod assemble;
pub mod combinations;
pub mod completion;
pub mod pdf;
pub mod pipeline;
pub mod retry;
pub mod template;

pub use assemble::assemble_dir;
pub use combinations::{expand, Combination, Grid};
pub use completion::{CompletionClient, HttpCompletionClient};
pub use pdf::extract_dir;
pub use pipeline::{run_template, RunReport, TemplateRun};
pub use retry::{with_retry, RetryConfig};
pub use template::{load_grid, render_strict};
