//! Error types for batch assembly and provider calls.

use thiserror::Error;

/// Errors surfaced by provider batch backends.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid batch file: {0}")]
    InvalidBatchFile(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// Classify a non-success API response by its HTTP status code.
    pub fn from_api_response(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed(message),
            429 => ProviderError::RateLimited {
                retry_after_seconds: 60,
            },
            400 => ProviderError::InvalidRequest(message),
            _ => ProviderError::ApiError { status, message },
        }
    }
}

/// Errors surfaced by the batch assembler and template pipeline.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Missing input or mistyped output path. Aborts before any work starts.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Template rendering failure. Always fatal to the whole run: an
    /// undefined placeholder means the grid and template disagree.
    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("Invalid parameter grid: {0}")]
    Grid(String),

    /// Rendered template text did not parse as a JSON request body.
    #[error("Rendered body is not valid JSON: {0}")]
    InvalidBody(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
