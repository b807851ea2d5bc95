//! # llm-batch Protocols
//!
//! Shared definitions for the llm-batch toolkit. Contains the batch request
//! data model, the provider capability trait, and the error taxonomy -
//! no provider-specific implementations.
//!
//! ## Core items
//!
//! - [`RequestRecord`] - one line of a batch requests file
//! - [`BatchProvider`] - trait implemented once per provider backend
//! - [`ProviderError`] / [`BatchError`] - error taxonomy

pub mod error;
pub mod provider;
pub mod record;

pub use error::{BatchError, ProviderError};
pub use provider::{BatchProvider, BatchSummary, FetchStatus};
pub use record::{RequestRecord, CHAT_COMPLETIONS_URL};
