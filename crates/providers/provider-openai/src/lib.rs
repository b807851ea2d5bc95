//! OpenAI batch API backend.

pub mod api;
pub mod client;
pub mod provider;

pub use client::OpenAIClient;
pub use provider::OpenAIBatch;
