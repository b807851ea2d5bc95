//! Anthropic message batches backend.

pub mod api;
pub mod client;
pub mod provider;

pub use client::AnthropicClient;
pub use provider::AnthropicBatch;
