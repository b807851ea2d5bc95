//! Google Gemini batch backend. Placeholder until the Gemini batch API
//! is wired up; every operation reports itself as unsupported.

pub mod provider;

pub use provider::GeminiBatch;
