//! All AI/LLM functionality

pub mod client;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::LlmClient;
pub use prompt_builder::{parse_contextual_reply, strip_code_fences};
