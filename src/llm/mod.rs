//! LLM module for meeting-mind
//!
//! The model is an injected capability: submit prompt text, receive reply text.

mod client;
mod gemini;

pub use client::{build_provider, LlmProvider};
pub use gemini::GeminiClient;
