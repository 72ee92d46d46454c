//! LLM module for demo-insights
//!
//! Wraps the text-generation service behind a prompt-in, text-out trait.

mod anthropic;
mod client;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use client::{build_provider, GenerationRequest, LlmProvider};
