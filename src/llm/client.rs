use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::anthropic::AnthropicClient;
use crate::{InsightsError, Result};

/// A single prompt-in, text-out generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String>;
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "anthropic" => Ok(Box::new(AnthropicClient::from_settings(settings)?)),
        other => Err(InsightsError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: anthropic",
            other
        ))),
    }
}
