use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{GenerationRequest, LlmProvider};
use crate::{InsightsError, Result};

const DEFAULT_ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-haiku-20240307";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl AnthropicClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.llm.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(InsightsError::MissingCredential);
        }

        let model = if settings.llm.model.trim().is_empty() {
            DEFAULT_ANTHROPIC_MODEL.to_string()
        } else {
            settings.llm.model.trim().to_string()
        };

        let endpoint = if settings.llm.endpoint.trim().is_empty() {
            DEFAULT_ANTHROPIC_ENDPOINT.to_string()
        } else {
            settings
                .llm
                .endpoint
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let mut builder = Client::builder();
        if settings.llm.request_timeout_secs > 0 {
            builder =
                builder.timeout(std::time::Duration::from_secs(settings.llm.request_timeout_secs));
        }
        let http = builder.build().map_err(|e| {
            InsightsError::Config(format!("Failed to build Anthropic HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            model,
            endpoint,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_url(&self) -> String {
        format!("{}/messages", self.endpoint)
    }
}

#[async_trait]
impl LlmProvider for AnthropicClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let body = MessagesRequest {
            model: &self.model,
            system: request.system,
            max_tokens: request.max_tokens,
            messages: vec![MessageParam {
                role: "user",
                content: request.prompt,
            }],
        };

        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            prompt_chars = request.prompt.len(),
            "Sending Anthropic messages request"
        );

        let response = self
            .http
            .post(self.request_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightsError::Generation(format!("Anthropic request failed: {e}")))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            InsightsError::Generation(format!("Failed to read Anthropic response: {e}"))
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            return Err(InsightsError::Generation(format!(
                "Anthropic returned {status}: {detail}"
            )));
        }

        let payload: MessagesResponse = serde_json::from_str(&text).map_err(|e| {
            InsightsError::Generation(format!("Failed to parse Anthropic response: {e}"))
        })?;

        payload
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .find(|t| !t.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                InsightsError::Generation("Anthropic response did not contain text".to_string())
            })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
