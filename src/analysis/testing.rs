//! Deterministic stand-in for the generation service.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::llm::{GenerationRequest, LlmProvider};
use crate::{InsightsError, Result};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Replays canned responses in order and records every request.
pub struct StubProvider {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubProvider {
    pub fn new<'s>(responses: impl IntoIterator<Item = &'s str>) -> Self {
        Self::from_results(responses.into_iter().map(|r| Ok(r.to_string())))
    }

    pub fn failing(message: &str) -> Self {
        Self::from_results([Err(InsightsError::Generation(message.to_string()))])
    }

    pub fn from_results(results: impl IntoIterator<Item = Result<String>>) -> Self {
        Self {
            responses: Mutex::new(results.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            max_tokens: request.max_tokens,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(InsightsError::Generation("no stub response left".into())))
    }
}
