use crate::analysis::{response, InsightRecord};
use crate::llm::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use crate::llm::{GenerationRequest, LlmProvider};
use crate::{InsightsError, Result};

/// Extracts an [`InsightRecord`] from a demo transcript with one LLM call.
pub struct TranscriptAnalyzer<'a> {
    provider: &'a dyn LlmProvider,
    max_tokens: u32,
}

impl<'a> TranscriptAnalyzer<'a> {
    pub fn new(provider: &'a dyn LlmProvider, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Analyze a transcript. No retry is attempted on failure.
    pub async fn analyze(&self, transcript: &str) -> Result<InsightRecord> {
        let cleaned = clean_transcript(transcript);
        if cleaned.is_empty() {
            return Err(InsightsError::EmptyTranscript);
        }

        let prompt = build_analysis_prompt(&cleaned);
        tracing::info!(transcript_chars = cleaned.len(), "Analyzing transcript");

        let raw = self
            .provider
            .generate(GenerationRequest {
                system: ANALYSIS_SYSTEM_PROMPT,
                prompt: &prompt,
                max_tokens: self.max_tokens,
            })
            .await?;

        let record = response::parse_insights(&raw).inspect_err(|e| {
            tracing::warn!(error = %e, "Model returned an unparseable analysis");
        })?;

        tracing::info!(
            requirements = record.technical_requirements.len(),
            next_steps = record.next_steps.len(),
            "Transcript analyzed"
        );
        Ok(record)
    }
}

/// Flatten a pasted transcript onto one line.
pub fn clean_transcript(transcript: &str) -> String {
    transcript.trim().replace('\n', " ").replace('\r', "")
}
