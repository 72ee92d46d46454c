use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::InsightRecord;
use crate::llm::prompts::{build_email_prompt, EMAIL_SYSTEM_PROMPT};
use crate::llm::{GenerationRequest, LlmProvider};
use crate::Result;

/// Follow-up email flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateKind {
    #[default]
    Standard,
    Technical,
    Executive,
    Clinical,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Standard,
        TemplateKind::Technical,
        TemplateKind::Executive,
        TemplateKind::Clinical,
    ];

    /// Parse a category label. Unknown labels fall back to `Standard`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "technical" => Self::Technical,
            "executive" => Self::Executive,
            "clinical" => Self::Clinical,
            "standard" => Self::Standard,
            other => {
                tracing::warn!(template = other, "Unknown email template, using standard");
                Self::Standard
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Technical => "technical",
            Self::Executive => "executive",
            Self::Clinical => "clinical",
        }
    }

    /// Instruction that steers the email towards this audience.
    pub fn focus(&self) -> &'static str {
        match self {
            Self::Technical => "Focus on technical details and integration pathway",
            Self::Executive => "Emphasize ROI and strategic value",
            Self::Clinical => "Focus on clinical workflow improvements and patient care",
            Self::Standard => "Balanced overview of all aspects",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<String> for TemplateKind {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<TemplateKind> for String {
    fn from(kind: TemplateKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drafts a follow-up email from an analysis.
pub struct EmailDrafter<'a> {
    provider: &'a dyn LlmProvider,
    max_tokens: u32,
}

impl<'a> EmailDrafter<'a> {
    pub fn new(provider: &'a dyn LlmProvider, max_tokens: u32) -> Self {
        Self {
            provider,
            max_tokens,
        }
    }

    /// Returns the generated email verbatim.
    pub async fn draft(
        &self,
        insights: &InsightRecord,
        contact_name: &str,
        template: TemplateKind,
    ) -> Result<String> {
        let insights_json = serde_json::to_string_pretty(insights)?;
        let prompt = build_email_prompt(contact_name, template.focus(), &insights_json);

        tracing::info!(template = %template, "Drafting follow-up email");

        self.provider
            .generate(GenerationRequest {
                system: EMAIL_SYSTEM_PROMPT,
                prompt: &prompt,
                max_tokens: self.max_tokens,
            })
            .await
    }
}
