//! Explicit session state and the handlers that advance it.
//!
//! Every user action takes the current [`SessionState`] and returns the next
//! one. A failed call leaves a [`Notice`] behind instead of an error, so the
//! caller can keep accepting input.

use crate::analysis::{
    clean_transcript, EmailDrafter, InsightRecord, TemplateKind, TranscriptAnalyzer,
};
use crate::config::LlmSettings;
use crate::llm::LlmProvider;
use crate::InsightsError;

/// Information about the demo entered alongside the transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoInfo {
    pub contact_name: String,
    /// Display only
    pub contact_role: String,
    /// Display only
    pub demo_date: String,
    pub template: TemplateKind,
}

/// User-visible outcome of the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub demo: DemoInfo,
    pub insights: Option<InsightRecord>,
    pub email_draft: Option<String>,
    pub notice: Option<Notice>,
    /// Analyses that produced a record in this session
    pub completed_analyses: u32,
}

impl SessionState {
    pub fn new(demo: DemoInfo) -> Self {
        Self {
            demo,
            ..Self::default()
        }
    }
}

/// Runs analyses and drafts against one provider.
pub struct SessionHandler<'a> {
    provider: &'a dyn LlmProvider,
    analysis_max_tokens: u32,
    email_max_tokens: u32,
}

impl<'a> SessionHandler<'a> {
    pub fn new(provider: &'a dyn LlmProvider, llm: &LlmSettings) -> Self {
        Self {
            provider,
            analysis_max_tokens: llm.analysis_max_tokens,
            email_max_tokens: llm.email_max_tokens,
        }
    }

    /// Analyze a transcript, then draft an email when a contact name is set.
    ///
    /// A failed analysis never reaches the drafter.
    pub async fn analyze(&self, mut state: SessionState, transcript: &str) -> SessionState {
        if clean_transcript(transcript).is_empty() {
            state.notice = Some(Notice::Error(InsightsError::EmptyTranscript.to_string()));
            return state;
        }

        state.insights = None;
        state.email_draft = None;
        state.notice = None;

        let analyzer = TranscriptAnalyzer::new(self.provider, self.analysis_max_tokens);
        match analyzer.analyze(transcript).await {
            Ok(record) => {
                state.insights = Some(record);
                state.completed_analyses += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error analyzing transcript");
                state.notice = Some(Notice::Error(format!("Error analyzing transcript: {e}")));
                return state;
            }
        }

        if state.demo.contact_name.trim().is_empty() {
            state.notice = Some(Notice::Info(
                "Analysis complete. Add a contact name to draft a follow-up email.".to_string(),
            ));
            return state;
        }

        self.draft_email(state, "Analysis complete. ").await
    }

    /// Draft the email again for the current analysis, e.g. after switching templates.
    pub async fn redraft(&self, mut state: SessionState) -> SessionState {
        if state.insights.is_none() {
            state.notice = Some(Notice::Error("Analyze a transcript first".to_string()));
            return state;
        }
        if state.demo.contact_name.trim().is_empty() {
            state.notice = Some(Notice::Error(
                "Add a contact name to draft a follow-up email".to_string(),
            ));
            return state;
        }
        self.draft_email(state, "").await
    }

    async fn draft_email(&self, mut state: SessionState, lead: &str) -> SessionState {
        let Some(insights) = state.insights.as_ref() else {
            return state;
        };

        let drafter = EmailDrafter::new(self.provider, self.email_max_tokens);
        let result = drafter
            .draft(insights, state.demo.contact_name.trim(), state.demo.template)
            .await;

        match result {
            Ok(draft) => {
                state.email_draft = Some(draft);
                state.notice = Some(Notice::Info(format!(
                    "{lead}Drafted the {} follow-up email.",
                    state.demo.template
                )));
            }
            Err(e) => {
                tracing::error!(error = %e, "Error generating email");
                state.email_draft = None;
                state.notice = Some(Notice::Error(format!("Error generating email: {e}")));
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::StubProvider;
    use crate::config::Settings;

    const RECORD: &str = r#"{"technical_requirements":["Epic integration"]}"#;

    fn demo(contact: &str) -> DemoInfo {
        DemoInfo {
            contact_name: contact.to_string(),
            template: TemplateKind::Technical,
            ..DemoInfo::default()
        }
    }

    #[tokio::test]
    async fn analyze_then_draft() {
        let provider = StubProvider::new([RECORD, "Dear Dr. Smith"]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let state = handler
            .analyze(SessionState::new(demo("Dr. Smith")), "Epic by Q3")
            .await;

        assert_eq!(
            state.insights.unwrap().technical_requirements,
            vec!["Epic integration"]
        );
        assert_eq!(state.email_draft.as_deref(), Some("Dear Dr. Smith"));
        assert_eq!(state.completed_analyses, 1);
        assert_eq!(
            state.notice.unwrap().message(),
            "Analysis complete. Drafted the technical follow-up email."
        );

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].max_tokens, 1024);
        assert!(calls[1]
            .prompt
            .contains("Focus on technical details and integration pathway"));
    }

    #[tokio::test]
    async fn prose_response_skips_drafter() {
        let provider = StubProvider::new(["Here are some thoughts about the demo.", "unused"]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let state = handler
            .analyze(SessionState::new(demo("Dr. Smith")), "transcript")
            .await;

        assert!(state.insights.is_none());
        assert!(state.email_draft.is_none());
        assert_eq!(state.completed_analyses, 0);
        let notice = state.notice.unwrap();
        assert!(notice.is_error());
        assert!(notice.message().contains("JSON parsing error"));
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn no_contact_means_no_email() {
        let provider = StubProvider::new([RECORD]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let state = handler.analyze(SessionState::new(demo("  ")), "transcript").await;

        assert!(state.insights.is_some());
        assert!(state.email_draft.is_none());
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn empty_transcript_keeps_previous_results() {
        let provider = StubProvider::new([]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let mut previous = SessionState::new(demo("Dr. Smith"));
        previous.insights = Some(InsightRecord::default());

        previous.completed_analyses = 1;

        let state = handler.analyze(previous, "\n\n").await;
        assert!(state.insights.is_some());
        assert_eq!(state.completed_analyses, 1);
        assert_eq!(
            state.notice,
            Some(Notice::Error("Please paste a demo transcript".to_string()))
        );
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn email_failure_keeps_record() {
        let provider = StubProvider::from_results([
            Ok(RECORD.to_string()),
            Err(InsightsError::Generation("overloaded".to_string())),
        ]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let state = handler
            .analyze(SessionState::new(demo("Dr. Smith")), "transcript")
            .await;

        assert!(state.insights.is_some());
        assert!(state.email_draft.is_none());
        assert!(state
            .notice
            .unwrap()
            .message()
            .starts_with("Error generating email"));
    }

    #[tokio::test]
    async fn redraft_requires_analysis() {
        let provider = StubProvider::new([]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let state = handler.redraft(SessionState::new(demo("Dr. Smith"))).await;
        assert!(state.notice.unwrap().is_error());
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn redraft_uses_current_template() {
        let provider = StubProvider::new(["Executive summary email"]);
        let settings = Settings::default();
        let handler = SessionHandler::new(&provider, &settings.llm);

        let mut state = SessionState::new(demo("Dr. Smith"));
        state.insights = Some(InsightRecord::default());
        state.demo.template = TemplateKind::Executive;

        let state = handler.redraft(state).await;
        assert_eq!(state.email_draft.as_deref(), Some("Executive summary email"));
        assert_eq!(
            state.notice.unwrap().message(),
            "Drafted the executive follow-up email."
        );
        assert!(provider.calls()[0]
            .prompt
            .contains("Emphasize ROI and strategic value"));
    }
}
