//! demo-insights - Turn sales-demo transcripts into structured insights
//!
//! A transcript goes to the LLM once for analysis and, optionally, once more
//! for a follow-up email draft.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod export;
pub mod llm;
pub mod render;
pub mod session;
pub mod tui;

use thiserror::Error;

/// Main error type for demo-insights
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error(
        "ANTHROPIC_API_KEY not found. Set it in your .env file, the environment, or llm.api_key in the config file."
    )]
    MissingCredential,

    #[error("Please paste a demo transcript")]
    EmptyTranscript,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("JSON parsing error: {message}\nRaw response: {excerpt}")]
    MalformedResponse { message: String, excerpt: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InsightsError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "demo-insights";
