//! Transcript analysis and email drafting

mod analyzer;
mod drafter;
mod models;
pub mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::{clean_transcript, TranscriptAnalyzer};
pub use drafter::{EmailDrafter, TemplateKind};
pub use models::{
    ActionItem, BuyingSignals, InsightRecord, PainPoints, PricingDiscussion, Priority,
    Stakeholders, TimelineInfo,
};
