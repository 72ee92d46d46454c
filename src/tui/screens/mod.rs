//! TUI screens

mod email;
mod form;
mod insights;

pub use email::EmailScreen;
pub use form::{FormField, FormScreen};
pub use insights::InsightsScreen;
