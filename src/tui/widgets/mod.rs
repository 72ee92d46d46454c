//! Reusable TUI widgets

mod help;
mod text_input;

pub use help::HelpPopup;
pub use text_input::TextInput;
