//! Email screen - editable follow-up draft

use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::analysis::TemplateKind;
use crate::tui::widgets::TextInput;

/// Email screen state
pub struct EmailScreen {
    draft: TextInput,
    has_draft: bool,
}

impl Default for EmailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailScreen {
    pub fn new() -> Self {
        Self {
            draft: TextInput::multi_line(),
            has_draft: false,
        }
    }

    /// Replace the editor contents with a freshly generated draft.
    pub fn set_draft(&mut self, draft: Option<&str>) {
        self.draft.set_text(draft.unwrap_or_default());
        self.has_draft = draft.is_some();
    }

    /// The draft including the user's edits.
    pub fn text(&self) -> Option<String> {
        self.has_draft.then(|| self.draft.text())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.has_draft {
            self.draft.handle_key(key);
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.has_draft {
            self.draft.insert_str(text);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, template: TemplateKind) {
        if !self.has_draft {
            let empty = Paragraph::new(
                "No email draft yet. Enter a contact name and analyze a transcript, or press Ctrl+R to draft again.",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" Follow-up Email Draft ")
                    .borders(Borders::ALL),
            );
            frame.render_widget(empty, area);
            return;
        }

        let title = format!("Follow-up Email Draft ({})", template);
        self.draft.draw(frame, area, &title, true);
    }
}
