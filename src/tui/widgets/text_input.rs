//! Text field wrapping tui-textarea, used by the form and email screens

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};
use tui_textarea::TextArea;

/// Editable text with a movable cursor.
pub struct TextInput {
    textarea: TextArea<'static>,
    multiline: bool,
}

impl TextInput {
    pub fn single_line(initial: &str) -> Self {
        let mut input = Self {
            textarea: TextArea::default(),
            multiline: false,
        };
        input.insert_str(initial);
        input
    }

    pub fn multi_line() -> Self {
        Self {
            textarea: TextArea::default(),
            multiline: true,
        }
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|l| l.is_empty())
    }

    /// Replace the contents; the cursor ends up after the last character.
    pub fn set_text(&mut self, text: &str) {
        self.textarea = TextArea::default();
        self.insert_str(text);
    }

    /// Insert text at the cursor, normalizing line endings.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        if !self.multiline {
            self.textarea.insert_str(normalized.replace('\n', " "));
            return;
        }
        for (i, line) in normalized.split('\n').enumerate() {
            if i > 0 {
                self.textarea.insert_newline();
            }
            self.textarea.insert_str(line);
        }
    }

    pub fn clear(&mut self) {
        self.textarea = TextArea::default();
    }

    /// Pass a key to the editor. Returns false when the key was not consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter if !self.multiline => false,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => false,
            _ => {
                self.textarea.input(key);
                true
            }
        }
    }

    /// Draw the field. The editor keeps its own viewport so the cursor stays visible.
    pub fn draw(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let cursor = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_cursor_style(cursor);
        self.textarea.set_block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(&self.textarea, area);
    }
}
