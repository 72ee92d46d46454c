//! Form screen - demo information and transcript entry

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::analysis::TemplateKind;
use crate::session::DemoInfo;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Contact,
    Role,
    Date,
    Template,
    Transcript,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::Contact,
        FormField::Role,
        FormField::Date,
        FormField::Template,
        FormField::Transcript,
    ];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Form screen state
pub struct FormScreen {
    contact: TextInput,
    role: TextInput,
    date: TextInput,
    template: TemplateKind,
    transcript: TextInput,
    focus: FormField,
}

impl FormScreen {
    pub fn new(demo: &DemoInfo) -> Self {
        Self {
            contact: TextInput::single_line(&demo.contact_name),
            role: TextInput::single_line(&demo.contact_role),
            date: TextInput::single_line(&demo.demo_date),
            template: demo.template,
            transcript: TextInput::multi_line(),
            focus: if demo.contact_name.is_empty() {
                FormField::Contact
            } else {
                FormField::Transcript
            },
        }
    }

    /// Demo information as currently entered.
    pub fn demo_info(&self) -> DemoInfo {
        DemoInfo {
            contact_name: self.contact.text().trim().to_string(),
            contact_role: self.role.text().trim().to_string(),
            demo_date: self.date.text().trim().to_string(),
            template: self.template,
        }
    }

    pub fn transcript(&self) -> String {
        self.transcript.text()
    }

    pub fn template(&self) -> TemplateKind {
        self.template
    }

    pub fn set_template(&mut self, template: TemplateKind) {
        self.template = template;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Up if self.focus != FormField::Transcript => {
                self.focus = self.focus.previous()
            }
            KeyCode::Down if self.focus != FormField::Transcript => self.focus = self.focus.next(),
            KeyCode::Left if self.focus == FormField::Template => {
                self.template = self.template.previous()
            }
            KeyCode::Right | KeyCode::Char(' ') if self.focus == FormField::Template => {
                self.template = self.template.next()
            }
            KeyCode::Enter if self.focus != FormField::Transcript => {
                self.focus = self.focus.next()
            }
            _ => {
                if let Some(input) = self.focused_input() {
                    input.handle_key(key);
                }
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Some(input) = self.focused_input() {
            input.insert_str(text);
        }
    }

    /// Clear the focused field.
    pub fn clear_focused(&mut self) {
        if let Some(input) = self.focused_input() {
            input.clear();
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::Contact => Some(&mut self.contact),
            FormField::Role => Some(&mut self.role),
            FormField::Date => Some(&mut self.date),
            FormField::Template => None,
            FormField::Transcript => Some(&mut self.transcript),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(30)])
            .split(area);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Contact
                Constraint::Length(3), // Role
                Constraint::Length(3), // Date
                Constraint::Length(3), // Template
                Constraint::Min(0),
            ])
            .split(columns[0]);

        self.contact.draw(
            frame,
            sidebar[0],
            "Primary Contact Name",
            self.focus == FormField::Contact,
        );
        self.role
            .draw(frame, sidebar[1], "Contact Role", self.focus == FormField::Role);
        self.date
            .draw(frame, sidebar[2], "Demo Date", self.focus == FormField::Date);
        self.draw_template(frame, sidebar[3]);

        let info = Paragraph::new(vec![
            Line::from(Span::styled(
                "Demo Information",
                Style::default().fg(Color::White).bold(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "A contact name enables the follow-up email draft.",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(Padding::uniform(1)));
        frame.render_widget(info, sidebar[4]);

        self.transcript.draw(
            frame,
            columns[1],
            "Demo Transcript (paste here)",
            self.focus == FormField::Transcript,
        );
    }

    fn draw_template(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == FormField::Template;
        let selected = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.template.as_str(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]);

        let selector = Paragraph::new(selected).block(
            Block::default()
                .title(" Email Template Type ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if focused {
                    Color::Cyan
                } else {
                    Color::DarkGray
                })),
        );
        frame.render_widget(selector, area);
    }
}
