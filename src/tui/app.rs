//! Main TUI application state and logic

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::config::Settings;
use crate::export::write_export;
use crate::llm::LlmProvider;
use crate::render::demo_header;
use crate::session::{DemoInfo, Notice, SessionHandler, SessionState};
use crate::tui::screens::{EmailScreen, FormScreen, InsightsScreen};
use crate::tui::widgets::HelpPopup;
use crate::{APP_NAME, VERSION};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Form,
    Insights,
    Email,
}

/// Blocking request queued by a key press; run after the next redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Analyze,
    Redraft,
}

impl PendingAction {
    fn status(&self) -> &'static str {
        match self {
            Self::Analyze => "Analyzing transcript...",
            Self::Redraft => "Drafting follow-up email...",
        }
    }
}

/// Main application state
pub struct App {
    settings: Settings,
    provider: Box<dyn LlmProvider>,
    session: SessionState,
    current_screen: AppScreen,
    previous_screen: Option<AppScreen>,
    show_help: bool,
    pending: Option<PendingAction>,

    // Screen states
    form: FormScreen,
    insights: InsightsScreen,
    email: EmailScreen,
}

impl App {
    /// Create a new app instance
    pub fn new(settings: Settings, provider: Box<dyn LlmProvider>, demo: DemoInfo) -> Self {
        let form = FormScreen::new(&demo);
        let insights = InsightsScreen::new(settings.tui.wrap_panels);

        Self {
            settings,
            provider,
            session: SessionState::new(demo),
            current_screen: AppScreen::Form,
            previous_screen: None,
            show_help: false,
            pending: None,
            form,
            insights,
            email: EmailScreen::new(),
        }
    }

    /// Draw the current screen
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(5),    // Screen
                Constraint::Length(1), // Status
                Constraint::Length(1), // Help
            ])
            .split(area);

        self.draw_title(frame, chunks[0]);

        match self.current_screen {
            AppScreen::Form => self.form.draw(frame, chunks[1]),
            AppScreen::Insights => {
                self.insights
                    .draw(frame, chunks[1], self.session.insights.as_ref())
            }
            AppScreen::Email => self.email.draw(frame, chunks[1], self.form.template()),
        }

        self.draw_status(frame, chunks[2]);
        self.draw_help_bar(frame, chunks[3]);

        // Draw help popup if active
        if self.show_help {
            HelpPopup::draw(frame, area, self.current_screen);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" {} v{} ", APP_NAME, VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        )];
        for (screen, label) in [
            (AppScreen::Form, " F2 Transcript "),
            (AppScreen::Insights, " F3 Insights "),
            (AppScreen::Email, " F4 Email "),
        ] {
            let style = if screen == self.current_screen {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(label, style));
        }
        if let Some(header) = demo_header(&self.form.demo_info()) {
            spans.push(Span::styled(
                format!("  {}", header),
                Style::default().fg(Color::Gray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(action) = self.pending {
            Line::from(Span::styled(
                format!(" ⏳ {}", action.status()),
                Style::default().fg(Color::Yellow),
            ))
        } else if let Some(notice) = &self.session.notice {
            let color = if notice.is_error() {
                Color::Red
            } else {
                Color::Green
            };
            Line::from(Span::styled(
                format!(" {}", first_line(notice.message())),
                Style::default().fg(color),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str| {
            Span::styled(k, Style::default().fg(Color::Black).bg(Color::Cyan))
        };
        let mut spans = match self.current_screen {
            AppScreen::Form => vec![
                key(" Tab "),
                Span::raw(" Next field  "),
                key(" Ctrl+R "),
                Span::raw(" Analyze  "),
            ],
            AppScreen::Insights => vec![
                key(" ↑/↓ "),
                Span::raw(" Select  "),
                key(" Space "),
                Span::raw(" Check  "),
                key(" t "),
                Span::raw(" Template  "),
            ],
            AppScreen::Email => vec![key(" Ctrl+R "), Span::raw(" Redraft  ")],
        };
        spans.extend([
            key(" Ctrl+X "),
            Span::raw(" Export  "),
            key(" F1 "),
            Span::raw(" Help  "),
            key(" Esc "),
            Span::raw(" Back/Quit"),
        ]);
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('r') => {
                    self.pending = Some(match self.current_screen {
                        AppScreen::Form => PendingAction::Analyze,
                        _ => PendingAction::Redraft,
                    });
                }
                KeyCode::Char('x') => self.export(),
                KeyCode::Char('u') if self.current_screen == AppScreen::Form => {
                    self.form.clear_focused();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(2) => self.switch_screen(AppScreen::Form),
            KeyCode::F(3) => self.switch_screen(AppScreen::Insights),
            KeyCode::F(4) => self.switch_screen(AppScreen::Email),
            _ => match self.current_screen {
                AppScreen::Form => self.form.handle_key(key),
                AppScreen::Insights => self.handle_insights_key(key.code),
                AppScreen::Email => self.email.handle_key(key),
            },
        }
    }

    /// Handle bracketed paste
    pub fn handle_paste(&mut self, text: &str) {
        match self.current_screen {
            AppScreen::Form => self.form.handle_paste(text),
            AppScreen::Email => self.email.handle_paste(text),
            AppScreen::Insights => {}
        }
    }

    /// Handle insights key input
    fn handle_insights_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.insights.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.insights.next(),
            KeyCode::Char(' ') | KeyCode::Enter => self.insights.toggle_selected(),
            KeyCode::PageUp => self.insights.page_up(),
            KeyCode::PageDown => self.insights.page_down(),
            KeyCode::Char('t') => {
                let template = self.form.template().next();
                self.form.set_template(template);
                self.session.notice = Some(Notice::Info(format!(
                    "Template set to {}. Press Ctrl+R to redraft the email.",
                    template
                )));
            }
            KeyCode::Char('e') => self.switch_screen(AppScreen::Email),
            _ => {}
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the queued request. Blocks until the provider answers.
    pub async fn run_pending(&mut self) {
        let Some(action) = self.pending else {
            return;
        };

        self.keep_email_edits();
        let mut state = std::mem::take(&mut self.session);
        state.demo = self.form.demo_info();
        let analyses_before = state.completed_analyses;

        let handler = SessionHandler::new(self.provider.as_ref(), &self.settings.llm);
        self.session = match action {
            PendingAction::Analyze => handler.analyze(state, &self.form.transcript()).await,
            PendingAction::Redraft => handler.redraft(state).await,
        };
        self.pending = None;

        // A rejected request leaves the previous record and its checklist alone
        if self.session.completed_analyses != analyses_before {
            if let Some(record) = &self.session.insights {
                self.insights.reset(record);
                self.switch_screen(AppScreen::Insights);
            }
        }
        self.email.set_draft(self.session.email_draft.as_deref());
        if action == PendingAction::Redraft && self.session.email_draft.is_some() {
            self.switch_screen(AppScreen::Email);
        }
    }

    /// Store the edited draft back into the session.
    fn keep_email_edits(&mut self) {
        if let Some(text) = self.email.text() {
            self.session.email_draft = Some(text);
        }
    }

    /// The email draft as last edited, if any.
    pub fn final_email_draft(&mut self) -> Option<String> {
        self.keep_email_edits();
        self.session.email_draft.clone()
    }

    /// Export the current analysis as JSON.
    fn export(&mut self) {
        let Some(record) = &self.session.insights else {
            self.session.notice = Some(Notice::Error("Nothing to export yet".to_string()));
            return;
        };

        self.session.notice = Some(
            match write_export(record, &self.settings.export_dir(), Local::now()) {
                Ok(path) => Notice::Info(format!("Exported analysis to {}", path.display())),
                Err(e) => Notice::Error(format!("Export failed: {e}")),
            },
        );
    }

    /// Switch to a different screen
    fn switch_screen(&mut self, screen: AppScreen) {
        if screen == self.current_screen {
            return;
        }
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
    }

    /// Handle back navigation
    pub fn handle_back(&mut self) {
        if let Some(prev) = self.previous_screen.take() {
            self.current_screen = prev;
        } else if self.current_screen != AppScreen::Form {
            self.current_screen = AppScreen::Form;
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.current_screen == AppScreen::Form && !self.show_help
    }

    /// Toggle help popup
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn current_screen(&self) -> AppScreen {
        self.current_screen
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}
