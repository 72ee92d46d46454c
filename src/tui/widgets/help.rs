//! Help popup widget

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::AppScreen;

/// Help popup that shows keyboard shortcuts
pub struct HelpPopup;

fn shortcut(key: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:<10}"), Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

fn heading(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold()))
}

impl HelpPopup {
    pub fn draw(frame: &mut Frame, area: Rect, screen: AppScreen) {
        // Centered, 60% width, 70% height
        let popup_width = (area.width as f32 * 0.6) as u16;
        let popup_height = (area.height as f32 * 0.7) as u16;
        let popup_area = Rect {
            x: (area.width - popup_width) / 2,
            y: (area.height - popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        frame.render_widget(Clear, popup_area);

        let mut text = match screen {
            AppScreen::Form => vec![
                heading("Transcript Shortcuts"),
                Line::from(""),
                shortcut("Tab", "Next field"),
                shortcut("Shift+Tab", "Previous field"),
                shortcut("←/→", "Change email template, or move the cursor"),
                shortcut("Ctrl+U", "Clear field"),
                shortcut("Ctrl+R", "Analyze transcript"),
            ],
            AppScreen::Insights => vec![
                heading("Insights Shortcuts"),
                Line::from(""),
                shortcut("↑/k", "Previous action item"),
                shortcut("↓/j", "Next action item"),
                shortcut("Space", "Mark action item done"),
                shortcut("PgUp/PgDn", "Scroll insights"),
                shortcut("t", "Cycle email template"),
                shortcut("e", "Open email draft"),
                shortcut("Ctrl+R", "Redraft email"),
            ],
            AppScreen::Email => vec![
                heading("Email Shortcuts"),
                Line::from(""),
                shortcut("Arrows", "Move the cursor"),
                shortcut("Type", "Edit the draft at the cursor"),
                shortcut("Ctrl+R", "Redraft with current template"),
            ],
        };

        text.extend([
            Line::from(""),
            heading("Everywhere"),
            shortcut("F2/F3/F4", "Transcript / Insights / Email"),
            shortcut("Ctrl+X", "Export analysis as JSON"),
            shortcut("F1", "Toggle this help"),
            shortcut("Esc", "Go back, quit from the transcript screen"),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to close",
                Style::default().fg(Color::DarkGray),
            )),
        ]);

        let help = Paragraph::new(text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(help, popup_area);
    }
}
