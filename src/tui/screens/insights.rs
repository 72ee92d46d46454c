//! Insights screen - categorized panels and the action-item checklist

use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
};

use crate::analysis::InsightRecord;
use crate::render::{action_line, panels, Entry};

/// Insights screen state
pub struct InsightsScreen {
    done: Vec<bool>,
    list_state: ListState,
    scroll_offset: usize,
    content_height: usize,
    wrap: bool,
}

impl InsightsScreen {
    pub fn new(wrap: bool) -> Self {
        Self {
            done: Vec::new(),
            list_state: ListState::default(),
            scroll_offset: 0,
            content_height: 0,
            wrap,
        }
    }

    /// Reset the checklist for a fresh analysis.
    pub fn reset(&mut self, record: &InsightRecord) {
        self.done = vec![false; record.next_steps.len()];
        self.list_state
            .select(if self.done.is_empty() { None } else { Some(0) });
        self.scroll_offset = 0;
    }

    pub fn next(&mut self) {
        if self.done.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.done.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.done.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.done.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_selected(&mut self) {
        if let Some(done) = self
            .list_state
            .selected()
            .and_then(|i| self.done.get_mut(i))
        {
            *done = !*done;
        }
    }

    pub fn completed(&self) -> usize {
        self.done.iter().filter(|d| **d).count()
    }

    pub fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 10).min(self.content_height.saturating_sub(1));
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, record: Option<&InsightRecord>) {
        let Some(record) = record else {
            let empty = Paragraph::new("No analysis yet. Paste a transcript and press Ctrl+R.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Key Insights "));
            frame.render_widget(empty, area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        self.draw_panels(frame, columns[0], record);
        self.draw_checklist(frame, columns[1], record);
    }

    fn draw_panels(&mut self, frame: &mut Frame, area: Rect, record: &InsightRecord) {
        let mut lines: Vec<Line> = Vec::new();
        for panel in panels(record) {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                panel.title,
                Style::default().fg(Color::Cyan).bold(),
            )));
            for entry in panel.entries {
                lines.push(match entry {
                    Entry::Heading(text) => Line::from(Span::styled(
                        text,
                        Style::default().fg(Color::White).bold(),
                    )),
                    Entry::Bullet { marker, text } => Line::from(vec![
                        Span::raw(format!("  {} ", marker)),
                        Span::raw(text),
                    ]),
                    Entry::Field { label, value } => Line::from(vec![
                        Span::styled(format!("{}: ", label), Style::default().bold()),
                        Span::raw(value),
                    ]),
                    Entry::Empty => Line::from(Span::styled(
                        "  nothing captured",
                        Style::default().fg(Color::DarkGray),
                    )),
                });
            }
        }

        self.content_height = lines.len();
        let visible_height = area.height.saturating_sub(2) as usize;

        let mut paragraph = Paragraph::new(lines)
            .scroll((self.scroll_offset as u16, 0))
            .block(
                Block::default()
                    .title(" Key Insights ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            );
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        frame.render_widget(paragraph, area);

        if self.content_height > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));
            let mut scrollbar_state = ScrollbarState::new(self.content_height)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn draw_checklist(&mut self, frame: &mut Frame, area: Rect, record: &InsightRecord) {
        let items: Vec<ListItem> = record
            .next_steps
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let done = self.done.get(i).copied().unwrap_or(false);
                let (checkbox, style) = if done {
                    ("[x] ", Style::default().fg(Color::DarkGray).crossed_out())
                } else {
                    ("[ ] ", Style::default())
                };
                ListItem::new(Line::from(vec![
                    Span::raw(checkbox),
                    Span::styled(action_line(item), style),
                ]))
            })
            .collect();

        let title = format!(
            " Action Items ({}/{}) ",
            self.completed(),
            record.next_steps.len()
        );
        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}
