//! Interactive terminal front end built on ratatui.

mod app;
pub mod screens;
pub mod widgets;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;

use crate::cli::{commands::demo_info, DemoArgs};
use crate::config::Settings;
use crate::llm::build_provider;
pub use app::{App, AppScreen, PendingAction};

/// Run the TUI application
pub async fn run(settings: &Settings, demo: &DemoArgs) -> Result<()> {
    // Fail before touching the terminal when no credential is configured
    let provider = build_provider(settings)?;
    let mut app = App::new(settings.clone(), provider, demo_info(settings, demo));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    result?;

    // Leave the final draft in the scrollback so it can be copied
    if let Some(draft) = app.final_email_draft() {
        println!("{}", draft.trim_end());
    }

    Ok(())
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Esc => {
                    if app.should_quit() {
                        return Ok(());
                    }
                    app.handle_back();
                }
                KeyCode::F(1) => app.toggle_help(),
                _ => app.handle_key(key),
            },
            Event::Paste(text) => app.handle_paste(&text),
            _ => {}
        }

        if app.has_pending() {
            // Show the busy status before blocking on the provider
            terminal.draw(|f| app.draw(f))?;
            app.run_pending().await;
        }
    }
}
