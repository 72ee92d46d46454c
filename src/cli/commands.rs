//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Read;
use std::path::Path;

use crate::analysis::{TemplateKind, TranscriptAnalyzer};
use crate::cli::args::{AnalyzeArgs, Cli, ConfigCommand, DemoArgs};
use crate::config::Settings;
use crate::export::{read_export, to_export_json, write_export};
use crate::llm::build_provider;
use crate::render::{demo_header, render_text};
use crate::session::{DemoInfo, SessionHandler, SessionState};

/// Analyze a transcript file (or stdin) and print the insights.
pub async fn analyze_transcript(settings: &Settings, args: AnalyzeArgs) -> Result<()> {
    let provider = build_provider(settings)?;
    let transcript = read_transcript(args.file.as_deref())?;
    let demo = demo_info(settings, &args.demo);

    let state = if args.json || args.no_email {
        let analyzer =
            TranscriptAnalyzer::new(provider.as_ref(), settings.llm.analysis_max_tokens);
        let insights = analyzer
            .analyze(&transcript)
            .await
            .context("Error analyzing transcript")?;
        SessionState {
            insights: Some(insights),
            ..SessionState::new(demo)
        }
    } else {
        let handler = SessionHandler::new(provider.as_ref(), &settings.llm);
        handler.analyze(SessionState::new(demo), &transcript).await
    };

    let Some(insights) = state.insights.as_ref() else {
        let message = state
            .notice
            .as_ref()
            .map(|n| n.message().to_string())
            .unwrap_or_else(|| "Analysis produced no result".to_string());
        anyhow::bail!(message);
    };

    if args.json {
        println!("{}", to_export_json(insights)?);
    } else {
        print!("{}", render_text(insights, &state.demo));
    }

    if let Some(draft) = state.email_draft.as_deref() {
        println!();
        println!("== Follow-up Email Draft ({}) ==", state.demo.template);
        println!("{}", draft.trim_end());
    } else if let Some(notice) = state.notice.as_ref().filter(|n| n.is_error()) {
        eprintln!("warning: {}", notice.message());
    }

    if let Some(dir) = args.export {
        let dir = dir.unwrap_or_else(|| settings.export_dir());
        let path = write_export(insights, &dir, Local::now())?;
        eprintln!("Exported analysis to: {}", path.display());
    }

    Ok(())
}

/// Draft a follow-up email from an exported analysis.
pub async fn draft_email(
    settings: &Settings,
    analysis: &Path,
    contact: &str,
    template: Option<String>,
) -> Result<()> {
    let provider = build_provider(settings)?;
    let insights = read_export(analysis)
        .with_context(|| format!("Failed to read analysis: {}", analysis.display()))?;

    let demo = demo_info(
        settings,
        &DemoArgs {
            contact: Some(contact.to_string()),
            template,
            ..DemoArgs::default()
        },
    );
    let state = SessionState {
        insights: Some(insights),
        ..SessionState::new(demo)
    };

    let handler = SessionHandler::new(provider.as_ref(), &settings.llm);
    let state = handler.redraft(state).await;

    match state.email_draft {
        Some(draft) => {
            println!("{}", draft.trim_end());
            Ok(())
        }
        None => {
            let message = state
                .notice
                .map(|n| n.message().to_string())
                .unwrap_or_else(|| "No email draft produced".to_string());
            anyhow::bail!(message)
        }
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if shown.has_api_key() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write the completion script for `shell` to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

/// Build demo information from CLI flags and configured defaults.
pub fn demo_info(settings: &Settings, args: &DemoArgs) -> DemoInfo {
    let demo = DemoInfo {
        contact_name: args.contact.clone().unwrap_or_default(),
        contact_role: args.role.clone().unwrap_or_default(),
        demo_date: args
            .date
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
        template: args
            .template
            .as_deref()
            .map(TemplateKind::from_label)
            .unwrap_or(settings.email.default_template),
    };
    if let Some(header) = demo_header(&demo) {
        tracing::debug!("{}", header);
    }
    demo
}

// Helper functions

fn read_transcript(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display())),
        _ => {
            let mut transcript = String::new();
            std::io::stdin()
                .read_to_string(&mut transcript)
                .context("Failed to read transcript from stdin")?;
            Ok(transcript)
        }
    }
}
