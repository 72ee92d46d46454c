//! demo-insights - Sales-demo transcript analysis and follow-up emails
//!
//! Entry point for the demo-insights CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use demo_insights::cli::{Cli, Commands};
use demo_insights::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        demo_insights::cli::commands::print_completions(shell);
        return Ok(());
    }

    // A local .env may carry ANTHROPIC_API_KEY.
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    // The TUI owns the terminal, so it stays quiet unless RUST_LOG asks otherwise.
    let default_filter = match (&cli.command, cli.verbose) {
        (Commands::Tui(_), _) => "off",
        (_, true) => "debug",
        (_, false) => settings.general.log_level.as_str(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info"))
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            demo_insights::cli::commands::analyze_transcript(&settings, args).await?;
        }
        Commands::Email {
            analysis,
            contact,
            template,
        } => {
            demo_insights::cli::commands::draft_email(&settings, &analysis, &contact, template)
                .await?;
        }
        Commands::Tui(demo) => {
            demo_insights::tui::run(&settings, &demo).await?;
        }
        Commands::Config(config_cmd) => {
            demo_insights::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
