//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// demo-insights - Sales-demo transcript analysis and follow-up emails
#[derive(Parser, Debug)]
#[command(name = "demo-insights")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a demo transcript and draft a follow-up email
    Analyze(AnalyzeArgs),

    /// Draft a follow-up email from an exported analysis
    Email {
        /// Path to a demo_analysis_*.json export
        analysis: PathBuf,

        /// Recipient name
        #[arg(short, long)]
        contact: String,

        /// Email template (standard, technical, executive, clinical)
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Launch the interactive TUI
    Tui(DemoArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Demo information shared by `analyze` and `tui`.
#[derive(Args, Debug, Clone, Default)]
pub struct DemoArgs {
    /// Primary contact name; enables the follow-up email draft
    #[arg(short, long)]
    pub contact: Option<String>,

    /// Contact role (display only)
    #[arg(short, long)]
    pub role: Option<String>,

    /// Demo date (display only)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Email template (standard, technical, executive, clinical)
    #[arg(short, long)]
    pub template: Option<String>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Transcript file; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub demo: DemoArgs,

    /// Print the analysis as JSON (skips the email draft)
    #[arg(long)]
    pub json: bool,

    /// Skip the follow-up email draft
    #[arg(long)]
    pub no_email: bool,

    /// Export the analysis as JSON, optionally into DIR
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
