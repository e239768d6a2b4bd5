//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Papersift - Filter research paper collections down to the relevant ones.
#[derive(Debug, Parser)]
#[command(name = "papersift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log filter decisions (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter papers to keep only relevant ones
    Filter(FilterArgs),

    /// Show statistics about a paper collection
    Stats(StatsArgs),

    /// Run the filters and explain the most common exclusions
    Analyze(AnalyzeArgs),

    /// Write the default domain configuration to a file
    InitConfig(InitConfigArgs),
}

/// Arguments for the filter command.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Input corpus file
    #[arg(short, long, default_value = "papers.json")]
    pub input: PathBuf,

    /// Output file; excluded and needs-review files are written next to it
    #[arg(short, long, default_value = "papers_filtered.json")]
    pub output: PathBuf,

    /// Domain configuration file (TOML)
    #[arg(short, long, env = "PAPERSIFT_DOMAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show sample excluded papers
    #[arg(long)]
    pub show_samples: bool,

    /// Worker tasks (defaults to the settings file, then CPU count)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for the stats command.
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Input corpus file
    #[arg(short, long, default_value = "papers.json")]
    pub input: PathBuf,
}

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input corpus file
    #[arg(short, long, default_value = "papers.json")]
    pub input: PathBuf,

    /// Domain configuration file (TOML)
    #[arg(short, long, env = "PAPERSIFT_DOMAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of exclusion reasons to detail
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Example titles shown per reason
    #[arg(long, default_value = "3")]
    pub examples: usize,
}

/// Arguments for the init-config command.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = "domain.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
