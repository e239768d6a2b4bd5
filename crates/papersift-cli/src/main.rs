//! Papersift CLI - filter research paper collections down to one domain.

use clap::Parser;
use papersift_cli::commands;
use papersift_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> papersift_cli::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable settings file");
        Config::default()
    });

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Filter(args) => commands::execute_filter(args, &config, &formatter).await?,
        Command::Stats(args) => commands::execute_stats(args, &formatter)?,
        Command::Analyze(args) => commands::execute_analyze(args, &config, &formatter)?,
        Command::InitConfig(args) => commands::execute_init_config(args, &formatter)?,
    }

    Ok(())
}
