//! Init-config command implementation.

use crate::cli::InitConfigArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use papersift_filters::DomainConfig;
use std::fs;

/// Execute the init-config command.
pub fn execute_init_config(args: InitConfigArgs, formatter: &Formatter) -> Result<()> {
    if args.output.exists() && !args.force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        )));
    }

    let contents = DomainConfig::default().to_toml()?;
    fs::write(&args.output, contents)?;

    println!(
        "{}",
        formatter.success(&format!("Wrote domain configuration to {}", args.output.display()))
    );
    Ok(())
}
