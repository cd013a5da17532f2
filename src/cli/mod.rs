//! Command line interface for the appcast tool.
//!
//! This module provides argument parsing, command dispatch and user feedback.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, ConfigAction, RuntimeConfig, ToolArgs};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from_args(&args)?;

    let result = match &args.command {
        Command::Generate { app, url, tools } => {
            commands::run_generate(app, url.clone(), tools, &config).await
        }
        Command::UpdateUrl { app, url } => commands::run_update_url(app, url, &config).await,
        Command::PublicKey { tools_dir } => {
            commands::run_public_key(tools_dir.as_deref(), &config).await
        }
        Command::Config { action } => commands::run_config(action, &config),
    };

    if let Err(e) = &result {
        for suggestion in e.recovery_suggestions() {
            if let Err(write_err) = config.output().warn(&suggestion) {
                log::debug!("Could not print suggestion: {}", write_err);
            }
        }
    }

    result
}
