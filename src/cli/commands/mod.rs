//! Command execution functions.
//!
//! Each subcommand returns the process exit code; errors propagate to
//! [`crate::cli::run`], which prints them.

mod config;
mod generate;
mod public_key;
mod update_url;

pub use config::run_config;
pub use generate::run_generate;
pub use public_key::run_public_key;
pub use update_url::run_update_url;
