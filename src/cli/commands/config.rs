//! `config` command: manage persisted preferences.

use path_absolutize::Absolutize;

use crate::cli::RuntimeConfig;
use crate::cli::args::ConfigAction;
use crate::error::{CliError, Result};

/// Apply a `config` action.
pub fn run_config(action: &ConfigAction, config: &RuntimeConfig) -> Result<i32> {
    let path = config.preferences_path();
    let mut prefs = config.preferences()?;
    let output = config.output();

    match action {
        ConfigAction::Show => {
            output.plain(&format!("# {}", path.display()))?;
            output.plain(&serde_json::to_string_pretty(&prefs)?)?;
            return Ok(0);
        }
        ConfigAction::SetToolsDir { dir } => {
            if !dir.is_dir() {
                return Err(CliError::InvalidArguments {
                    reason: format!("{} is not a directory", dir.display()),
                }
                .into());
            }
            prefs.tools_dir = Some(dir.absolutize()?.into_owned());
        }
        ConfigAction::SetPrivateKey { file } => {
            if !file.is_file() {
                return Err(CliError::InvalidArguments {
                    reason: format!("{} is not a file", file.display()),
                }
                .into());
            }
            prefs.private_key = Some(file.absolutize()?.into_owned());
        }
        ConfigAction::ClearPrivateKey => prefs.private_key = None,
    }

    prefs.save(path)?;
    output.success(&format!("Saved {}", path.display()))?;
    Ok(0)
}
