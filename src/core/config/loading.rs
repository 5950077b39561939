//! Locates and parses TOML configuration files from disk.

use crate::core::config::file::ConfigFile;
use crate::core::error::{AppError, Result};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file path.
pub(crate) const CONFIG_PATH_ENV: &str = "EMAIL_WARDEN_CONFIG";

/// Default config file name searched for in the working directory.
pub(crate) const DEFAULT_CONFIG_NAME: &str = "email-warden.toml";

/// Resolves the config file to load, if any.
///
/// Precedence: explicit path argument, then `EMAIL_WARDEN_CONFIG`, then
/// `./email-warden.toml` when it exists. An explicitly named file that is
/// missing is an error; the implicit candidates are simply skipped.
pub(crate) fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
        if !env_path.is_empty() {
            let path = PathBuf::from(&env_path);
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file from {} not found: {}",
                    CONFIG_PATH_ENV, env_path
                )));
            }
            return Ok(Some(path));
        }
    }

    let default = PathBuf::from(DEFAULT_CONFIG_NAME);
    if default.is_file() {
        return Ok(Some(default));
    }

    Ok(None)
}

/// Reads and parses a TOML config file.
pub(crate) fn load_config_file(path: &Path) -> Result<ConfigFile> {
    tracing::debug!(target: "config", "Loading config file: {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    toml::from_str(&raw).map_err(|e| {
        AppError::Config(format!(
            "Failed to parse config file {}: {}",
            path.display(),
            e
        ))
    })
}
