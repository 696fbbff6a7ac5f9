use crate::config::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn get_telebridge_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".telebridge"))
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_telebridge_home()?.join("config.json"))
}

/// Load `.env` from the working directory (or a parent) into the process environment.
///
/// Returns the file that was loaded, or `None` when there is none. A file that exists
/// but cannot be parsed is an error.
pub fn load_dotenv() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("Failed to load .env"),
    }
}

/// Load configuration: JSON file (if present) → env overrides → validation.
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let mut config = read_config_file(config_path)?;
    crate::config::credentials::apply_env_overrides(&mut config);
    config
        .validate()
        .with_context(|| "Configuration validation failed")?;
    Ok(config)
}

/// Read the config file without env overrides or validation. Returns defaults when the
/// file does not exist.
pub fn read_config_file(config_path: Option<&Path>) -> Result<Config> {
    let default_path = get_config_path().unwrap_or_else(|_| PathBuf::from("config.json"));
    let path = config_path.unwrap_or(default_path.as_path());

    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
    check_file_permissions(path);
    Ok(config)
}

/// Warn if the config file is readable by group or others; it holds the bot token.
#[cfg(unix)]
fn check_file_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(meta) = fs::metadata(path) {
        let mode = meta.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(
                "config file {} has permissions {:o}, recommend 0600",
                path.display(),
                mode & 0o777
            );
        }
    }
}

#[cfg(not(unix))]
fn check_file_permissions(_path: &Path) {}
