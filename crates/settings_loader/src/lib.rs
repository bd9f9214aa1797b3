//! # Settings Loader
//!
//! Centralized settings loading for the bank API server and its tools.
//! Settings come from an optional `settings.json`; environment variables
//! (usually fed from a `.env` file) override individual values.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use settings_loader;
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/my_settings.json")?;
//!
//! // Fall back to ./settings.json, then to built-in defaults, then apply env vars
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_settings_with_fallback(path.as_ref())?.unwrap_or_default();
//! let settings = settings_loader::apply_env_overrides(settings)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use models::Settings;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from a default location (settings.json in the current directory)
pub fn load_default_settings() -> Result<Settings> {
    load_settings(DEFAULT_SETTINGS_FILE)
}

/// Tries the provided path first, then the default location.
/// Returns None only if no settings file exists anywhere; a file that exists
/// but does not parse is an error.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    if let Some(settings_path) = path {
        if settings_file_exists(settings_path) {
            return load_settings(settings_path).map(Some);
        }
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_default_settings().map(Some);
    }

    Ok(None)
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Applies `HOST`, `PORT`, `DATABASE_PATH`, `STATIC_DIR` and `LOG_FILTER` from the process environment.
pub fn apply_env_overrides(settings: Settings) -> Result<Settings> {
    apply_overrides(settings, |key| std::env::var(key).ok())
}

/// Applies overrides from any key lookup. Empty values are ignored.
pub fn apply_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("HOST") {
        settings.server.host = host;
    }
    if let Some(port) = get("PORT") {
        settings.server.port = port
            .trim()
            .parse()
            .with_context(|| format!("PORT must be a number between 0 and 65535, got '{}'", port))?;
    }
    if let Some(path) = get("DATABASE_PATH") {
        settings.database_path = path;
    }
    if let Some(dir) = get("STATIC_DIR") {
        settings.static_dir = dir;
    }
    if let Some(filter) = get("LOG_FILTER") {
        settings.log_filter = Some(filter);
    }

    Ok(settings)
}
