//! Settings file at ~/.config/bcscal/config.toml

use anyhow::{Context, Result};
use bcscal_core::{DEFAULT_TIMEZONE, parse_timezone};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Path to the YAML catalog of categories and items
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// IANA zone the catalog's days and times are written in
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog: default_catalog(),
            timezone: default_timezone(),
        }
    }
}

fn default_catalog() -> String {
    "~/.config/bcscal/configuration.yaml".to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Settings {
    /// Load settings from `path`, or from the default location.
    ///
    /// A missing file at the default location means defaults; a missing file
    /// that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path()?, false),
        };

        if !path.exists() {
            if explicit {
                anyhow::bail!("Settings file not found at {}", path.display());
            }
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file at {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file at {}", path.display()))?;

        Ok(settings)
    }

    pub fn catalog_path(&self) -> PathBuf {
        expand_path(&self.catalog)
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone).context("Invalid 'timezone' in settings")
    }
}

/// Get the config directory path (~/.config/bcscal)
pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("bcscal"))
}

/// Get the settings file path (~/.config/bcscal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}
