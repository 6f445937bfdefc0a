//! Configuration management for taskctl

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default API base URL of the task backend
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// File name of the token store, kept next to the config file
pub const TOKEN_FILE_NAME: &str = "tokens.yaml";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API base URL (defaults to [`DEFAULT_BASE_URL`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Username of the last successful login
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".taskctl").join("config.yaml"))
    }

    /// Resolve an optional override to a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Path of the token file that belongs to a config file
    pub fn token_path(config_path: &Path) -> PathBuf {
        config_path
            .parent()
            .map(|dir| dir.join(TOKEN_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(TOKEN_FILE_NAME))
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        write_private(path, &contents)
    }

    /// Resolve the API base URL: explicit override, then config, then default.
    ///
    /// The result always ends with `/` so relative endpoint paths join onto it.
    pub fn base_url(&self, override_url: Option<&str>) -> Result<String> {
        let raw = override_url
            .or(self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim();

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base URL must start with http:// or https://, got '{}'",
                raw
            ))
            .into());
        }

        if raw.ends_with('/') {
            Ok(raw.to_string())
        } else {
            Ok(format!("{}/", raw))
        }
    }
}

/// Write a file readable only by the current user, creating parent directories.
pub(crate) fn write_private(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, contents)?;

    // Set file permissions to 600 on Unix systems
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
