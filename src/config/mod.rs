//! Configuration for a run.
//!
//! Settings are resolved with the precedence
//! **command-line flag > environment variable > config file > default**.
//! clap handles the first two (every flag declares its `env`), this module loads
//! the optional TOML file and fills in whatever is still unset.
//!
//! # Config file
//!
//! Location: `~/.wp-svn-update/config.toml` (`%LOCALAPPDATA%\wp-svn-update\config.toml`
//! on Windows), overridable with `--config` or `WP_SVN_UPDATE_CONFIG`.
//!
//! ```toml
//! svn = "/opt/subversion/bin/svn"
//! plugins_dir = "wp-content/plugins"
//! no_progress = true
//! ```
//!
//! A missing file at the default location is fine; a missing file that was named
//! explicitly is an error.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_PLUGINS_DIR;
use crate::core::WpSvnError;
use crate::utils::platform::get_svn_command;

/// Contents of the optional config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// svn executable name or path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svn: Option<String>,

    /// Plugins directory relative to the WordPress root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<String>,

    /// Disable the progress spinner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_progress: Option<bool>,
}

impl FileConfig {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("wp-svn-update")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".wp-svn-update")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from an explicit path, or from the default path if it exists.
    pub async fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from(path).await;
        }

        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path).await,
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!("No default config location: {}", e);
                Ok(Self::default())
            }
        }
    }

    /// Load and parse the file at `path`.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = toml::from_str(&content).map_err(|e| WpSvnError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string().trim().to_string(),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Settings given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// `--svn`
    pub svn: Option<String>,
    /// `--plugins-dir`
    pub plugins_dir: Option<String>,
    /// `--no-progress`
    pub no_progress: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Absolute path of the WordPress working copy
    pub target: PathBuf,
    /// Skip the confirmation prompt
    pub force: bool,
    /// svn executable name or path
    pub svn: String,
    /// Plugins directory relative to `target`
    pub plugins_dir: String,
    /// Show the spinner while collecting information
    pub show_progress: bool,
}

impl RunConfig {
    /// Merge command-line settings over the config file over defaults.
    #[must_use]
    pub fn resolve(target: PathBuf, force: bool, cli: CliSettings, file: FileConfig) -> Self {
        Self {
            target,
            force,
            svn: cli.svn.or(file.svn).unwrap_or_else(|| get_svn_command().to_string()),
            plugins_dir: cli
                .plugins_dir
                .or(file.plugins_dir)
                .unwrap_or_else(|| DEFAULT_PLUGINS_DIR.to_string()),
            show_progress: !(cli.no_progress || file.no_progress.unwrap_or(false)),
        }
    }
}
