//! Configuration management for the Filelocker CLI
//!
//! Settings are layered: built-in defaults, then the TOML config file, then
//! `FILELOCKER_*` environment variables, then command-line flags. Flags and
//! environment variables are both read by clap; this module loads the file,
//! merges the layers and validates the result into [`Settings`].

use crate::error::{Error, Result};
use crate::utils::parse_duration;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub mod auth;
pub mod defaults;

pub use auth::AuthConfig;
pub use defaults::*;

/// One configuration layer, as found in the config file or on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Login credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Filelocker base URL (e.g. `https://files.example.edu`)
    #[serde(default)]
    pub url: Option<String>,

    /// HTTP client timeout, as a duration string
    #[serde(default)]
    pub timeout: Option<String>,

    /// Print JSON where applicable
    #[serde(default)]
    pub json: bool,
}

/// Fully resolved settings handed to command handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Login credentials, both fields set
    pub auth: AuthConfig,
    /// Base URL
    pub url: String,
    /// Overall request timeout
    pub timeout: Duration,
    /// Print JSON where applicable
    pub json: bool,
}

impl Config {
    /// Load the config file.
    ///
    /// With an explicit path the file must exist. Otherwise the default
    /// location is tried and a missing file yields an empty layer.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from(path)?;
            info!(path = %path.display(), "using config file");
            return Ok(config);
        }

        let path = match Self::config_path() {
            Ok(path) => path,
            Err(err) => {
                debug!(%err, "no config directory, skipping config file");
                return Ok(Self::default());
            }
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        info!(path = %path.display(), "using config file");
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the path to the config file
    ///
    /// Tries in order:
    /// 1. `XDG_CONFIG_HOME/filelocker/config.toml`
    /// 2. `~/.config/filelocker/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        config_home
            .ok_or_else(|| {
                Error::InvalidConfig(
                    "Could not determine config directory: XDG_CONFIG_HOME not set and no home directory found"
                        .to_string(),
                )
            })
            .map(|path| path.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Merge another config into this one, with other taking precedence
    pub fn merge(&mut self, other: &Self) {
        self.auth.merge(&other.auth);
        if let Some(url) = other.url.as_ref().filter(|u| !u.is_empty()) {
            self.url = Some(url.clone());
        }
        if let Some(timeout) = other.timeout.as_ref().filter(|t| !t.is_empty()) {
            self.timeout = Some(timeout.clone());
        }
        if other.json {
            self.json = true;
        }
    }

    /// Validate the merged layers into settings
    pub fn into_settings(self) -> Result<Settings> {
        let url = self
            .url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::MissingArgument("filelocker URL (--url or FILELOCKER_URL)".to_string()))?;

        if !self.auth.is_configured() {
            let missing = if self.auth.login.is_empty() {
                "login (--login or FILELOCKER_LOGIN)"
            } else {
                "API key (--key or FILELOCKER_KEY)"
            };
            return Err(Error::MissingArgument(missing.to_string()));
        }

        let timeout = match self.timeout.as_deref() {
            Some(raw) => parse_duration(raw)?,
            None => DEFAULT_TIMEOUT,
        };
        if timeout.is_zero() {
            return Err(Error::InvalidConfig(
                "timeout must be greater than 0".to_string(),
            ));
        }

        Ok(Settings {
            auth: self.auth,
            url,
            timeout,
            json: self.json,
        })
    }
}
