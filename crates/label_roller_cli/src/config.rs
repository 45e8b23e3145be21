//! Configuration management for the LabelRoller CLI.
//!
//! This module provides functionality for loading, saving, and managing
//! configuration files for the LabelRoller CLI application. It covers the
//! GitHub endpoint and request timeout as well as the authentication method.
//!
//! The configuration is stored in TOML format and can be loaded from a
//! specified file path or from the default location in the current directory.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "label-roller.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the LabelRoller CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// api_url = "https://api.github.com"
/// request_timeout_secs = 30
///
/// [authentication]
/// auth_method = "token"
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub endpoint settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// CLI-specific authentication settings
    #[serde(default)]
    pub authentication: AuthenticationConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if:
    /// - The specified file does not exist
    /// - The file cannot be read due to permissions or I/O issues
    /// - The file contains invalid TOML syntax
    /// - The TOML structure doesn't match the expected configuration schema
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use label_roller_cli::config::AppConfig;
    ///
    /// let config_path = Path::new("./label-roller.toml");
    /// match AppConfig::load(&config_path) {
    ///     Ok(config) => println!("Using {}", config.github.api_url),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        if config.github.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }

    /// Loads the configuration for a command.
    ///
    /// An explicitly given path must exist. When no path is given the default
    /// file in the current directory is used if present, and the built-in
    /// defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` as described for [`AppConfig::load`].
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);
        if config_path.is_none() && !path.exists() {
            debug!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Saves the configuration to a TOML file at the specified path.
    ///
    /// Parent directories are created when missing and an existing file is
    /// overwritten.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

/// GitHub endpoint settings.
///
/// `api_url` points at a GitHub Enterprise server when set to something like
/// `https://ghe.example.com/api/v3`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "GitHubConfig::default_api_url")]
    pub api_url: String,

    /// Upper bound for each individual request
    #[serde(default = "GitHubConfig::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl GitHubConfig {
    fn default_api_url() -> String {
        github_client::DEFAULT_API_URL.to_string()
    }

    fn default_request_timeout_secs() -> u64 {
        github_client::DEFAULT_TIMEOUT.as_secs()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: GitHubConfig::default_api_url(),
            request_timeout_secs: GitHubConfig::default_request_timeout_secs(),
        }
    }
}

/// Configuration for CLI authentication settings.
///
/// Only personal access tokens are supported, so `auth_method` is `"token"`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticationConfig {
    #[serde(default = "AuthenticationConfig::default_auth_method")]
    pub auth_method: String,
}

impl AuthenticationConfig {
    /// Returns the default authentication method.
    fn default_auth_method() -> String {
        "token".to_string()
    }

    /// Creates a new AuthenticationConfig with default values.
    pub fn new() -> Self {
        AuthenticationConfig {
            auth_method: Self::default_auth_method(),
        }
    }
}

impl Default for AuthenticationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves the path to the configuration file.
///
/// Returns `config_path` when given, otherwise `./label-roller.toml` in the
/// current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        // Look for config in current directory
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
