//! Authentication command module for GitHub credentials management.
//!
//! This module stores a GitHub Personal Access Token in the system keyring and
//! resolves the token used by the other commands. The `GITHUB_TOKEN`
//! environment variable takes precedence over the keyring.

use std::io::{self, Write};

use clap::Subcommand;
use keyring::Entry;
use tracing::{debug, error, info, instrument};

use crate::{
    config::{get_config_path, AppConfig},
    errors::Error,
};

pub const KEY_RING_SERVICE_NAME: &str = "label_roller_cli";
pub const KEY_RING_USER_TOKEN: &str = "github_token";

/// Environment variable checked before the keyring.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;

/// Authentication subcommands for managing GitHub credentials.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Configure GitHub authentication credentials.
    ///
    /// Prompts for a Personal Access Token and stores it in the system keyring.
    #[command(name = "github")]
    GitHub {
        /// Authentication method to configure. Only "token" is supported.
        #[arg(default_value = "token")]
        method: String,
    },
}

/// Executes the specified authentication command.
///
/// # Errors
///
/// This function will return an error if:
/// - An unsupported authentication method is specified
/// - The configuration file cannot be loaded or saved
/// - The token is empty or cannot be stored in the keyring
#[instrument]
pub async fn execute(cmd: &AuthCommands, config_path: Option<&str>) -> Result<(), Error> {
    match cmd {
        AuthCommands::GitHub { method } => auth_github(method, config_path).await,
    }
}

#[instrument]
async fn auth_github(method: &str, config_path: Option<&str>) -> Result<(), Error> {
    debug!(message = "Authenticating with GitHub", method = method);

    if method != "token" {
        let err = Error::InvalidArguments(format!("Unsupported authentication method: {}", method));
        error!(message = "Unsupported authentication method", method = method, error = ?err);
        return Err(err);
    }

    let mut config = AppConfig::load_or_default(config_path)?;

    info!(message = "GitHub Personal Access Token Authentication");
    println!("GitHub Personal Access Token Authentication");
    println!("------------------------------------------");
    print!("Please provide your GitHub Personal Access Token: ");
    io::stdout().flush().map_err(|_| Error::StdOutFlushFailed)?;

    let mut token = String::new();
    io::stdin()
        .read_line(&mut token)
        .map_err(|e| Error::Auth(format!("Failed to read input: {}", e)))?;
    let token = token.trim();
    debug!(message = "Read token from stdin");

    if token.is_empty() {
        let err = Error::Auth("Token cannot be empty".to_string());
        error!(message = "Token cannot be empty", error = ?err);
        return Err(err);
    }

    let keyring = Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN)
        .map_err(|e| Error::Auth(format!("Failed to create an entry in the keyring: {}", e)))?;
    keyring
        .set_password(token)
        .map_err(|e| Error::Auth(format!("Failed to save token to keyring: {}", e)))?;
    debug!(message = "Saved token to keyring");

    config.authentication.auth_method = "token".to_string();
    let path = get_config_path(config_path);
    config.save(&path).map_err(|e| {
        error!(error = e.to_string(), "Failed to save the configuration");
        Error::Config("Failed to save the configuration.".to_string())
    })?;
    info!(
        message = "Updated configuration with auth method",
        auth_method = "token"
    );

    println!("GitHub token authentication configured successfully!");
    Ok(())
}

/// Returns the token for GitHub requests.
///
/// `GITHUB_TOKEN` wins when it is set and not blank; otherwise the token stored
/// by `label-roller auth github` is read from the keyring.
///
/// # Errors
///
/// Returns `Error::Auth` if neither source provides a token.
pub fn resolve_token() -> Result<String, Error> {
    select_token(std::env::var(GITHUB_TOKEN_ENV).ok(), read_keyring_token)
}

fn select_token<F>(env_token: Option<String>, keyring: F) -> Result<String, Error>
where
    F: FnOnce() -> Result<String, Error>,
{
    match env_token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
    {
        Some(token) => {
            debug!(message = "Using token from environment", variable = GITHUB_TOKEN_ENV);
            Ok(token)
        }
        None => keyring(),
    }
}

fn read_keyring_token() -> Result<String, Error> {
    let entry = Entry::new(KEY_RING_SERVICE_NAME, KEY_RING_USER_TOKEN)
        .map_err(|e| Error::Auth(format!("Failed to create an entry in the keyring: {}", e)))?;

    entry.get_password().map_err(|e| match e {
        keyring::Error::NoEntry => Error::Auth(format!(
            "No GitHub token found. Set {} or run 'label-roller auth github'",
            GITHUB_TOKEN_ENV
        )),
        other => Error::Auth(format!("Failed to read token from keyring: {}", other)),
    })
}
