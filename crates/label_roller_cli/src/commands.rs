//! Command modules for the LabelRoller CLI.
//!
//! Each submodule handles one subcommand:
//!
//! - `auth_cmd`: store and resolve the GitHub token
//! - `delete_cmd`: delete a label or the GitHub default labels
//! - `pull_cmd`: print the labels of a repository as JSON
//! - `push_cmd`: synchronize a label file onto repositories
//! - `rename_cmd`: rename a label in place

use github_client::GitHubClient;
use label_roller_core::LabelManager;

use crate::{config::AppConfig, errors::Error};

pub mod auth_cmd;
pub mod delete_cmd;
pub mod pull_cmd;
pub mod push_cmd;
pub mod rename_cmd;

/// Builds a label manager for the GitHub API named in the configuration.
///
/// # Errors
///
/// Returns `Error::Auth` when no token is available and `Error::GitHub` when
/// the client cannot be built.
pub fn create_manager(config: &AppConfig) -> Result<LabelManager<GitHubClient>, Error> {
    let token = auth_cmd::resolve_token()?;
    let client = GitHubClient::from_token(
        &token,
        &config.github.api_url,
        config.github.timeout(),
    )?;
    Ok(LabelManager::new(client))
}
