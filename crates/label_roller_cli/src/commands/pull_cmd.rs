//! Pull command: print the labels of one repository.
//!
//! The output is a JSON array indented with four spaces that `push` accepts
//! as input.

use std::io::Write;

use clap::Args;
use github_client::LabelClient;
use label_roller_core::{write_labels_json, LabelManager, RepositoryScope};
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "pull_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct PullArgs {
    /// Repository to read the labels from, as owner/repo
    pub target: String,
}

/// Writes the labels of the repository named in `args` to `out`.
///
/// # Errors
///
/// Returns `Error::InvalidArguments` if the target is an owner rather than a
/// single repository.
#[instrument(skip(manager, out))]
pub async fn execute<C, W>(manager: &LabelManager<C>, args: &PullArgs, out: W) -> Result<(), Error>
where
    C: LabelClient,
    W: Write,
{
    let scope = RepositoryScope::parse(&args.target)?;
    let RepositoryScope::Repository { owner, repo } = &scope else {
        return Err(Error::InvalidArguments(format!(
            "pull reads a single repository, expected 'owner/repo' but got '{}'",
            args.target
        )));
    };

    let labels = manager.pull(owner, repo).await?;
    write_labels_json(out, &labels).map_err(Error::WriteOutput)
}
