//! Rename command: rename a label without touching its color or description.

use std::io::Write;

use clap::Args;
use colored::Colorize;
use github_client::LabelClient;
use label_roller_core::{LabelManager, RepositoryScope};
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "rename_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Target, either owner or owner/repo
    pub target: String,

    /// Current label name
    pub old: String,

    /// New label name
    pub new: String,
}

/// Renames the label on every repository in the target.
#[instrument(skip(manager, out))]
pub async fn execute<C, W>(
    manager: &LabelManager<C>,
    args: &RenameArgs,
    mut out: W,
) -> Result<(), Error>
where
    C: LabelClient,
    W: Write,
{
    let scope = RepositoryScope::parse(&args.target)?;
    let repositories = manager.rename(&scope, &args.old, &args.new).await?;

    for repo in repositories {
        writeln!(
            out,
            "{} {}/{}: renamed '{}' to '{}'",
            "✓".green(),
            scope.owner(),
            repo,
            args.old,
            args.new
        )
        .map_err(Error::WriteOutput)?;
    }

    Ok(())
}
