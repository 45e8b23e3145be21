//! Delete command: remove a label, the GitHub default labels, or both.

use std::io::Write;

use clap::Args;
use colored::Colorize;
use github_client::LabelClient;
use label_roller_core::{DeleteSelection, LabelManager, RepositoryScope};
use tracing::instrument;

use crate::errors::Error;

#[cfg(test)]
#[path = "delete_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Delete every label GitHub created with the repository
    #[arg(long)]
    pub defaults: bool,

    /// An optional label name followed by the target, either owner or owner/repo
    #[arg(value_name = "[LABEL] TARGET", num_args = 1..=2, required = true)]
    pub args: Vec<String>,
}

impl DeleteArgs {
    fn selection(&self) -> Result<(DeleteSelection, &str), Error> {
        match self.args.as_slice() {
            [target] => Ok((
                DeleteSelection {
                    label: None,
                    defaults: self.defaults,
                },
                target.as_str(),
            )),
            [label, target] => Ok((
                DeleteSelection {
                    label: Some(label.clone()),
                    defaults: self.defaults,
                },
                target.as_str(),
            )),
            _ => Err(Error::InvalidArguments(
                "expected [LABEL] TARGET".to_string(),
            )),
        }
    }
}

/// Deletes the selected labels from every repository in the target.
#[instrument(skip(manager, out))]
pub async fn execute<C, W>(
    manager: &LabelManager<C>,
    args: &DeleteArgs,
    mut out: W,
) -> Result<(), Error>
where
    C: LabelClient,
    W: Write,
{
    let (selection, target) = args.selection()?;
    let scope = RepositoryScope::parse(target)?;

    let reports = manager.delete(&scope, &selection).await?;

    for report in reports {
        let line = if report.deleted.is_empty() {
            format!("{}/{}: {}", scope.owner(), report.repo, "nothing to delete".dimmed())
        } else {
            format!(
                "{} {}/{}: deleted {}",
                "✓".green(),
                scope.owner(),
                report.repo,
                report
                    .deleted
                    .iter()
                    .map(|name| format!("'{}'", name))
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };
        writeln!(out, "{}", line).map_err(Error::WriteOutput)?;
    }

    Ok(())
}
