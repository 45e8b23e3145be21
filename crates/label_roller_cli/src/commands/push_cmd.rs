//! Push command: synchronize a label file onto one or more repositories.
//!
//! The labels are read from standard input unless `--file` is given. The
//! whole input is decoded and validated before GitHub is contacted, so a
//! typo or a duplicate label never results in a partial push.
//!
//! # Examples
//!
//! ```bash
//! # Push to every repository of an organization
//! label-roller push my-org < labels.json
//!
//! # Preview the changes for one repository
//! label-roller push my-org/my-repo --file labels.json --dry-run
//! ```

use std::{
    fs::File,
    io::{self, BufReader, Read, Write},
    path::PathBuf,
};

use clap::Args;
use colored::Colorize;
use github_client::LabelClient;
use label_roller_core::{DesiredSet, LabelManager, PushOptions, RepositoryReport, RepositoryScope};
use tracing::{debug, instrument};

use crate::errors::Error;

#[cfg(test)]
#[path = "push_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug)]
pub struct PushArgs {
    /// Target, either owner (every repository) or owner/repo
    pub target: String,

    /// Keep GitHub default labels that are not in the label file
    #[arg(long)]
    pub keep_defaults: bool,

    /// Show the planned changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Read the labels from this file instead of standard input
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

impl PushArgs {
    fn options(&self) -> PushOptions {
        PushOptions {
            keep_defaults: self.keep_defaults,
            dry_run: self.dry_run,
        }
    }
}

/// Reads and validates the desired labels from `--file` or from `input`.
///
/// # Errors
///
/// Returns `Error::LoadFile` if the file cannot be opened and a configuration
/// error for invalid or duplicate labels.
pub fn read_desired<R: Read>(args: &PushArgs, input: R) -> Result<DesiredSet, Error> {
    let desired = match &args.file {
        Some(path) => {
            debug!("Reading labels from {:?}", path);
            let file = File::open(path).map_err(Error::LoadFile)?;
            DesiredSet::from_json_reader(BufReader::new(file))?
        }
        None => {
            debug!("Reading labels from standard input");
            DesiredSet::from_json_reader(input)?
        }
    };

    debug!(count = desired.len(), "Read desired labels");
    Ok(desired)
}

/// Pushes the desired labels and reports each repository as it completes.
#[instrument(skip(manager, input, out))]
pub async fn execute<C, R, W>(
    manager: &LabelManager<C>,
    args: &PushArgs,
    input: R,
    mut out: W,
) -> Result<(), Error>
where
    C: LabelClient,
    R: Read,
    W: Write,
{
    let scope = RepositoryScope::parse(&args.target)?;
    let desired = read_desired(args, input)?;

    let mut write_error: Option<io::Error> = None;
    manager
        .push(&scope, &desired, args.options(), |report| {
            if write_error.is_none() {
                write_error = out.write_all(format_report(report).as_bytes()).err();
            }
        })
        .await?;

    match write_error {
        Some(e) => Err(Error::WriteOutput(e)),
        None => Ok(()),
    }
}

/// Renders one repository's outcome for the terminal.
pub fn format_report(report: &RepositoryReport) -> String {
    let name = format!("{}/{}", report.owner, report.repo);

    let Some(applied) = &report.applied else {
        let mut output = format!("{} {}\n", name.bold(), "(dry run)".dimmed());
        if report.plan.is_empty() {
            output.push_str(&format!("  {}\n", "no changes".dimmed()));
        }
        for operation in report.plan.operations() {
            output.push_str(&format!("  {}\n", operation));
        }
        return output;
    };

    if !applied.has_changes() {
        return format!(
            "{} {}: up to date ({} unchanged)\n",
            "✓".green(),
            name.bold(),
            applied.unchanged
        );
    }

    let mut output = format!(
        "{} {}: {} created, {} updated, {} deleted",
        "✓".green(),
        name.bold(),
        applied.created,
        applied.updated,
        applied.deleted
    );
    if applied.recovered > 0 {
        output.push_str(&format!(
            ", {} already existed and were updated",
            applied.recovered
        ));
    }
    output.push('\n');
    output
}
