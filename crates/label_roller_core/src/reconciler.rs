//! Label reconciliation.
//!
//! [`plan`] compares a [`DesiredSet`] with the labels currently on a
//! repository and produces the ordered list of operations that turns the
//! latter into the former. Nothing in this module talks to GitHub.
//!
//! Each live label is classified with two lookups:
//!
//! 1. its name is the name of a desired spec: direct match
//! 2. its name is the `from` of a desired spec: rename
//! 3. neither: unmatched, deleted only when it is a GitHub default label
//!    and default labels are not being kept
//!
//! Edits and deletes come first in live-label order, then creates in
//! declaration order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use github_client::LiveLabel;
use tracing::{debug, warn};

use crate::errors::{ConfigurationError, LabelSyncError, LabelSyncResult};
use crate::label_spec::{DesiredSet, LabelSpec};

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;

/// A single change to a repository's labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Update the live label `current_name` so it matches `spec`, renaming it
    /// when the names differ.
    Edit {
        current_name: String,
        spec: LabelSpec,
    },

    /// Create a label that has no live counterpart.
    Create(LabelSpec),

    /// Delete a live label.
    Delete(String),
}

impl Operation {
    /// The label name this operation leaves behind, or removes for a delete.
    pub fn target_name(&self) -> &str {
        match self {
            Operation::Edit { spec, .. } | Operation::Create(spec) => &spec.name,
            Operation::Delete(name) => name,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Edit { current_name, spec } if *current_name != spec.name => {
                write!(f, "rename '{}' to '{}'", current_name, spec.name)
            }
            Operation::Edit { current_name, .. } => write!(f, "update '{}'", current_name),
            Operation::Create(spec) => write!(f, "create '{}'", spec.name),
            Operation::Delete(name) => write!(f, "delete '{}'", name),
        }
    }
}

/// The ordered operations for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    operations: Vec<Operation>,
    unchanged: usize,
}

impl Plan {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Desired labels that already exist exactly as declared.
    pub fn unchanged(&self) -> usize {
        self.unchanged
    }

    pub fn edits(&self) -> usize {
        self.count(|op| matches!(op, Operation::Edit { .. }))
    }

    pub fn creates(&self) -> usize {
        self.count(|op| matches!(op, Operation::Create(_)))
    }

    pub fn deletes(&self) -> usize {
        self.count(|op| matches!(op, Operation::Delete(_)))
    }

    fn count(&self, predicate: impl Fn(&Operation) -> bool) -> usize {
        self.operations.iter().filter(|op| predicate(op)).count()
    }
}

/// Computes the operations that bring `live` in line with `desired`.
///
/// With `keep_defaults` set, unmatched live labels are never deleted. A
/// default label that is the `from` of a desired spec is still renamed.
///
/// # Errors
///
/// - `ConfigurationError::RenameConflict` when a live label is both the name
///   of one spec and the rename source of another. Checked before any
///   operation is produced.
/// - `LabelSyncError::Internal` when the produced operations would not leave
///   exactly the desired names behind.
pub fn plan(desired: &DesiredSet, live: &[LiveLabel], keep_defaults: bool) -> LabelSyncResult<Plan> {
    check_conflicts(desired, live)?;

    let live_names: HashSet<&str> = live.iter().map(|label| label.name.as_str()).collect();
    let mut remaining: HashSet<&str> = desired.specs().iter().map(|s| s.name.as_str()).collect();
    let mut satisfied: HashSet<&str> = HashSet::with_capacity(desired.len());
    let mut operations = Vec::new();
    let mut unchanged = 0;

    for label in live {
        let Some(spec) = resolve(desired, &live_names, label) else {
            if keep_defaults {
                debug!(label = %label.name, "Keeping unmatched label");
            } else if label.is_default {
                operations.push(Operation::Delete(label.name.clone()));
            }
            continue;
        };

        if !remaining.remove(spec.name.as_str()) {
            return Err(LabelSyncError::Internal(format!(
                "label '{}' is matched by more than one live label",
                spec.name
            )));
        }
        satisfied.insert(spec.name.as_str());

        if spec.is_satisfied_by(label) {
            unchanged += 1;
        } else {
            operations.push(Operation::Edit {
                current_name: label.name.clone(),
                spec: spec.clone(),
            });
        }
    }

    for spec in desired.specs() {
        if remaining.remove(spec.name.as_str()) {
            satisfied.insert(spec.name.as_str());
            operations.push(Operation::Create(spec.clone()));
        }
    }

    let missing: Vec<&str> = desired
        .specs()
        .iter()
        .map(|s| s.name.as_str())
        .filter(|name| !satisfied.contains(name))
        .collect();
    if !remaining.is_empty() || !missing.is_empty() {
        return Err(LabelSyncError::Internal(format!(
            "plan leaves desired labels unsatisfied: {}",
            missing.join(", ")
        )));
    }

    Ok(Plan {
        operations,
        unchanged,
    })
}

fn check_conflicts(desired: &DesiredSet, live: &[LiveLabel]) -> Result<(), ConfigurationError> {
    let conflicts: HashMap<&str, &LabelSpec> = desired
        .conflicting_sources()
        .into_iter()
        .map(|(named, renaming)| (named.name.as_str(), renaming))
        .collect();

    match live.iter().find_map(|label| {
        conflicts
            .get(label.name.as_str())
            .map(|renaming| (label, renaming))
    }) {
        Some((label, renaming)) => Err(ConfigurationError::RenameConflict {
            named: label.name.clone(),
            renaming: renaming.name.clone(),
        }),
        None => Ok(()),
    }
}

fn resolve<'a>(
    desired: &'a DesiredSet,
    live_names: &HashSet<&str>,
    label: &LiveLabel,
) -> Option<&'a LabelSpec> {
    if let Some(spec) = desired.by_name(&label.name) {
        return Some(spec);
    }

    let spec = desired.by_from(&label.name)?;
    if live_names.contains(spec.name.as_str()) {
        warn!(
            label = %label.name,
            target = %spec.name,
            "Not renaming label because the target name already exists"
        );
        return None;
    }

    Some(spec)
}
