//! Label management operations for repositories.
//!
//! This module provides the [`LabelManager`] component, which fetches live
//! labels, plans changes with [`plan`](crate::reconciler::plan) and applies
//! them through a [`LabelClient`]. Repositories are processed one at a time and
//! the first failure stops the run. Changes already applied are not undone.

use github_client::{CreateLabelOutcome, LabelClient, LabelUpdate};
use tracing::{debug, info, instrument, warn};

use crate::errors::{ConfigurationError, LabelSyncError, LabelSyncResult};
use crate::label_spec::{export_labels, DesiredSet, LabelSpec};
use crate::reconciler::{plan, Operation, Plan};
use crate::scope::RepositoryScope;

#[cfg(test)]
#[path = "label_manager_tests.rs"]
mod tests;

/// Options for [`LabelManager::push`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Leave unmatched GitHub default labels in place.
    pub keep_defaults: bool,

    /// Compute plans without applying them.
    pub dry_run: bool,
}

/// Which labels [`LabelManager::delete`] removes from each repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteSelection {
    /// A label to delete by name.
    pub label: Option<String>,

    /// Delete every label GitHub flags as a default label.
    pub defaults: bool,
}

impl DeleteSelection {
    fn matches(&self, name: &str, is_default: bool) -> bool {
        (self.defaults && is_default) || self.label.as_deref() == Some(name)
    }
}

/// Outcome of pushing labels to one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReport {
    pub owner: String,
    pub repo: String,

    /// The operations computed for this repository.
    pub plan: Plan,

    /// What was applied, `None` for a dry run.
    pub applied: Option<ApplyLabelsResult>,
}

/// Labels removed from one repository by [`LabelManager::delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteReport {
    pub repo: String,
    pub deleted: Vec<String>,
}

/// Manages label operations for repositories.
///
/// # Examples
///
/// ```rust,no_run
/// use github_client::GitHubClient;
/// use label_roller_core::{DesiredSet, LabelManager, LabelSpec, PushOptions, RepositoryScope};
///
/// # async fn example(github_client: GitHubClient) -> Result<(), Box<dyn std::error::Error>> {
/// let manager = LabelManager::new(github_client);
///
/// let desired = DesiredSet::new(vec![
///     LabelSpec::new("type: bug", "Something isn't working", "d73a4a").renamed_from("bug"),
/// ])?;
/// let scope = RepositoryScope::parse("my-org/my-repo")?;
///
/// let reports = manager
///     .push(&scope, &desired, PushOptions::default(), |_| {})
///     .await?;
/// for report in reports {
///     if let Some(applied) = report.applied {
///         println!("Created: {}, Updated: {}", applied.created, applied.updated);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct LabelManager<C: LabelClient> {
    /// GitHub client for API operations
    github_client: C,
}

impl<C: LabelClient> LabelManager<C> {
    /// Creates a new LabelManager.
    pub fn new(github_client: C) -> Self {
        Self { github_client }
    }

    /// Names of the repositories a command applies to.
    ///
    /// For an owner scope every repository of the organization or user is
    /// listed. Archived repositories are skipped since their labels cannot be
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns `LabelSyncError::Remote` if the repositories cannot be listed.
    pub async fn resolve_repositories(&self, scope: &RepositoryScope) -> LabelSyncResult<Vec<String>> {
        let owner = match scope {
            RepositoryScope::Repository { repo, .. } => return Ok(vec![repo.clone()]),
            RepositoryScope::Owner { owner } => owner,
        };

        let repositories = self
            .github_client
            .list_repositories(owner)
            .await
            .map_err(LabelSyncError::remote(format!(
                "Listing repositories of '{}'",
                owner
            )))?;

        let names: Vec<String> = repositories
            .into_iter()
            .filter(|repository| {
                if repository.is_archived() {
                    info!(
                        repository = repository.full_name(),
                        "Skipping archived repository"
                    );
                }
                !repository.is_archived()
            })
            .map(|repository| repository.name().to_string())
            .collect();

        info!(owner = owner, count = names.len(), "Resolved repositories");
        Ok(names)
    }

    /// Reads the labels of one repository as specs, in the order GitHub
    /// returns them.
    ///
    /// # Errors
    ///
    /// Returns `LabelSyncError::Remote` if the labels cannot be listed.
    pub async fn pull(&self, owner: &str, repo: &str) -> LabelSyncResult<Vec<LabelSpec>> {
        let labels = self
            .github_client
            .list_labels(owner, repo)
            .await
            .map_err(LabelSyncError::remote(format!(
                "Listing labels of {}/{}",
                owner, repo
            )))?;

        Ok(export_labels(&labels))
    }

    /// Pushes `desired` to every repository in `scope`.
    ///
    /// Each repository is fetched, planned and applied before the next one is
    /// touched. `on_report` is called as soon as a repository is done, so
    /// callers can show progress that survives a later failure.
    ///
    /// # Errors
    ///
    /// - `LabelSyncError::Configuration` for a name and rename conflict
    /// - `LabelSyncError::Remote` for the first failed remote call
    ///
    /// Either stops the run. Repositories already processed keep their changes.
    pub async fn push<F>(
        &self,
        scope: &RepositoryScope,
        desired: &DesiredSet,
        options: PushOptions,
        mut on_report: F,
    ) -> LabelSyncResult<Vec<RepositoryReport>>
    where
        F: FnMut(&RepositoryReport),
    {
        let owner = scope.owner();
        let repositories = self.resolve_repositories(scope).await?;

        let mut reports = Vec::with_capacity(repositories.len());
        for repo in repositories {
            let report = self.push_repository(owner, &repo, desired, options).await?;
            on_report(&report);
            reports.push(report);
        }

        Ok(reports)
    }

    #[instrument(skip(self, desired), fields(labels = desired.len()))]
    async fn push_repository(
        &self,
        owner: &str,
        repo: &str,
        desired: &DesiredSet,
        options: PushOptions,
    ) -> LabelSyncResult<RepositoryReport> {
        let live = self
            .github_client
            .list_labels(owner, repo)
            .await
            .map_err(LabelSyncError::remote(format!(
                "Listing labels of {}/{}",
                owner, repo
            )))?;

        let plan = plan(desired, &live, options.keep_defaults)?;
        info!(
            edits = plan.edits(),
            creates = plan.creates(),
            deletes = plan.deletes(),
            unchanged = plan.unchanged(),
            "Planned label changes"
        );

        let applied = if options.dry_run {
            None
        } else {
            Some(self.apply_plan(owner, repo, &plan).await?)
        };

        Ok(RepositoryReport {
            owner: owner.to_string(),
            repo: repo.to_string(),
            plan,
            applied,
        })
    }

    /// Applies a plan's operations in order.
    ///
    /// A create that GitHub rejects because the label already exists is
    /// retried once as an edit of that label with the same spec.
    ///
    /// # Errors
    ///
    /// Returns `LabelSyncError::Remote` for the first operation that fails.
    /// Earlier operations stay applied.
    pub async fn apply_plan(
        &self,
        owner: &str,
        repo: &str,
        plan: &Plan,
    ) -> LabelSyncResult<ApplyLabelsResult> {
        let mut result = ApplyLabelsResult::new();
        result.unchanged = plan.unchanged();

        for operation in plan.operations() {
            debug!(owner = owner, repo = repo, "Applying: {}", operation);

            match operation {
                Operation::Edit { current_name, spec } => {
                    self.edit(owner, repo, current_name, spec).await?;
                    result.updated += 1;
                }
                Operation::Create(spec) => {
                    let outcome = self
                        .github_client
                        .create_label(owner, repo, &spec.payload())
                        .await
                        .map_err(LabelSyncError::remote(format!(
                            "Creating label '{}' on {}/{}",
                            spec.name, owner, repo
                        )))?;

                    match outcome {
                        CreateLabelOutcome::Created => result.created += 1,
                        CreateLabelOutcome::AlreadyExists => {
                            warn!(
                                label = %spec.name,
                                "Label appeared since it was listed, updating it instead"
                            );
                            self.edit(owner, repo, &spec.name, spec).await?;
                            result.recovered += 1;
                        }
                    }
                }
                Operation::Delete(name) => {
                    self.delete_one(owner, repo, name).await?;
                    result.deleted += 1;
                }
            }
        }

        info!(
            owner = owner,
            repo = repo,
            created = result.created,
            updated = result.updated,
            deleted = result.deleted,
            recovered = result.recovered,
            "Label changes applied"
        );

        Ok(result)
    }

    /// Renames a label on every repository in `scope`, leaving its color and
    /// description untouched.
    ///
    /// Returns the repositories that were processed.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::InvalidInput` if either name is empty
    /// - `LabelSyncError::Remote` for the first failed call, including a
    ///   repository that has no label named `old_name`
    pub async fn rename(
        &self,
        scope: &RepositoryScope,
        old_name: &str,
        new_name: &str,
    ) -> LabelSyncResult<Vec<String>> {
        if old_name.is_empty() || new_name.is_empty() {
            return Err(ConfigurationError::InvalidInput {
                reason: "label names must not be empty".to_string(),
            }
            .into());
        }

        let owner = scope.owner();
        let repositories = self.resolve_repositories(scope).await?;

        for repo in &repositories {
            info!(repo = %repo, from = old_name, to = new_name, "Renaming label");
            self.github_client
                .edit_label(owner, repo, old_name, &LabelUpdate::rename(new_name))
                .await
                .map_err(LabelSyncError::remote(format!(
                    "Renaming label '{}' on {}/{}",
                    old_name, owner, repo
                )))?;
        }

        Ok(repositories)
    }

    /// Deletes the selected labels from every repository in `scope`.
    ///
    /// A named label that does not exist on a repository is not an error.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::EmptyDeleteSelection` if nothing is selected
    /// - `LabelSyncError::Remote` for the first failed call
    pub async fn delete(
        &self,
        scope: &RepositoryScope,
        selection: &DeleteSelection,
    ) -> LabelSyncResult<Vec<DeleteReport>> {
        if selection.label.is_none() && !selection.defaults {
            return Err(ConfigurationError::EmptyDeleteSelection.into());
        }

        let owner = scope.owner();
        let repositories = self.resolve_repositories(scope).await?;

        let mut reports = Vec::with_capacity(repositories.len());
        for repo in repositories {
            let labels = self
                .github_client
                .list_labels(owner, &repo)
                .await
                .map_err(LabelSyncError::remote(format!(
                    "Listing labels of {}/{}",
                    owner, repo
                )))?;

            let mut deleted = Vec::new();
            for label in labels
                .iter()
                .filter(|label| selection.matches(&label.name, label.is_default))
            {
                self.delete_one(owner, &repo, &label.name).await?;
                deleted.push(label.name.clone());
            }

            info!(repo = %repo, count = deleted.len(), "Deleted labels");
            reports.push(DeleteReport { repo, deleted });
        }

        Ok(reports)
    }

    async fn edit(
        &self,
        owner: &str,
        repo: &str,
        current_name: &str,
        spec: &LabelSpec,
    ) -> LabelSyncResult<()> {
        self.github_client
            .edit_label(owner, repo, current_name, &LabelUpdate::from(spec.payload()))
            .await
            .map_err(LabelSyncError::remote(format!(
                "Updating label '{}' on {}/{}",
                current_name, owner, repo
            )))
    }

    async fn delete_one(&self, owner: &str, repo: &str, name: &str) -> LabelSyncResult<()> {
        self.github_client
            .delete_label(owner, repo, name)
            .await
            .map_err(LabelSyncError::remote(format!(
                "Deleting label '{}' on {}/{}",
                name, owner, repo
            )))
    }
}

/// Result of applying a plan to a repository.
///
/// Contains counters for the different outcomes of label operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyLabelsResult {
    /// Number of labels created
    pub created: usize,

    /// Number of labels updated or renamed
    pub updated: usize,

    /// Number of labels deleted
    pub deleted: usize,

    /// Number of creates that found the label already present and updated it
    pub recovered: usize,

    /// Number of labels that already existed with correct configuration
    pub unchanged: usize,
}

impl ApplyLabelsResult {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            created: 0,
            updated: 0,
            deleted: 0,
            recovered: 0,
            unchanged: 0,
        }
    }

    /// Returns true if any label was created, updated or deleted.
    pub fn has_changes(&self) -> bool {
        self.created > 0 || self.updated > 0 || self.deleted > 0 || self.recovered > 0
    }
}

impl Default for ApplyLabelsResult {
    fn default() -> Self {
        Self::new()
    }
}
