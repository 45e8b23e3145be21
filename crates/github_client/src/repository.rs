//! Repository domain types.
//!
//! This module contains the repository summary returned when listing the
//! repositories of an organization or user.

use serde::Deserialize;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// Represents a GitHub repository.
///
/// Only the fields needed to decide whether labels can be pushed to the
/// repository are kept.
///
/// # Examples
///
/// ```rust
/// use github_client::Repository;
///
/// let repo = Repository::new("my-repo".to_string(), "owner/my-repo".to_string(), false, false);
///
/// println!("Repository: {}", repo.full_name());
/// println!("Is archived: {}", repo.is_archived());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// The name of the repository
    name: String,
    /// The full name of the repository (owner/name)
    #[serde(default)]
    full_name: String,
    /// Whether the repository is private
    #[serde(default)]
    private: bool,
    /// Whether the repository is archived (read-only)
    #[serde(default)]
    archived: bool,
}

impl Repository {
    /// Creates a new Repository instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the repository
    /// * `full_name` - The full name including owner (owner/repo)
    /// * `private` - Whether the repository is private
    /// * `archived` - Whether the repository is archived
    pub fn new(name: String, full_name: String, private: bool, archived: bool) -> Self {
        Self {
            name,
            full_name,
            private,
            archived,
        }
    }

    /// Returns the name of the repository (without owner).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the full name of the repository, falling back to the plain name
    /// when GitHub did not report one.
    pub fn full_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    /// Returns whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Returns whether the repository is archived. Labels on archived
    /// repositories cannot be changed.
    pub fn is_archived(&self) -> bool {
        self.archived
    }
}
