//! Target scope parsing.
//!
//! Commands act either on one repository (`owner/repo`) or on every
//! repository of an owner (`owner`).

use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;

/// The repositories a command applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RepositoryScope {
    /// Every repository of an organization or user account.
    Owner { owner: String },

    /// A single repository.
    Repository { owner: String, repo: String },
}

impl RepositoryScope {
    /// Parses `owner` or `owner/repo`.
    ///
    /// # Validation Rules
    /// - Owner: 1-39 characters, alphanumeric, hyphens and underscores
    /// - Repository: 1-100 characters, alphanumeric, hyphens, underscores and
    ///   periods, not `.` or `..`
    /// - At most one `/`
    ///
    /// # Errors
    /// Returns `ConfigurationError::InvalidScope` if validation fails
    pub fn parse(input: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidScope {
            scope: input.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = input.split('/');
        let owner = parts.next().unwrap_or_default();
        let repo = parts.next();
        if parts.next().is_some() {
            return Err(invalid("expected 'owner' or 'owner/repo'"));
        }

        if owner.is_empty() {
            return Err(invalid("owner must not be empty"));
        }
        if owner.len() > 39 {
            return Err(invalid("owner must be at most 39 characters"));
        }
        if !owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(invalid(
                "owner must contain only alphanumeric characters, hyphens, or underscores",
            ));
        }

        let Some(repo) = repo else {
            return Ok(Self::Owner {
                owner: owner.to_string(),
            });
        };

        if repo.is_empty() {
            return Err(invalid("repository must not be empty"));
        }
        if repo.len() > 100 {
            return Err(invalid("repository must be at most 100 characters"));
        }
        if repo == "." || repo == ".." {
            return Err(invalid("repository must not be '.' or '..'"));
        }
        if !repo
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(invalid(
                "repository must contain only alphanumeric characters, hyphens, underscores, or periods",
            ));
        }

        Ok(Self::Repository {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Owner { owner } | Self::Repository { owner, .. } => owner,
        }
    }

    /// The repository name, when the scope names one.
    pub fn repository(&self) -> Option<&str> {
        match self {
            Self::Owner { .. } => None,
            Self::Repository { repo, .. } => Some(repo),
        }
    }
}

impl FromStr for RepositoryScope {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepositoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner { owner } => write!(f, "{}", owner),
            Self::Repository { owner, repo } => write!(f, "{}/{}", owner, repo),
        }
    }
}
