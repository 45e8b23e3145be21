//! Error types for label synchronization.
//!
//! Two families of failure exist. A [`ConfigurationError`] is found before any
//! label is changed and is never retried. A remote failure
//! ([`LabelSyncError::Remote`]) aborts the run on the spot. Operations that were
//! already applied stay applied.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Problems with the declared label set or the command input.
///
/// These are detected before any remote call that would mutate a repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Two labels are named '{name}'")]
    DuplicateName { name: String },

    #[error("Labels '{first}' and '{second}' are both renamed from '{from}'")]
    DuplicateFrom {
        from: String,
        first: String,
        second: String,
    },

    #[error("Label '{renaming}' is renamed from '{named}', but '{named}' is also declared as a label of its own")]
    RenameConflict { named: String, renaming: String },

    #[error("Invalid label input: {reason}")]
    InvalidInput { reason: String },

    #[error("Invalid target '{scope}': {reason}")]
    InvalidScope { scope: String, reason: String },

    #[error("Nothing to delete: provide a label name, request default labels, or both")]
    EmptyDeleteSelection,
}

/// Errors raised while planning or applying label changes.
#[derive(Error, Debug)]
pub enum LabelSyncError {
    /// The declared labels or the command input are unusable.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A call to GitHub failed. The run stops here.
    #[error("{operation} failed: {source}")]
    Remote {
        operation: String,
        #[source]
        source: github_client::Error,
    },

    /// Bookkeeping of the reconciler did not add up.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabelSyncError {
    /// Builds a closure that wraps a client error with the operation that produced it.
    pub(crate) fn remote(
        operation: impl Into<String>,
    ) -> impl FnOnce(github_client::Error) -> LabelSyncError {
        let operation = operation.into();
        move |source| LabelSyncError::Remote { operation, source }
    }
}

/// Result type alias for label synchronization operations.
pub type LabelSyncResult<T> = Result<T, LabelSyncError>;
