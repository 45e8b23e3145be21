use std::io;

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the LabelRoller CLI application.
///
/// This enum represents all possible error conditions that can arise during
/// CLI operations, including authentication failures, configuration issues,
/// I/O problems and failures reported by the label synchronization itself.
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error occurred while resolving or storing the token.
    ///
    /// This error is returned when no token is available, or when the token
    /// cannot be read from or written to the system keyring.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration error occurred while loading or parsing configuration.
    ///
    /// This error is returned when there are issues with the configuration file,
    /// such as a missing file, invalid TOML or unusable values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The GitHub client could not be created.
    #[error(transparent)]
    GitHub(#[from] github_client::Error),

    /// Invalid command-line arguments were provided.
    ///
    /// This error is returned when the user provides invalid or incompatible
    /// command-line arguments that cannot be processed.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Failed to load the label file.
    ///
    /// This error wraps underlying I/O errors that occur when reading the
    /// labels, such as permission issues or missing files.
    #[error("Failed to load file: {0}")]
    LoadFile(io::Error),

    /// Failed to flush the standard output buffer.
    #[error("Failed to flush the std out buffer.")]
    StdOutFlushFailed,

    /// Planning or applying label changes failed.
    #[error(transparent)]
    Sync(#[from] label_roller_core::LabelSyncError),

    /// Failed to write command output.
    #[error("Failed to write output: {0}")]
    WriteOutput(io::Error),
}

impl From<label_roller_core::ConfigurationError> for Error {
    fn from(value: label_roller_core::ConfigurationError) -> Self {
        Error::Sync(value.into())
    }
}
