//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when talking to the GitHub
//! label and repository endpoints. Every variant is fatal for the run that produced
//! it; the client never retries.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// The "label already exists" answer from the create endpoint is deliberately
/// not part of this enum. It is reported as
/// [`CreateLabelOutcome::AlreadyExists`](crate::CreateLabelOutcome) so callers can
/// fall back to an edit.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_labels("my-org", "my-repo").await {
///     Ok(labels) => println!("{} labels", labels.len()),
///     Err(Error::NotFound) => eprintln!("Repository does not exist"),
///     Err(Error::Timeout { seconds, .. }) => eprintln!("Gave up after {seconds}s"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status that has no more specific variant.
    ///
    /// Parameters: (HTTP status code, message returned by GitHub)
    #[error("API request failed with status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Authentication or GitHub client initialization failure.
    ///
    /// This error occurs when:
    /// - The token is missing, invalid or expired
    /// - The configured API URL cannot be used as a base URI
    /// - The underlying HTTP client cannot be built
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found.
    ///
    /// This error occurs when a GitHub API request returns a 404 status code,
    /// indicating that the requested repository, organization or label
    /// does not exist or is not accessible with the current token.
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded.
    ///
    /// The client does not back off or retry; the run is aborted.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// A single remote call did not complete within the configured timeout.
    #[error("{operation} timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },

    /// The request never produced an HTTP response (connection, TLS, URI errors).
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),
}
