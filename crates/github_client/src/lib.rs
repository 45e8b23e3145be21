//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides the label and repository operations used to keep a
//! declared label set in sync with GitHub repositories. Requests are made with a
//! personal access token. Each request is bounded by a timeout and is never retried.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Result as OctocrabResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod label;
pub use label::{CreateLabelOutcome, LabelPayload, LabelUpdate, LiveLabel};

pub mod repository;
pub use repository::Repository;

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of items requested per page when listing.
const PAGE_SIZE: usize = 100;

/// Operations of the remote label service.
///
/// This is the seam between the reconciliation logic and GitHub. Every method
/// is a single, possibly failing remote call (list methods drain all pages
/// before returning).
#[async_trait]
pub trait LabelClient: Send + Sync {
    /// Lists every label on a repository.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the repository does not exist, or any other
    /// [`Error`] when a page cannot be fetched.
    async fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<LiveLabel>, Error>;

    /// Lists the repositories of an owner.
    ///
    /// The owner is first looked up as an organization. When GitHub reports no
    /// such organization the owner is treated as a user account.
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>, Error>;

    /// Creates a label.
    ///
    /// A label with the same name that already exists is reported as
    /// [`CreateLabelOutcome::AlreadyExists`], not as an error.
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        payload: &LabelPayload,
    ) -> Result<CreateLabelOutcome, Error>;

    /// Edits the label currently named `current_name`.
    async fn edit_label(
        &self,
        owner: &str,
        repo: &str,
        current_name: &str,
        update: &LabelUpdate,
    ) -> Result<(), Error>;

    /// Deletes a label.
    async fn delete_label(&self, owner: &str, repo: &str, name: &str) -> Result<(), Error>;
}

/// A client for the GitHub label and repository endpoints.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
    timeout: Duration,
}

#[derive(Serialize)]
struct PageParams {
    per_page: usize,
    page: u32,
}

impl GitHubClient {
    /// Wraps an existing `Octocrab` instance.
    ///
    /// # Arguments
    ///
    /// * `client` - The octocrab client used for all requests.
    /// * `timeout` - Upper bound for every individual request.
    pub fn new(client: Octocrab, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Creates a client authenticated with a personal access token.
    ///
    /// # Arguments
    ///
    /// * `token` - The GitHub personal access token.
    /// * `api_url` - Base URL of the REST API, e.g. [`DEFAULT_API_URL`] or
    ///   `https://ghe.example.com/api/v3` for GitHub Enterprise.
    /// * `timeout` - Upper bound for every individual request.
    ///
    /// # Errors
    /// Returns an `Error::AuthError` if the token is empty, the URL is invalid,
    /// or the client cannot be built.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use github_client::{GitHubClient, DEFAULT_API_URL, DEFAULT_TIMEOUT};
    ///
    /// let client = GitHubClient::from_token("ghp_example", DEFAULT_API_URL, DEFAULT_TIMEOUT)?;
    /// # Ok::<(), github_client::Error>(())
    /// ```
    #[instrument(skip(token))]
    pub fn from_token(token: &str, api_url: &str, timeout: Duration) -> Result<Self, Error> {
        if token.trim().is_empty() {
            return Err(Error::AuthError("The GitHub token is empty".to_string()));
        }

        let parsed = url::Url::parse(api_url).map_err(|e| {
            Error::AuthError(format!("Invalid GitHub API URL '{}': {}", api_url, e))
        })?;

        let octocrab = Octocrab::builder()
            .base_uri(parsed.as_str().trim_end_matches('/'))
            .map_err(|e| {
                error!(api_url = api_url, error = %e, "Failed to use API URL as base URI");
                Error::AuthError(format!("Invalid GitHub API URL '{}'", api_url))
            })?
            .add_retry_config(RetryConfig::None)
            .personal_token(token.to_string())
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build Octocrab client with token credentials");
                Error::AuthError("Failed to build the GitHub client".to_string())
            })?;

        info!(
            api_url = api_url,
            timeout_secs = timeout.as_secs(),
            "Created GitHub token client"
        );

        Ok(Self::new(octocrab, timeout))
    }

    async fn with_timeout<F>(&self, operation: &str, future: F) -> Result<F::Output, Error>
    where
        F: Future,
    {
        tokio::time::timeout(self.timeout, future)
            .await
            .map_err(|_| {
                error!(
                    operation = operation,
                    timeout_secs = self.timeout.as_secs(),
                    "Request timed out"
                );
                Error::Timeout {
                    operation: operation.to_string(),
                    seconds: self.timeout.as_secs(),
                }
            })
    }

    /// Fetches every page of a list endpoint.
    ///
    /// Paging stops at the first page holding fewer than [`PAGE_SIZE`] items.
    async fn get_all_pages<T>(&self, route: &str, operation: &str) -> Result<Vec<T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let params = PageParams {
                per_page: PAGE_SIZE,
                page,
            };
            let response: OctocrabResult<Vec<T>> = self
                .with_timeout(operation, self.client.get(route, Some(&params)))
                .await?;
            let batch = response.map_err(|e| map_octocrab_error(operation, e))?;

            let received = batch.len();
            items.extend(batch);
            debug!(route = route, page = page, received = received, "Fetched page");

            if received < PAGE_SIZE {
                return Ok(items);
            }
            page += 1;
        }
    }
}

#[async_trait]
impl LabelClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo))]
    async fn list_labels(&self, owner: &str, repo: &str) -> Result<Vec<LiveLabel>, Error> {
        let route = format!("/repos/{}/{}/labels", owner, repo);
        let operation = format!("List labels for {}/{}", owner, repo);

        let labels: Vec<LiveLabel> = self.get_all_pages(&route, &operation).await?;

        info!(
            owner = owner,
            repo = repo,
            count = labels.len(),
            "Retrieved repository labels"
        );
        Ok(labels)
    }

    #[instrument(skip(self), fields(owner = %owner))]
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>, Error> {
        let operation = format!("Look up organization {}", owner);
        let probe: OctocrabResult<serde_json::Value> = self
            .with_timeout(
                &operation,
                self.client.get(format!("/orgs/{}", owner), None::<&()>),
            )
            .await?;

        let route = match probe.map_err(classify_octocrab_error) {
            Ok(_) => {
                info!(owner = owner, "Detected owner as organization");
                format!("/orgs/{}/repos", owner)
            }
            Err(Error::NotFound) => {
                info!(owner = owner, "Owner is not an organization; listing as user");
                format!("/users/{}/repos", owner)
            }
            Err(e) => {
                error!(owner = owner, error = %e, "Failed to look up organization");
                return Err(e);
            }
        };

        let operation = format!("List repositories for {}", owner);
        let repositories: Vec<Repository> = self.get_all_pages(&route, &operation).await?;

        info!(
            owner = owner,
            count = repositories.len(),
            "Retrieved repositories"
        );
        Ok(repositories)
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, label = %payload.name))]
    async fn create_label(
        &self,
        owner: &str,
        repo: &str,
        payload: &LabelPayload,
    ) -> Result<CreateLabelOutcome, Error> {
        let route = format!("/repos/{}/{}/labels", owner, repo);
        let operation = format!("Create label '{}' on {}/{}", payload.name, owner, repo);

        let response: OctocrabResult<LiveLabel> = self
            .with_timeout(&operation, self.client.post(route, Some(payload)))
            .await?;

        match response {
            Ok(_) => {
                debug!(label = payload.name, "Label created");
                Ok(CreateLabelOutcome::Created)
            }
            Err(e) if is_already_exists(&e) => {
                debug!(label = payload.name, "Label already exists");
                Ok(CreateLabelOutcome::AlreadyExists)
            }
            Err(e) => Err(map_octocrab_error(&operation, e)),
        }
    }

    #[instrument(skip(self, update), fields(owner = %owner, repo = %repo, label = %current_name))]
    async fn edit_label(
        &self,
        owner: &str,
        repo: &str,
        current_name: &str,
        update: &LabelUpdate,
    ) -> Result<(), Error> {
        let route = format!(
            "/repos/{}/{}/labels/{}",
            owner,
            repo,
            urlencoding::encode(current_name)
        );
        let operation = format!("Edit label '{}' on {}/{}", current_name, owner, repo);

        let response: OctocrabResult<LiveLabel> = self
            .with_timeout(&operation, self.client.patch(route, Some(update)))
            .await?;

        response
            .map(|_| debug!(label = current_name, "Label edited"))
            .map_err(|e| map_octocrab_error(&operation, e))
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, label = %name))]
    async fn delete_label(&self, owner: &str, repo: &str, name: &str) -> Result<(), Error> {
        let route = format!(
            "/repos/{}/{}/labels/{}",
            owner,
            repo,
            urlencoding::encode(name)
        );
        let operation = format!("Delete label '{}' on {}/{}", name, owner, repo);

        let response = self
            .with_timeout(&operation, async {
                let response = self.client._delete(route, None::<&()>).await?;
                octocrab::map_github_error(response).await?;
                Ok::<(), octocrab::Error>(())
            })
            .await?;

        response
            .map(|_| debug!(label = name, "Label deleted"))
            .map_err(|e| map_octocrab_error(&operation, e))
    }
}

/// Returns true when GitHub rejected a create because the label already exists.
fn is_already_exists(e: &octocrab::Error) -> bool {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            source.status_code.as_u16() == 422
                && source.errors.as_ref().is_some_and(|errors| {
                    errors
                        .iter()
                        .any(|err| err.get("code").and_then(|c| c.as_str()) == Some("already_exists"))
                })
        }
        _ => false,
    }
}

/// Maps an octocrab error onto the crate error without logging it.
fn classify_octocrab_error(e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            let status = source.status_code.as_u16();
            match status {
                401 => Error::AuthError(source.message.clone()),
                404 => Error::NotFound,
                403 | 429 if source.message.to_lowercase().contains("rate limit") => {
                    Error::RateLimitExceeded
                }
                _ => Error::ApiError {
                    status,
                    message: source.message.clone(),
                },
            }
        }
        octocrab::Error::Json { .. } | octocrab::Error::Serde { .. } => Error::InvalidResponse,
        other => Error::Transport(other.to_string()),
    }
}

fn map_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    log_octocrab_error(message, &e);
    classify_octocrab_error(e)
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, .. } => error!(
            error_message = source.message,
            status = source.status_code.as_u16(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, .. } => error!(
            error_message = source.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        _ => error!(error_message = e.to_string(), "{}", message),
    };
}
