//! Label domain types.
//!
//! This module contains the types exchanged with the GitHub issue label endpoints:
//! the label as GitHub reports it, and the request bodies used to create and edit one.

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;

/// A label as it currently exists on a repository.
///
/// `is_default` is set by GitHub for the labels it seeds on repository
/// creation ("bug", "enhancement", ...). GitHub reports a missing
/// description as `null`, which is read as an empty string.
///
/// # Examples
///
/// ```
/// use github_client::LiveLabel;
///
/// let label: LiveLabel = serde_json::from_str(
///     r#"{"name": "bug", "color": "d73a4a", "description": null, "default": true}"#,
/// ).unwrap();
///
/// assert_eq!(label.description, "");
/// assert!(label.is_default);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveLabel {
    /// The name of the label
    pub name: String,

    /// The label description, empty when GitHub has none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,

    /// Hex color code without the leading `#`
    pub color: String,

    /// Whether GitHub created this label when the repository was created
    #[serde(rename = "default", default)]
    pub is_default: bool,
}

/// Request body for `POST /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelPayload {
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Request body for `PATCH /repos/{owner}/{repo}/labels/{name}`.
///
/// Only the fields that are set are sent, so a rename can change the name
/// while leaving color and description untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LabelUpdate {
    /// An update that only renames the label.
    pub fn rename(new_name: impl Into<String>) -> Self {
        Self {
            new_name: Some(new_name.into()),
            ..Default::default()
        }
    }
}

impl From<LabelPayload> for LabelUpdate {
    fn from(value: LabelPayload) -> Self {
        Self {
            new_name: Some(value.name),
            description: Some(value.description),
            color: Some(value.color),
        }
    }
}

/// Result of asking GitHub to create a label.
///
/// A label that already exists is not an error at this level: the caller
/// decides whether to turn it into an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateLabelOutcome {
    /// The label was created.
    Created,

    /// GitHub rejected the request because a label with that name exists.
    AlreadyExists,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
