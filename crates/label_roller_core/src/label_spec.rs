//! Declared label types.
//!
//! A [`LabelSpec`] is the desired state of one label. A [`DesiredSet`] is the
//! validated collection of specs for one push, and the only way to build one
//! enforces that names and rename sources are unique.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use github_client::{LabelPayload, LiveLabel};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "label_spec_tests.rs"]
mod tests;

/// Desired state of a single label.
///
/// `from` names an existing label that should be turned into this one
/// instead of creating a new label next to it. An empty `from` is the same as
/// none.
///
/// Decoding rejects unknown fields, so a misspelled key in the input fails
/// loudly rather than being ignored.
///
/// # Examples
///
/// ```
/// use label_roller_core::LabelSpec;
///
/// let spec: LabelSpec = serde_json::from_str(
///     r#"{"name": "type: bug", "description": "Broken", "color": "d73a4a", "from": "bug"}"#,
/// ).unwrap();
///
/// assert_eq!(spec.rename_source(), Some("bug"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelSpec {
    /// Label name, unique within a desired set
    pub name: String,

    /// Label description
    #[serde(default)]
    pub description: String,

    /// Hex color code without the leading `#`
    pub color: String,

    /// Name of an existing label to rename into this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl LabelSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color: color.into(),
            from: None,
        }
    }

    /// Sets the label this spec is renamed from.
    pub fn renamed_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// The rename source, if one is declared and non-empty.
    pub fn rename_source(&self) -> Option<&str> {
        self.from.as_deref().filter(|from| !from.is_empty())
    }

    /// Export mapping from a live label. The default flag is dropped and no
    /// rename source is set.
    pub fn from_live(label: &LiveLabel) -> Self {
        Self::new(&label.name, &label.description, &label.color)
    }

    /// Whether `label` already carries exactly this spec's name, description
    /// and color. Colors are compared case-insensitively.
    pub fn is_satisfied_by(&self, label: &LiveLabel) -> bool {
        self.name == label.name
            && self.description == label.description
            && self.color.eq_ignore_ascii_case(&label.color)
    }

    /// The request body that creates this label.
    pub fn payload(&self) -> LabelPayload {
        LabelPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
        }
    }
}

/// The complete, validated set of labels for one push.
///
/// Construction is the only place the uniqueness rules are checked, so every
/// `DesiredSet` in existence satisfies them:
/// - no two specs share a name
/// - no two specs share a non-empty `from`
///
/// The set is immutable once built and keeps the declaration order.
#[derive(Debug, Clone)]
pub struct DesiredSet {
    specs: Vec<LabelSpec>,
    by_name: HashMap<String, usize>,
    by_from: HashMap<String, usize>,
}

impl DesiredSet {
    /// Validates `specs` and indexes them by name and by rename source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::DuplicateName` or
    /// `ConfigurationError::DuplicateFrom` when a uniqueness rule is broken.
    pub fn new(specs: Vec<LabelSpec>) -> Result<Self, ConfigurationError> {
        let mut by_name = HashMap::with_capacity(specs.len());
        let mut by_from = HashMap::new();

        for (index, spec) in specs.iter().enumerate() {
            if by_name.insert(spec.name.clone(), index).is_some() {
                return Err(ConfigurationError::DuplicateName {
                    name: spec.name.clone(),
                });
            }

            if let Some(from) = spec.rename_source() {
                if let Some(previous) = by_from.insert(from.to_string(), index) {
                    return Err(ConfigurationError::DuplicateFrom {
                        from: from.to_string(),
                        first: specs[previous].name.clone(),
                        second: spec.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            specs,
            by_name,
            by_from,
        })
    }

    /// Strictly decodes a JSON array of specs and validates it.
    ///
    /// # Errors
    ///
    /// Malformed JSON and unknown fields become `ConfigurationError::InvalidInput`;
    /// uniqueness violations are reported as by [`DesiredSet::new`].
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let specs: Vec<LabelSpec> =
            serde_json::from_reader(reader).map_err(|e| ConfigurationError::InvalidInput {
                reason: e.to_string(),
            })?;
        Self::new(specs)
    }

    pub fn specs(&self) -> &[LabelSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The spec literally named `name`.
    pub fn by_name(&self, name: &str) -> Option<&LabelSpec> {
        self.by_name.get(name).map(|&index| &self.specs[index])
    }

    /// The spec declaring `from == source`.
    pub fn by_from(&self, source: &str) -> Option<&LabelSpec> {
        self.by_from.get(source).map(|&index| &self.specs[index])
    }

    /// Names that are both a spec's own name and a different spec's rename source.
    ///
    /// Returns `(named, renaming)` pairs in declaration order of the renaming
    /// spec. A spec renamed from its own name is not a conflict.
    pub fn conflicting_sources(&self) -> Vec<(&LabelSpec, &LabelSpec)> {
        self.specs
            .iter()
            .filter_map(|renaming| {
                let source = renaming.rename_source()?;
                let named = self.by_name(source)?;
                (named.name != renaming.name).then_some((named, renaming))
            })
            .collect()
    }
}

/// Maps live labels to specs for export, keeping the order GitHub returned.
pub fn export_labels(labels: &[LiveLabel]) -> Vec<LabelSpec> {
    labels.iter().map(LabelSpec::from_live).collect()
}

/// Writes specs as a JSON array indented with four spaces, followed by a newline.
///
/// The output is accepted unchanged by [`DesiredSet::from_json_reader`].
pub fn write_labels_json<W: Write>(mut writer: W, labels: &[LabelSpec]) -> io::Result<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    labels.serialize(&mut serializer)?;
    writeln!(writer)
}
