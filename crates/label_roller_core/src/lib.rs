//! # LabelRoller Core
//!
//! This crate provides the core logic for LabelRoller, a tool that keeps the
//! issue labels of GitHub repositories in line with a declared label set.
//!
//! ## Overview
//!
//! A push runs per repository, one repository at a time:
//! 1. The live labels are fetched (all pages)
//! 2. [`plan`] compares them with the [`DesiredSet`] and produces edits,
//!    deletes and creates
//! 3. [`LabelManager::apply_plan`] applies the operations in order
//!
//! The first failure stops the run. Nothing is rolled back.
//!
//! ## Main Types
//!
//! - [`LabelSpec`] and [`DesiredSet`] - the declared labels
//! - [`Operation`] and [`Plan`] - the computed changes
//! - [`LabelManager`] - drives a [`github_client::LabelClient`]
//! - [`RepositoryScope`] - one repository or every repository of an owner
//!
//! ## Examples
//!
//! ```
//! use github_client::LiveLabel;
//! use label_roller_core::{plan, DesiredSet, LabelSpec, Operation};
//!
//! let desired = DesiredSet::new(vec![
//!     LabelSpec::new("type: bug", "Something isn't working", "d73a4a").renamed_from("bug"),
//! ]).unwrap();
//! let live = vec![LiveLabel {
//!     name: "bug".to_string(),
//!     description: String::new(),
//!     color: "d73a4a".to_string(),
//!     is_default: true,
//! }];
//!
//! let plan = plan(&desired, &live, false).unwrap();
//! assert!(matches!(&plan.operations()[0], Operation::Edit { current_name, .. } if current_name == "bug"));
//! ```

pub mod errors;
pub use errors::{ConfigurationError, LabelSyncError, LabelSyncResult};

pub mod label_manager;
pub use label_manager::{
    ApplyLabelsResult, DeleteReport, DeleteSelection, LabelManager, PushOptions, RepositoryReport,
};

pub mod label_spec;
pub use label_spec::{export_labels, write_labels_json, DesiredSet, LabelSpec};

pub mod reconciler;
pub use reconciler::{plan, Operation, Plan};

pub mod scope;
pub use scope::RepositoryScope;
