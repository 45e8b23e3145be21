//! LabelRoller CLI library exports.
//!
//! The binary in `main.rs` is a thin dispatcher over these modules.

pub mod commands;
pub mod config;
pub mod errors;
