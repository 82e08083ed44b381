//! Edge case integration tests for the fpane CLI.
//!
//! These tests cover:
//! - The background threshold and progress reporting
//! - Name generation for dotfiles and multi-extension names
//! - Special files inside pasted trees
//! - Permission and timestamp preservation

#[path = "../common/mod.rs"]
mod common;

#[path = "edge_cases/background_threshold.rs"]
mod background_threshold;

#[path = "edge_cases/naming.rs"]
mod naming;

#[path = "edge_cases/special_files.rs"]
mod special_files;

#[path = "edge_cases/metadata_preservation.rs"]
mod metadata_preservation;
