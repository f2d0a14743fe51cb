//! Shared DTOs used across the monodep workspace.
//!
//! This crate is intentionally boring:
//! - the `package.json` manifest model
//! - the workspace package roster
//! - the analyzer result shape and classified problem sets

#![forbid(unsafe_code)]

pub mod analysis;
pub mod manifest;
pub mod workspace;

pub use analysis::{AnalysisResult, Category, ProblemDep};
pub use manifest::{Manifest, Workspaces};
pub use workspace::{Workspace, WorkspacePackage};
