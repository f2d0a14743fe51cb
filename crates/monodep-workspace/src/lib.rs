//! Workspace adapters: expand member globs, read `package.json` files, and
//! build the immutable package roster.
//!
//! This crate is allowed to do filesystem IO. There is no partial-success
//! mode: a workspace with one broken member cannot be partially audited, so
//! every error here is fatal to the run.

#![forbid(unsafe_code)]

mod discover;
mod manifest;

pub use discover::expand_member_globs;
pub use manifest::{read_manifest, read_named_manifest};

use anyhow::Context;
use camino::Utf8Path;
use monodep_types::{Workspace, WorkspacePackage};

/// Build the package roster for the monorepo rooted at `repo_root`.
///
/// Member globs come from the root manifest's `workspaces` field. Matched
/// directories are paired index-for-index with their declared names; member
/// manifests are read with bounded parallelism.
pub fn resolve_workspace(repo_root: &Utf8Path, concurrency: usize) -> anyhow::Result<Workspace> {
    let root = read_manifest(repo_root).context("read root package.json")?;
    let patterns = root
        .workspaces
        .as_ref()
        .map(|w| w.patterns())
        .unwrap_or(&[]);
    anyhow::ensure!(
        !patterns.is_empty(),
        "root package.json at {repo_root} declares no workspaces"
    );

    let dirs = expand_member_globs(repo_root, patterns)?;
    let names = monodep_pool::bounded_map(dirs.clone(), concurrency, |_, dir| {
        let (name, _) = read_named_manifest(&dir)?;
        Ok(name)
    })?;

    let packages = dirs
        .into_iter()
        .zip(names)
        .map(|(dir, name)| WorkspacePackage { name, dir })
        .collect();
    Ok(Workspace::new(packages))
}
