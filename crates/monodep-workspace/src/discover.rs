use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSetBuilder};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Expand workspace member globs into absolute package directories.
///
/// Directories only; globs match the path relative to `repo_root` with
/// forward slashes. The result is sorted so the directory/name pairing
/// stays stable for the whole run.
pub fn expand_member_globs(
    repo_root: &Utf8Path,
    patterns: &[String],
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // `packages/*` means direct children; only `**` may cross levels.
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid workspace glob: {pattern}"))?;
        builder.add(glob);
    }
    let set = builder.build().context("compile workspace globset")?;

    let mut dirs: Vec<Utf8PathBuf> = Vec::new();
    for entry in WalkDir::new(repo_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
    {
        let Some(abs) = pathbuf_to_utf8(entry.path().to_path_buf()) else {
            continue;
        };
        let rel = abs
            .strip_prefix(repo_root)
            .unwrap_or(&abs)
            .as_str()
            .replace('\\', "/");
        if set.is_match(&rel) {
            dirs.push(abs);
        }
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && matches!(
            entry.file_name().to_string_lossy().as_ref(),
            "node_modules" | ".git"
        )
}

fn pathbuf_to_utf8(path: PathBuf) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path).ok()
}
