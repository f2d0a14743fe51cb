use crate::imports::{SourceLanguage, collect_specifiers, specifier_package};
use crate::{AnalyzeError, Analyzer};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use monodep_types::AnalysisResult;
use std::collections::BTreeMap;
use walkdir::WalkDir;

/// Directories that never contain first-party sources.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

/// Production analyzer: a tree-sitter import scan over one package's sources,
/// reshaped against its manifest into missing and unused dependency sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImportScanner;

impl ImportScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for ImportScanner {
    fn analyze(
        &self,
        pkg_dir: &Utf8Path,
        ignore_patterns: &[String],
    ) -> anyhow::Result<AnalysisResult> {
        let manifest = monodep_workspace::read_manifest(pkg_dir)
            .with_context(|| format!("read manifest for {pkg_dir}"))?;
        let excluded = build_globset(ignore_patterns).context("compile ignorePatterns")?;

        // Package name -> source files (relative) where it is referenced.
        let mut used: BTreeMap<String, Vec<Utf8PathBuf>> = BTreeMap::new();

        for entry in WalkDir::new(pkg_dir)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Ok(abs) = Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) else {
                continue;
            };
            let rel = abs.strip_prefix(pkg_dir).unwrap_or(&abs).to_path_buf();
            if excluded.is_match(rel.as_std_path()) {
                continue;
            }
            let Some(language) = abs
                .extension()
                .and_then(SourceLanguage::from_extension)
            else {
                continue;
            };

            let source = std::fs::read_to_string(&abs).map_err(|source| AnalyzeError::FileRead {
                path: abs.clone(),
                source,
            })?;

            for specifier in collect_specifiers(&source, language)? {
                if let Some(package) = specifier_package(&specifier) {
                    let files = used.entry(package.to_string()).or_default();
                    if !files.contains(&rel) {
                        files.push(rel.clone());
                    }
                }
            }
        }

        let missing = used
            .iter()
            .filter(|(name, _)| !manifest.declares(name))
            .map(|(name, files)| (name.clone(), files.clone()))
            .collect();
        let unused_dependencies = manifest
            .dependency_names()
            .filter(|name| !used.contains_key(*name))
            .map(str::to_string)
            .collect();
        let unused_dev_dependencies = manifest
            .dev_dependency_names()
            .filter(|name| !used.contains_key(*name))
            .map(str::to_string)
            .collect();

        Ok(AnalysisResult {
            unused_dependencies,
            unused_dev_dependencies,
            missing,
        })
    }
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob: {pattern}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && SKIPPED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
}
