//! Per-package dependency usage analysis.
//!
//! The orchestrator consumes the [`Analyzer`] trait; [`ImportScanner`] is the
//! production implementation, built on a tree-sitter scan of the package's
//! JavaScript/TypeScript sources.

#![forbid(unsafe_code)]

mod imports;
mod scanner;

pub use imports::{SourceLanguage, collect_specifiers, specifier_package};
pub use scanner::ImportScanner;

use camino::{Utf8Path, Utf8PathBuf};
use monodep_types::AnalysisResult;
use thiserror::Error;

/// The analyzer seam between the orchestrator and the import scan.
///
/// One call covers one package directory. `ignore_patterns` are source-file
/// globs (relative to the package directory) excluded from scanning. Any
/// error is fatal to the whole run: a silently skipped package would read as
/// a false "clean".
pub trait Analyzer: Sync {
    fn analyze(
        &self,
        pkg_dir: &Utf8Path,
        ignore_patterns: &[String],
    ) -> anyhow::Result<AnalysisResult>;
}

/// Errors raised by the import scan itself.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to read {path}")]
    FileRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tree-sitter language initialization failed")]
    LanguageInit,
}
