use camino::Utf8PathBuf;
use std::collections::BTreeMap;

/// What the per-package analyzer reports back to the orchestrator.
///
/// The two `unused_*` lists are declaration-side problems (declared in the
/// manifest, never referenced from source); `missing` is the usage-side
/// problem (referenced from source, not declared), with the files where each
/// name is used as evidence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    pub unused_dependencies: Vec<String>,
    pub unused_dev_dependencies: Vec<String>,
    pub missing: BTreeMap<String, Vec<Utf8PathBuf>>,
}

impl AnalysisResult {
    /// Missing dependency names in deterministic (map) order.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.keys().cloned().collect()
    }

    /// Both unused sections merged into the single Unused category.
    pub fn unused_names(&self) -> Vec<String> {
        let mut names = self.unused_dependencies.clone();
        names.extend(self.unused_dev_dependencies.iter().cloned());
        names
    }
}

/// The two finding categories monodep reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Missing,
    Unused,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Missing => "Missing:",
            Category::Unused => "Unused:",
        }
    }
}

/// A dependency name that survived ignore filtering, tagged with whether it
/// resolves to a sibling workspace package. The tag drives display styling
/// and fix eligibility only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemDep {
    pub name: String,
    pub workspace_local: bool,
}
