use serde::Deserialize;
use std::collections::BTreeMap;

/// `.monodeprc.json` schema.
///
/// Every field is optional; absent fields fall back to defaults during
/// resolution. Unknown keys are a configuration error.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfigFile {
    /// Suppress missing-dependency findings, per scope.
    pub ignore_missing: Option<IgnoreTable>,

    /// Suppress unused-dependency findings, per scope.
    pub ignore_unused: Option<IgnoreTable>,

    /// Source-file globs excluded from import scanning.
    pub ignore_patterns: Option<Vec<String>>,

    /// Worker pool size for the per-package fan-out.
    pub concurrency: Option<usize>,

    /// Emit a confirmation line for clean packages.
    pub verbose: Option<bool>,

    /// Auto-correct workspace-local findings via the package manager.
    pub fix: Option<bool>,
}

/// Ignore globs keyed by scope: a specific package name, or `"*"` applying
/// to every package.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IgnoreTable(pub BTreeMap<String, Vec<String>>);

impl IgnoreTable {
    pub const WILDCARD_SCOPE: &'static str = "*";

    pub fn patterns_for(&self, scope: &str) -> &[String] {
        self.0.get(scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The pattern list in effect for one package: wildcard-scope patterns
    /// first, package-scope patterns appended. Union, not override.
    pub fn effective_patterns(&self, pkg_name: &str) -> Vec<&str> {
        let mut patterns: Vec<&str> = self
            .patterns_for(Self::WILDCARD_SCOPE)
            .iter()
            .map(String::as_str)
            .collect();
        if pkg_name != Self::WILDCARD_SCOPE {
            patterns.extend(self.patterns_for(pkg_name).iter().map(String::as_str));
        }
        patterns
    }

    /// Every pattern in the table, across all scopes.
    pub fn all_patterns(&self) -> impl Iterator<Item = &str> {
        self.0.values().flatten().map(String::as_str)
    }
}
