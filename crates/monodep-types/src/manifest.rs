use serde::Deserialize;
use std::collections::BTreeMap;

/// The slice of `package.json` monodep cares about.
///
/// Unknown fields are deliberately tolerated: real manifests carry dozens of
/// keys (`scripts`, `exports`, `engines`, ...) that are irrelevant here.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,

    /// Workspace member globs, present only on the monorepo root manifest.
    pub workspaces: Option<Workspaces>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl Manifest {
    /// Names declared under `dependencies`.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    /// Names declared under `devDependencies`.
    pub fn dev_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dev_dependencies.keys().map(String::as_str)
    }

    /// True if `name` is declared in either dependency section.
    pub fn declares(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// The two shapes the `workspaces` field takes in the wild: the plain glob
/// array, and yarn's `{ "packages": [...], ... }` object form.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    Patterns(Vec<String>),
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    pub fn patterns(&self) -> &[String] {
        match self {
            Workspaces::Patterns(patterns) => patterns,
            Workspaces::Detailed { packages } => packages,
        }
    }
}
