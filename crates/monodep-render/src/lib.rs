//! Report line rendering.
//!
//! Every line is self-contained (it carries its own package-name label), so
//! lines from concurrent packages may interleave freely on the output
//! streams. Package names are padded to the workspace-wide maximum width for
//! column alignment; workspace-local dependency names are dimmed to mark
//! them as auto-fixable.

#![forbid(unsafe_code)]

use monodep_types::{Category, ProblemDep};
use owo_colors::OwoColorize;

const MARKER: &str = "■";

/// Formats one line per package/category. Pure string building; printing is
/// the orchestrator's job.
#[derive(Clone, Copy, Debug)]
pub struct Reporter {
    width: usize,
}

impl Reporter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    fn padded(&self, pkg_name: &str) -> String {
        format!("{:<width$}", pkg_name, width = self.width)
    }

    /// A finding line, e.g. `■ pkg-a  Missing: lodash pkg-b`.
    pub fn problem_line(&self, pkg_name: &str, category: Category, deps: &[ProblemDep]) -> String {
        let names = deps
            .iter()
            .map(|dep| {
                if dep.workspace_local {
                    dep.name.dimmed().to_string()
                } else {
                    dep.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        match category {
            Category::Missing => format!(
                "{} {} {} {}",
                MARKER.red(),
                self.padded(pkg_name),
                category.label().red(),
                names
            ),
            Category::Unused => format!(
                "{} {} {} {}",
                MARKER.yellow(),
                self.padded(pkg_name),
                category.label().yellow(),
                names
            ),
        }
    }

    /// The confirmation line for a clean package under `--verbose`.
    pub fn ok_line(&self, pkg_name: &str) -> String {
        format!(
            "{} {} {}",
            MARKER.green(),
            self.padded(pkg_name),
            "OK".green()
        )
    }

    /// The action line announcing an auto-fix.
    pub fn fix_line(&self, pkg_name: &str, category: Category, names: &[String]) -> String {
        let label = match category {
            Category::Missing => "Adding:",
            Category::Unused => "Removing:",
        };
        format!(
            "{} {} {} {}",
            MARKER.cyan(),
            self.padded(pkg_name),
            label.cyan(),
            names.join(" ")
        )
    }
}
