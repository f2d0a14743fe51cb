//! The audit pipeline: resolve config, resolve workspace, fan out package
//! units, aggregate.

use anyhow::Context;
use camino::Utf8Path;
use monodep_analysis::Analyzer;
use monodep_render::Reporter;
use monodep_settings::{Config, Overrides, filter};
use monodep_types::{Category, ProblemDep, Workspace, WorkspacePackage};

use crate::fix::{FixGate, Mutate, Operation};

/// Input for one audit run.
#[derive(Clone, Copy, Debug)]
pub struct RunInput<'a> {
    /// Monorepo root (directory containing the root `package.json`).
    pub repo_root: &'a Utf8Path,
    /// `.monodeprc.json` contents, `None` if the file is absent.
    pub config_text: Option<&'a str>,
    /// CLI flag overrides.
    pub overrides: Overrides,
}

/// Aggregate outcome of one run.
#[derive(Clone, Copy, Debug)]
pub struct RunOutput {
    pub packages: usize,
    /// Sum of per-package failure counts. Order-independent: packages
    /// complete in nondeterministic order.
    pub failures: u32,
}

impl RunOutput {
    pub fn exit_code(&self) -> i32 {
        if self.failures > 0 { 1 } else { 0 }
    }
}

/// Run the audit: every package flows through analyze → filter → report →
/// optionally fix, with at most `config.concurrency` packages in flight.
pub fn run_audit(
    input: RunInput<'_>,
    analyzer: &dyn Analyzer,
    mutator: &dyn Mutate,
) -> anyhow::Result<RunOutput> {
    let file = match input.config_text {
        Some(text) => {
            Some(monodep_settings::parse_config_json(text).context("parse .monodeprc.json")?)
        }
        None => None,
    };
    let config =
        monodep_settings::resolve_config(file, input.overrides).context("resolve config")?;

    let workspace = monodep_workspace::resolve_workspace(input.repo_root, config.concurrency)
        .context("resolve workspace")?;

    let reporter = Reporter::new(workspace.max_name_width());
    let gate = FixGate::new();

    let counts = monodep_pool::bounded_map(
        workspace.packages().to_vec(),
        config.concurrency,
        |_, pkg| audit_package(&pkg, &config, &workspace, &reporter, &gate, analyzer, mutator),
    )?;

    Ok(RunOutput {
        packages: counts.len(),
        failures: counts.iter().sum(),
    })
}

/// One unit of work: the full pipeline for a single package.
#[allow(clippy::too_many_arguments)]
fn audit_package(
    pkg: &WorkspacePackage,
    config: &Config,
    workspace: &Workspace,
    reporter: &Reporter,
    gate: &FixGate,
    analyzer: &dyn Analyzer,
    mutator: &dyn Mutate,
) -> anyhow::Result<u32> {
    let result = analyzer
        .analyze(&pkg.dir, &config.ignore_patterns)
        .with_context(|| format!("analyze {}", pkg.name))?;

    let missing = classify(
        &filter(&result.missing_names(), &pkg.name, &config.ignore_missing),
        workspace,
    );
    let unused = classify(
        &filter(&result.unused_names(), &pkg.name, &config.ignore_unused),
        workspace,
    );

    report_and_fix(pkg, Category::Missing, &missing, config, reporter, gate, mutator);
    report_and_fix(pkg, Category::Unused, &unused, config, reporter, gate, mutator);

    let failures = (missing.len() + unused.len()) as u32;
    if config.verbose && failures == 0 {
        println!("{}", reporter.ok_line(&pkg.name));
    }
    Ok(failures)
}

fn classify(names: &[String], workspace: &Workspace) -> Vec<ProblemDep> {
    names
        .iter()
        .map(|name| ProblemDep {
            name: name.clone(),
            workspace_local: workspace.is_local(name),
        })
        .collect()
}

/// Report one category and, in fix mode, mutate its workspace-local subset.
///
/// External names are reported but never auto-corrected: the only mutation
/// monodep knows is the workspace-aware install, which can pin a sibling
/// package version but not choose a registry version.
#[allow(clippy::too_many_arguments)]
fn report_and_fix(
    pkg: &WorkspacePackage,
    category: Category,
    deps: &[ProblemDep],
    config: &Config,
    reporter: &Reporter,
    gate: &FixGate,
    mutator: &dyn Mutate,
) {
    if deps.is_empty() {
        return;
    }
    eprintln!("{}", reporter.problem_line(&pkg.name, category, deps));

    if !config.fix {
        return;
    }
    let locals: Vec<String> = deps
        .iter()
        .filter(|dep| dep.workspace_local)
        .map(|dep| dep.name.clone())
        .collect();
    if locals.is_empty() {
        return;
    }

    println!("{}", reporter.fix_line(&pkg.name, category, &locals));

    let op = match category {
        Category::Missing => Operation::Add,
        Category::Unused => Operation::Remove,
    };
    let specs: Vec<String> = match op {
        // Pin added siblings to the workspace so they resolve locally
        // instead of from the registry.
        Operation::Add => locals.iter().map(|name| format!("{name}@workspace:*")).collect(),
        Operation::Remove => locals,
    };

    let outcome = gate.locked(|| mutator.mutate(&pkg.name, op, &specs));
    match outcome {
        Ok(true) => {}
        Ok(false) => eprintln!(
            "monodep: {} fix failed for {}; findings left in place",
            op.verb(),
            pkg.name
        ),
        Err(err) => eprintln!("monodep: {} fix errored for {}: {err:#}", op.verb(), pkg.name),
    }
}
