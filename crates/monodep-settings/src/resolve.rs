use crate::model::{ConfigFile, IgnoreTable};
use anyhow::Context;
use globset::Glob;

/// CLI flag overrides, applied after the config file. `None` means the flag
/// was not given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Overrides {
    pub verbose: Option<bool>,
    pub fix: Option<bool>,
}

/// The effective configuration for one run.
#[derive(Clone, Debug)]
pub struct Config {
    pub ignore_missing: IgnoreTable,
    pub ignore_unused: IgnoreTable,
    pub ignore_patterns: Vec<String>,
    pub concurrency: usize,
    pub verbose: bool,
    pub fix: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignore_missing: IgnoreTable::default(),
            ignore_unused: IgnoreTable::default(),
            ignore_patterns: Vec::new(),
            concurrency: default_concurrency(),
            verbose: false,
            fix: false,
        }
    }
}

pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolve the effective config: defaults, then config-file fields, then CLI
/// overrides. Each field is checked for presence independently; scalars are
/// last-writer-wins.
pub fn resolve_config(file: Option<ConfigFile>, overrides: Overrides) -> anyhow::Result<Config> {
    let mut config = Config::default();

    if let Some(file) = file {
        if let Some(table) = file.ignore_missing {
            config.ignore_missing = table;
        }
        if let Some(table) = file.ignore_unused {
            config.ignore_unused = table;
        }
        if let Some(patterns) = file.ignore_patterns {
            config.ignore_patterns = patterns;
        }
        if let Some(concurrency) = file.concurrency {
            anyhow::ensure!(concurrency > 0, "concurrency must be a positive integer");
            config.concurrency = concurrency;
        }
        if let Some(verbose) = file.verbose {
            config.verbose = verbose;
        }
        if let Some(fix) = file.fix {
            config.fix = fix;
        }
    }

    validate_globs("ignoreMissing", config.ignore_missing.all_patterns())?;
    validate_globs("ignoreUnused", config.ignore_unused.all_patterns())?;
    validate_globs(
        "ignorePatterns",
        config.ignore_patterns.iter().map(String::as_str),
    )?;

    if let Some(verbose) = overrides.verbose {
        config.verbose = verbose;
    }
    if let Some(fix) = overrides.fix {
        config.fix = fix;
    }

    Ok(config)
}

fn validate_globs<'a>(key: &str, patterns: impl Iterator<Item = &'a str>) -> anyhow::Result<()> {
    for pattern in patterns {
        Glob::new(pattern).with_context(|| format!("invalid {key} glob: {pattern}"))?;
    }
    Ok(())
}
