//! CLI entry point for monodep.
//!
//! This module is intentionally thin: it handles argument parsing, config
//! file I/O, and exit codes. The audit pipeline lives in `monodep-app`.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Parser;
use monodep_analysis::ImportScanner;
use monodep_app::{RunInput, YarnMutator, run_audit};
use monodep_settings::Overrides;

const CONFIG_FILE: &str = ".monodeprc.json";

#[derive(Parser, Debug)]
#[command(
    name = "monodep",
    version,
    about = "Dependency-declaration hygiene auditor for JavaScript monorepos"
)]
struct Cli {
    /// Monorepo root (directory containing the root package.json).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Print a confirmation line for clean packages.
    #[arg(long, overrides_with = "no_verbose")]
    verbose: bool,

    /// Disable verbose output even if the config enables it.
    #[arg(long, overrides_with = "verbose")]
    no_verbose: bool,

    /// Auto-correct workspace-local findings via `yarn workspace`.
    #[arg(long, overrides_with = "no_fix")]
    fix: bool,

    /// Disable fix mode even if the config enables it.
    #[arg(long, overrides_with = "fix")]
    no_fix: bool,
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(err) => {
            eprintln!("monodep error: {err:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let repo_root = cli
        .repo_root
        .canonicalize_utf8()
        .unwrap_or_else(|_| cli.repo_root.clone());

    // An absent config file means defaults; any other read failure is fatal.
    let config_path = repo_root.join(CONFIG_FILE);
    let config_text = match std::fs::read_to_string(&config_path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(err).with_context(|| format!("read {config_path}")),
    };

    let overrides = Overrides {
        verbose: flag_override(cli.verbose, cli.no_verbose),
        fix: flag_override(cli.fix, cli.no_fix),
    };

    let analyzer = ImportScanner::new();
    let mutator = YarnMutator::new(repo_root.clone());
    let output = run_audit(
        RunInput {
            repo_root: &repo_root,
            config_text: config_text.as_deref(),
            overrides,
        },
        &analyzer,
        &mutator,
    )?;
    Ok(output.exit_code())
}

fn flag_override(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
