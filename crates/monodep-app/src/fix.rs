//! Serialized package-manager mutations.

use anyhow::Context;
use camino::Utf8PathBuf;
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};

/// The two corrective operations monodep knows how to issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
}

impl Operation {
    pub fn verb(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
        }
    }
}

/// The external mutation command.
///
/// One call issues one package-manager invocation for one package and one
/// operation, with the full eligible name list as arguments. Returns whether
/// the command reported success; spawn failures are errors. Both outcomes
/// are non-fatal to the run.
pub trait Mutate: Sync {
    fn mutate(&self, pkg_name: &str, op: Operation, specs: &[String]) -> anyhow::Result<bool>;
}

/// Production mutator: `yarn workspace <pkg> add|remove <specs...>`, run
/// from the monorepo root with the child inheriting our output streams.
#[derive(Clone, Debug)]
pub struct YarnMutator {
    repo_root: Utf8PathBuf,
}

impl YarnMutator {
    pub fn new(repo_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl Mutate for YarnMutator {
    fn mutate(&self, pkg_name: &str, op: Operation, specs: &[String]) -> anyhow::Result<bool> {
        let status = Command::new("yarn")
            .arg("workspace")
            .arg(pkg_name)
            .arg(op.verb())
            .args(specs)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("spawn yarn workspace {pkg_name} {}", op.verb()))?;
        Ok(status.success())
    }
}

/// Run-scoped mutual exclusion for mutation commands.
///
/// The package manager mutates a shared lockfile and manifest tree, so at
/// most one mutation command may be in flight system-wide. The gate is
/// constructed by the orchestrator at run start and threaded into the fix
/// path; its lifetime is one run.
#[derive(Debug, Default)]
pub struct FixGate(Mutex<()>);

impl FixGate {
    pub fn new() -> Self {
        Self(Mutex::new(()))
    }

    /// Run `f` while holding the gate. A poisoned lock still excludes, so
    /// poisoning is absorbed rather than propagated.
    pub fn locked<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn gate_is_mutually_exclusive() {
        let gate = FixGate::new();
        let in_flight = AtomicUsize::new(0);
        let high_water = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    gate.locked(|| {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        high_water.fetch_max(now, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(5));
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    });
                });
            }
        });

        assert_eq!(high_water.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn operation_verbs_match_yarn_subcommands() {
        assert_eq!(Operation::Add.verb(), "add");
        assert_eq!(Operation::Remove.verb(), "remove");
    }
}
