//! End-to-end CLI tests against temp-dir workspaces.
//!
//! Each test lays out a small monorepo (root package.json with workspaces,
//! member packages with real source files), runs the binary, and asserts on
//! exit code and report lines.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to get a Command for the monodep binary.
#[allow(deprecated)]
fn monodep_cmd() -> Command {
    Command::cargo_bin("monodep").unwrap()
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, contents).expect("write file");
}

/// The canonical two-package scenario: `pkg-a` uses lodash without declaring
/// it and declares chalk without using it; `pkg-b` is clean.
fn scenario_workspace() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("temp dir");
    let root = tmp.path().to_path_buf();

    write_file(
        &root.join("package.json"),
        r#"{"name": "root", "workspaces": ["packages/*"]}"#,
    );
    write_file(
        &root.join("packages/pkg-a/package.json"),
        r#"{"name": "pkg-a", "dependencies": {"chalk": "^5.3.0"}}"#,
    );
    write_file(
        &root.join("packages/pkg-a/src/index.js"),
        "const _ = require('lodash');\nmodule.exports = _.noop;\n",
    );
    write_file(
        &root.join("packages/pkg-b/package.json"),
        r#"{"name": "pkg-b"}"#,
    );

    (tmp, root)
}

#[test]
fn reports_missing_and_unused_and_exits_one() {
    let (_tmp, root) = scenario_workspace();

    monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing:"))
        .stderr(predicate::str::contains("lodash"))
        .stderr(predicate::str::contains("Unused:"))
        .stderr(predicate::str::contains("chalk"))
        .stdout(predicate::str::contains("OK").not());
}

#[test]
fn verbose_confirms_the_clean_package() {
    let (_tmp, root) = scenario_workspace();

    let output = monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .arg("--verbose")
        .output()
        .expect("run monodep");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pkg-b"), "stdout was {stdout:?}");
    assert!(stdout.contains("OK"), "stdout was {stdout:?}");
    // Exactly one confirmation line: pkg-a has findings, pkg-b is clean.
    assert_eq!(stdout.lines().filter(|l| l.contains("OK")).count(), 1);
}

#[test]
fn ignore_unused_suppresses_only_that_category() {
    let (_tmp, root) = scenario_workspace();
    write_file(
        &root.join(".monodeprc.json"),
        r#"{"ignoreUnused": {"*": ["chalk"]}}"#,
    );

    monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("lodash"))
        .stderr(predicate::str::contains("Unused:").not());
}

#[test]
fn package_scoped_ignore_applies_only_to_that_package() {
    let (_tmp, root) = scenario_workspace();
    write_file(
        &root.join(".monodeprc.json"),
        r#"{"ignoreMissing": {"pkg-a": ["lodash"]}, "ignoreUnused": {"pkg-a": ["chalk"]}}"#,
    );

    monodep_cmd().arg("--repo-root").arg(&root).assert().code(0);
}

#[test]
fn clean_workspace_exits_zero() {
    let tmp = TempDir::new().expect("temp dir");
    let root = tmp.path();
    write_file(
        &root.join("package.json"),
        r#"{"name": "root", "workspaces": ["packages/*"]}"#,
    );
    write_file(
        &root.join("packages/pkg-a/package.json"),
        r#"{"name": "pkg-a", "dependencies": {"lodash": "^4.17.21"}}"#,
    );
    write_file(
        &root.join("packages/pkg-a/index.js"),
        "import { merge } from 'lodash';\nexport default merge;\n",
    );

    monodep_cmd()
        .arg("--repo-root")
        .arg(root)
        .assert()
        .success()
        .stderr(predicate::str::contains("Missing:").not())
        .stderr(predicate::str::contains("Unused:").not());
}

#[test]
fn config_verbose_is_overridable_from_the_cli() {
    let (_tmp, root) = scenario_workspace();
    write_file(&root.join(".monodeprc.json"), r#"{"verbose": true}"#);

    monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .arg("--no-verbose")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("OK").not());
}

#[test]
fn malformed_config_is_fatal() {
    let (_tmp, root) = scenario_workspace();
    write_file(&root.join(".monodeprc.json"), "{ nope");

    monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("monodep error"));
}

#[test]
fn unknown_config_key_is_fatal() {
    let (_tmp, root) = scenario_workspace();
    write_file(&root.join(".monodeprc.json"), r#"{"ignoreMising": {}}"#);

    monodep_cmd()
        .arg("--repo-root")
        .arg(&root)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("monodep error"));
}

#[test]
fn missing_root_manifest_is_fatal() {
    let tmp = TempDir::new().expect("temp dir");

    monodep_cmd()
        .arg("--repo-root")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("monodep error"));
}

#[test]
fn missing_sibling_is_reported_as_a_finding() {
    let tmp = TempDir::new().expect("temp dir");
    let root = tmp.path();
    write_file(
        &root.join("package.json"),
        r#"{"name": "root", "workspaces": ["packages/*"]}"#,
    );
    write_file(
        &root.join("packages/app/package.json"),
        r#"{"name": "app"}"#,
    );
    write_file(
        &root.join("packages/app/index.js"),
        "import { helper } from 'lib';\nexport { helper };\n",
    );
    write_file(
        &root.join("packages/lib/package.json"),
        r#"{"name": "lib"}"#,
    );

    monodep_cmd()
        .arg("--repo-root")
        .arg(root)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing:"))
        .stderr(predicate::str::contains("lib"));
}
