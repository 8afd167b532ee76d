//! CLI surface tests: help, version and completions

use assert_cmd::Command;
use predicates::prelude::*;

fn c2clog() -> Command {
    let mut cmd = Command::cargo_bin("c2clog").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    c2clog()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("summary"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn process_help_shows_examples() {
    c2clog()
        .args(["process", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXAMPLES:"))
        .stdout(predicate::str::contains("--no-eval"));
}

#[test]
fn version_matches_package() {
    c2clog()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "c2clog {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    c2clog()
        .arg("replay")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_for_each_shell() {
    for shell in ["bash", "zsh", "fish"] {
        c2clog()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("c2clog"))
            .stdout(predicate::str::contains("summary"));
    }
}

#[test]
fn completions_reject_unknown_shell() {
    c2clog()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
