//! Integration tests for the CLI
//!
//! Every run points `--api-url` at a closed local port, so each network call
//! fails immediately and the statistics fall back to zero.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DEAD_API: &str = "http://127.0.0.1:1";

const ART: &str = "  __  \n /  \\ \n| () |\n \\__/ \n  ||  \n";

fn write_inputs(dir: &Path, config: &str) {
    fs::write(dir.join("ascii.txt"), ART).expect("write art");
    fs::write(dir.join("config.json"), config).expect("write config");
}

fn profilefetch(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("profilefetch"));
    cmd.current_dir(dir)
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .args(["--api-url", DEAD_API]);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("profilefetch"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("profile README"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn test_generates_readme_without_token() {
    let dir = TempDir::new().expect("temp dir");
    write_inputs(
        dir.path(),
        r#"{"username": "alice", "header": "alice@github", "host": "Acme"}"#,
    );

    profilefetch(dir.path())
        .args(["--token", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated README.md"))
        .stderr(predicate::str::is_empty());

    let readme = fs::read_to_string(dir.path().join("README.md")).expect("README written");
    assert!(readme.starts_with("<pre>\n"));
    assert!(readme.contains("</pre>"));
    assert!(readme.contains("username=alice"));

    let repos = readme.lines().find(|l| l.contains("Repos:")).expect("Repos row");
    assert!(repos.trim_end().ends_with(" 0"));
    assert!(readme.contains("0 { 0++, 0-- }"));
    assert!(readme.contains("Host: "));
    assert!(readme.contains("| () |"));

    // No token: the lines-of-code cache is never touched.
    assert!(!dir.path().join("cache").exists());
}

#[test]
fn test_custom_paths() {
    let dir = TempDir::new().expect("temp dir");
    write_inputs(dir.path(), r#"{"username": "alice", "header": "hi"}"#);
    fs::rename(dir.path().join("config.json"), dir.path().join("me.json")).expect("rename");

    profilefetch(dir.path())
        .args(["--config", "me.json", "--output", "out.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated out.md"));

    assert!(dir.path().join("out.md").exists());
    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn test_verbose_reports_failures() {
    let dir = TempDir::new().expect("temp dir");
    write_inputs(dir.path(), r#"{"username": "alice", "header": "hi"}"#);

    profilefetch(dir.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("user profile request failed"));
}

#[test]
fn test_missing_username_aborts_without_output() {
    let dir = TempDir::new().expect("temp dir");
    write_inputs(dir.path(), r#"{"header": "hi"}"#);

    profilefetch(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("username"));

    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn test_missing_art_aborts_without_output() {
    let dir = TempDir::new().expect("temp dir");
    write_inputs(dir.path(), r#"{"username": "alice", "header": "hi"}"#);
    fs::remove_file(dir.path().join("ascii.txt")).expect("remove art");

    profilefetch(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read ASCII art"));

    assert!(!dir.path().join("README.md").exists());
}
