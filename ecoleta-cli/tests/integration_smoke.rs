//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("ecoleta").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("ecoleta").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("ecoleta").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_migrate_requires_database_url() {
    let mut cmd = Command::cargo_bin("ecoleta").unwrap();
    cmd.arg("migrate").env_remove("DATABASE_URL");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}
