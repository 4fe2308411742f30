//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn fyyur(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fyyur").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env_remove("DATABASE_URL")
        .env_remove("FYYUR_BIND")
        .env_remove("FYYUR_CONFIG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    fyyur(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help() {
    let home = tempfile::tempdir().unwrap();
    fyyur(home.path())
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database URL"));
}

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();
    fyyur(home.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains(".fyyur/config.toml"));
}

#[test]
fn test_config_show_defaults() {
    let home = tempfile::tempdir().unwrap();
    fyyur(home.path())
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://fyyur.db"))
        .stdout(predicate::str::contains("127.0.0.1:5000"));
}

#[test]
fn test_config_show_reads_file_and_env() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("custom.toml");
    std::fs::write(&path, "[server]\nbind = \"0.0.0.0:8080\"\n").unwrap();

    fyyur(home.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .env("DATABASE_URL", "sqlite://other.db")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"))
        .stdout(predicate::str::contains("sqlite://other.db"));
}

#[test]
fn test_config_show_rejects_bad_toml() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("broken.toml");
    std::fs::write(&path, "[server\n").unwrap();

    fyyur(home.path())
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid TOML"));
}
