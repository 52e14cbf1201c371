use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lineup() -> Command {
    Command::cargo_bin("lineup").unwrap()
}

// ---------------------------------------------------------------------------
// lineup config
// ---------------------------------------------------------------------------

#[test]
fn config_prints_defaults() {
    lineup()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 3001"))
        .stdout(predicate::str::contains("seed_count: 1000000"))
        .stdout(predicate::str::contains("fast_flush_ms: 1000"))
        .stdout(predicate::str::contains("slow_flush_ms: 10000"));
}

#[test]
fn config_reads_overrides_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lineup.yaml");
    std::fs::write(&path, "port: 9000\nseed_count: 10\n").unwrap();

    lineup()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 9000"))
        .stdout(predicate::str::contains("seed_count: 10"));
}

#[test]
fn missing_config_file_fails() {
    lineup()
        .arg("--config")
        .arg("/nonexistent/lineup.yaml")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// lineup serve
// ---------------------------------------------------------------------------

#[test]
fn serve_rejects_invalid_flush_interval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lineup.yaml");
    std::fs::write(&path, "fast_flush_ms: 0\n").unwrap();

    lineup()
        .arg("--config")
        .arg(&path)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("fast_flush_ms"));
}

#[test]
fn help_lists_subcommands() {
    lineup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("config"));
}
