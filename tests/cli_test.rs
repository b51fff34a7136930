//! Integration tests for the server-sentinel binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn setup_server(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("plugins").join("ServerSentinel");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("config.yml"), config).unwrap();
    temp
}

fn sentinel(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("server-sentinel"));
    cmd.current_dir(temp.path())
        .env_remove("SENTINEL_DATA_DIR")
        .env_remove("SENTINEL_ALERT_COMMAND")
        .env_remove("SENTINEL_TPS_COMMAND")
        .env_remove("SENTINEL_SHUTDOWN_COMMAND")
        .env_remove("RUST_LOG");
    cmd
}

const REQUIRES_ESSENTIALS: &str = "tps-alert-threshold: 15.0\nrequired-plugins:\n  Essentials: true\n  Dynmap: false\n";

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("server-sentinel"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TPS watchdog"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("server-sentinel"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("server-sentinel"));
    cmd.arg("monitor");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn init_writes_default_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    sentinel(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let written = fs::read_to_string(temp.path().join("plugins/ServerSentinel/config.yml"))?;
    assert!(written.contains("tps-alert-threshold"));
    assert!(written.contains("required-plugins"));
    Ok(())
}

#[test]
fn init_refuses_to_overwrite() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    sentinel(&temp)
        .arg("init")
        .assert()
        .failure()
        .stdout(predicate::str::contains("--force"));

    let kept = fs::read_to_string(temp.path().join("plugins/ServerSentinel/config.yml"))?;
    assert_eq!(kept, REQUIRES_ESSENTIALS);
    Ok(())
}

#[test]
fn init_force_overwrites() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server("tps-alert-threshold: 3\n");
    sentinel(&temp).args(["init", "--force"]).assert().success();

    let written = fs::read_to_string(temp.path().join("plugins/ServerSentinel/config.yml"))?;
    assert!(written.contains("Essentials"));
    Ok(())
}

#[test]
fn check_passes_when_modules_loaded() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    sentinel(&temp)
        .args(["check", "--loaded", "Essentials"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 required modules are loaded"));
    Ok(())
}

#[test]
fn check_reads_modules_directory() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    fs::write(temp.path().join("plugins").join("Essentials.jar"), b"")?;

    sentinel(&temp).arg("check").assert().success();
    Ok(())
}

#[test]
fn check_ignores_leftover_data_folders() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server("required-plugins:\n  WorldGuard: true\n");
    let stale = temp.path().join("plugins").join("WorldGuard");
    fs::create_dir_all(&stale)?;
    fs::write(stale.join("config.yml"), "regions: {}\n")?;

    sentinel(&temp)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Required modules not loaded: WorldGuard"));
    Ok(())
}

#[test]
fn check_fails_and_lists_missing_modules() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server("required-plugins:\n  Essentials: true\n  WorldGuard: true\n");
    sentinel(&temp)
        .args(["check", "--loaded", "Essentials"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Required modules not loaded: WorldGuard"));
    Ok(())
}

#[test]
fn check_quiet_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    sentinel(&temp)
        .args(["check", "--quiet"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn check_creates_missing_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    sentinel(&temp)
        .args(["check", "--loaded", "Essentials,WorldGuard"])
        .assert()
        .success();

    assert!(temp.path().join("plugins/ServerSentinel/config.yml").exists());
    Ok(())
}

#[test]
fn check_honors_data_dir_flag() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let data_dir = temp.path().join("custom");
    fs::create_dir_all(&data_dir)?;
    fs::write(data_dir.join("config.yml"), "required-plugins:\n  Vault: true\n")?;

    sentinel(&temp)
        .args(["check", "--data-dir"])
        .arg(&data_dir)
        .args(["--loaded", "Vault"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn run_requires_tps_command() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    sentinel(&temp)
        .args(["run", "--loaded", "Essentials"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--tps-command"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn run_exits_after_failed_dependency_check() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    let marker = temp.path().join("stopped");

    sentinel(&temp)
        .args(["run", "--alert-command", "true", "--tps-command", "echo 20"])
        .arg("--shutdown-command")
        .arg(format!("touch {}", marker.display()))
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(1);

    assert!(marker.exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn run_sends_start_failure_alert() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_server(REQUIRES_ESSENTIALS);
    let alert_log = temp.path().join("alerts.log");
    let script = temp.path().join("capture.sh");
    fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" >> {}\n", alert_log.display()),
    )?;
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    }

    sentinel(&temp)
        .args(["run", "--tps-command", "echo 20", "--world-container", "/srv/lobby"])
        .arg("--alert-command")
        .arg(&script)
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(1);

    let logged = fs::read_to_string(&alert_log)?;
    assert_eq!(logged.trim(), "send server_start_failed lobby Essentials");
    Ok(())
}
