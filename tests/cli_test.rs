//! Integration tests driving the launcher binary.
//!
//! Unix-only tests replace the package manager with a shell script that
//! logs its arguments and the application environment to `npm.log`.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[cfg(unix)]
const FAKE_NPM: &str = r#"#!/bin/sh
echo "$* BROWSER_DEV_MODE=${BROWSER_DEV_MODE:-unset} DEBUG=${DEBUG:-unset} NO_COLOR=${NO_COLOR:-unset}" >> npm.log
case "$1" in
  install)
    [ -n "$FAKE_INSTALL_EXIT" ] && exit "$FAKE_INSTALL_EXIT"
    mkdir -p node_modules
    ;;
  run)
    case "$2" in
      build:*) exit "${FAKE_BUILD_EXIT:-0}" ;;
      *)
        [ -n "$FAKE_CRASH" ] && exit 3
        if [ -n "$FAKE_LATE_EXIT" ]; then sleep 1; exit "$FAKE_LATE_EXIT"; fi
        exec sleep 1 >/dev/null 2>&1
        ;;
    esac
    ;;
esac
exit 0
"#;

#[cfg(unix)]
const COMPONENTS: [&str; 4] = [
    "src/limiters/limiter-manager.js",
    "src/limiters/cpu-limiter.js",
    "src/limiters/memory-limiter.js",
    "src/limiters/network-throttler.js",
];

/// A project with a fake package manager, Python management disabled and
/// every component file present.
#[cfg(unix)]
fn setup_project() -> TempDir {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let npm = bin.join("npm");
    fs::write(&npm, FAKE_NPM).unwrap();
    fs::set_permissions(&npm, fs::Permissions::from_mode(0o755)).unwrap();

    fs::write(
        temp.path().join(".isb-launcher.yml"),
        format!(
            "package_manager: {}\ngrace_period_ms: 300\npython:\n  enabled: false\n",
            npm.display()
        ),
    )
    .unwrap();

    for component in COMPONENTS {
        let path = temp.path().join(component);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }
    temp
}

fn launcher(project: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("isb-launcher"));
    cmd.current_dir(project);
    for var in [
        "ISB_PACKAGE_MANAGER",
        "ISB_GRACE_PERIOD_MS",
        "ISB_PYTHON",
        "ISB_SKIP_PYTHON",
        "BROWSER_DEV_MODE",
        "DEBUG",
        "RUST_LOG",
        "NO_COLOR",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn npm_log(project: &Path) -> String {
    fs::read_to_string(project.join("npm.log")).unwrap_or_default()
}

fn ran_install(log: &str) -> bool {
    log.lines().any(|l| l.starts_with("install BROWSER_DEV_MODE"))
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("isb-launcher"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Internet Server Browser"))
        .stdout(predicate::str::contains("--build"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("isb-launcher"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_prints_completions() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("isb-launcher"));
    cmd.args(["--completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("isb-launcher"));
    Ok(())
}

#[test]
fn cli_unknown_flag_is_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("isb-launcher"));
    cmd.arg("--frobnicate");
    cmd.assert().code(2);
    Ok(())
}

#[test]
fn cli_missing_settings_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = launcher(temp.path());
    cmd.args(["--verify", "--settings", "missing.yml"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_bad_platform_runs_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let mut cmd = launcher(temp.path());
    cmd.args(["--build", "badplatform"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid platform: badplatform"));

    assert!(npm_log(temp.path()).is_empty());
    assert!(!temp.path().join("package.json").exists());
    assert!(!temp.path().join("node_modules").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_verify_prepares_fresh_project() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let mut cmd = launcher(temp.path());
    cmd.arg("--verify");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Verification completed"));

    assert!(ran_install(&npm_log(temp.path())));
    assert!(temp.path().join("node_modules").is_dir());

    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("package.json"))?)?;
    assert_eq!(
        doc,
        serde_json::json!({"config": {"ollama": {
            "model": "llama3.2",
            "ip": "127.0.0.1",
            "port": "11434",
            "style": "default"
        }}})
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_verify_skips_install_when_marker_present() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.arg("--verify");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("already installed"));

    assert!(npm_log(temp.path()).is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_reset_reinstalls_dependencies() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let deps = temp.path().join("node_modules");
    fs::create_dir(&deps)?;
    fs::write(deps.join("stale.txt"), "old")?;

    let mut cmd = launcher(temp.path());
    cmd.args(["--reset", "--verify"]);
    cmd.assert().success();

    assert!(ran_install(&npm_log(temp.path())));
    assert!(deps.is_dir());
    assert!(!deps.join("stale.txt").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_failed_install_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let mut cmd = launcher(temp.path());
    cmd.arg("--verify").env("FAKE_INSTALL_EXIT", "7");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Install failed"));

    assert!(!temp.path().join("package.json").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_start_detached_reports_running() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("is running"));

    let log = npm_log(temp.path());
    assert!(log.contains("run start BROWSER_DEV_MODE=0 DEBUG=unset"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_dev_sets_child_environment() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.arg("--dev");
    cmd.assert().success();

    let log = npm_log(temp.path());
    assert!(log.contains("run dev BROWSER_DEV_MODE=1 DEBUG=1"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_no_color_does_not_leak_into_app() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.arg("--no-color");
    cmd.assert().success();

    let log = npm_log(temp.path());
    assert!(log.contains("run start BROWSER_DEV_MODE=0 DEBUG=unset NO_COLOR=unset"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_crashing_app_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.env("FAKE_CRASH", "1");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("terminated unexpectedly"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_foreground_mirrors_late_failure() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.arg("--foreground").env("FAKE_LATE_EXIT", "4");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("exited with code 4"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_foreground_clean_exit_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.arg("--foreground").env("FAKE_LATE_EXIT", "0");
    cmd.assert().success();
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_build_runs_platform_script() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.args(["--build", "linux"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Build for linux completed"));

    assert!(npm_log(temp.path()).contains("run build:linux"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_failed_build_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    fs::create_dir(temp.path().join("node_modules"))?;
    let mut cmd = launcher(temp.path());
    cmd.args(["--build", "win"]).env("FAKE_BUILD_EXIT", "2");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_project_flag_selects_root() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project();
    let elsewhere = TempDir::new()?;
    let mut cmd = launcher(elsewhere.path());
    cmd.arg("--verify")
        .arg("--project")
        .arg(temp.path())
        .arg("--settings")
        .arg(temp.path().join(".isb-launcher.yml"));
    cmd.assert().success();

    assert!(temp.path().join("node_modules").is_dir());
    assert!(!elsewhere.path().join("package.json").exists());
    Ok(())
}
