//! Integration tests for the command line binary in dry-run mode

use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary in an empty directory with no configuration file
fn run(args: &[&str]) -> Output {
    let dir = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_capture-veil"))
        .args(args)
        .current_dir(dir.path())
        .env("CAPTURE_VEIL_CONFIG", dir.path().join("absent.toml"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute capture-veil")
}

#[test]
fn test_once_json_reports_cycle_and_summary() {
    let output = run(&["--dry-run", "--once", "--json", "--target", "vlc.exe"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);

    let cycle = &lines[0];
    assert_eq!(cycle["cycle"], 1);
    assert_eq!(cycle["matches"].as_array().unwrap().len(), 2);
    assert_eq!(cycle["matches"][0]["outcome"]["outcome"], "denied");

    let summary = &lines[1];
    assert_eq!(summary["cycles"], 1);
    assert_eq!(summary["outcomes"]["denied"], 2);
    assert_eq!(summary["cancelled"], false);
}

#[test]
fn test_require_elevation_exits_non_zero() {
    let output = run(&["--dry-run", "--once", "--json", "--elevation", "require"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Administrator privileges required"));
}

#[test]
fn test_elevation_state_reported_when_ignored() {
    let output = run(&["--dry-run", "--once", "--elevation", "ignore"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Running as administrator: false"));
    assert!(!stderr.contains("Not running as administrator"));
}

#[test]
fn test_probe_compares_both_strategies() {
    let output = run(&["--dry-run", "--probe", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let reports: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    for report in reports {
        let strategies: Vec<&str> = report["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["strategy"].as_str().unwrap())
            .collect();
        assert_eq!(strategies, vec!["capture-exclusion", "transparency-ghost"]);
    }
}

#[test]
fn test_invalid_interval_rejected() {
    let output = run(&["--dry-run", "--once", "--interval-ms", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[test]
fn test_unknown_strategy_rejected_by_parser() {
    let output = run(&["--dry-run", "--strategy", "inject"]);
    assert!(!output.status.success());
}

#[test]
#[cfg(not(windows))]
fn test_native_mode_unsupported_off_windows() {
    let output = run(&["--once"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported platform"));
}
