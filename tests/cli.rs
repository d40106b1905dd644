//! Integration tests for the golfcast CLI surface

use std::process::Command;

/// Help output names the tool and its subcommands
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("golfcast"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("forecast"));
}

/// Serve help lists the listener overrides
#[test]
fn test_serve_help() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "serve", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--host"));
    assert!(stdout.contains("--port"));
}

/// Forecast without a location is rejected before any network call
#[test]
fn test_forecast_requires_location() {
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "forecast"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--location"));
}
