//! End-to-end tests for `aai-assist config` commands.

use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// Mutex to ensure config tests that modify state don't run in parallel
static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

fn config_command(args: &[&str], config_dir: &Path) -> std::process::Output {
    isolated_command(config_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let config_dir = TempDir::new().unwrap();
    let output = config_command(&["config", "show"], config_dir.path());

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Style Guide: (built-in)"));
    assert!(stdout.contains("Overlap Mode: bounding-box"));
}

#[test]
fn test_config_show_json_format() {
    let config_dir = TempDir::new().unwrap();
    let output = config_command(&["config", "show", "--json"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output");
    assert!(result["config_file"].as_str().unwrap().ends_with("config.toml"));
    assert_eq!(result["check"]["overlap_mode"], "bounding-box");
    assert_eq!(result["render"]["ascii_columns"], 60);
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_persists() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = TempDir::new().unwrap();

    let output = config_command(
        &["config", "set", "check.overlap_mode", "exact"],
        config_dir.path(),
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_dir.path().join("config.toml").is_file());

    let output = config_command(&["config", "show", "--json"], config_dir.path());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["check"]["overlap_mode"], "exact");
}

#[test]
fn test_config_set_unknown_key() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = TempDir::new().unwrap();

    let output = config_command(&["config", "set", "ui.theme", "dark"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown configuration key"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_invalid_value() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = TempDir::new().unwrap();

    let output = config_command(
        &["config", "set", "render.ascii_columns", "3"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));

    let output = config_command(
        &["config", "set", "paths.style_guide", "/nonexistent/guide.yaml"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_configured_mode_used_by_check() {
    let _lock = CONFIG_TEST_LOCK.lock().unwrap();
    let config_dir = TempDir::new().unwrap();
    let (arena_path, _arena_dir) = create_temp_arena_file(OVERLAP_ARENA_YAML);

    config_command(
        &["config", "set", "check.overlap_mode", "exact"],
        config_dir.path(),
    );
    let output = config_command(
        &["check", "-c", arena_path.to_str().unwrap(), "--json"],
        config_dir.path(),
    );

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(result["problems"][0]["translation"].is_array());
}
