//! End-to-end tests for `aai-assist render` and `aai-assist run` commands.

use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_render_single_arena_to_file() {
    let (config_path, temp_dir) = create_temp_arena_file(VALID_ARENA_YAML);
    let output_path = temp_dir.path().join("plot.svg");

    let output = run_isolated(&[
        "render",
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let svg = fs::read_to_string(&output_path).expect("SVG should be written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Arena 0"));
    assert_eq!(svg.matches(r#"class="item""#).count(), 3);
}

#[test]
fn test_render_default_output_in_configured_dir() {
    let (config_path, _temp_dir) = create_temp_arena_file(MULTI_ARENA_YAML);
    let config_dir = TempDir::new().unwrap();
    let plots_dir = TempDir::new().unwrap();

    let set = isolated_command(config_dir.path())
        .args(["config", "set", "paths.output_dir", plots_dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(set.status.code(), Some(0));

    let output = isolated_command(config_dir.path())
        .args(["render", "-c", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(plots_dir.path().join("arena_arena0.svg").is_file());
    assert!(plots_dir.path().join("arena_arena1.svg").is_file());
}

#[test]
fn test_render_several_arenas_into_directory() {
    let (config_path, temp_dir) = create_temp_arena_file(MULTI_ARENA_YAML);
    let out_dir = temp_dir.path().join("plots");

    let output = run_isolated(&[
        "render",
        "-c",
        config_path.to_str().unwrap(),
        "-o",
        out_dir.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let second = fs::read_to_string(out_dir.join("arena_arena1.svg")).unwrap();
    assert!(second.contains("Arena 1"));
    assert!(second.contains("<circle"));
}

#[test]
fn test_render_selected_arena() {
    let (config_path, temp_dir) = create_temp_arena_file(MULTI_ARENA_YAML);
    let output_path = temp_dir.path().join("one.svg");

    let output = run_isolated(&[
        "render",
        "-c",
        config_path.to_str().unwrap(),
        "--arena",
        "1",
        "-o",
        output_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    let svg = fs::read_to_string(&output_path).unwrap();
    assert!(svg.contains("Arena 1"));
    assert!(!svg.contains("Cardbox1"));
}

#[test]
fn test_render_unknown_arena() {
    let (config_path, _temp_dir) = create_temp_arena_file(MULTI_ARENA_YAML);

    let output = run_isolated(&[
        "render",
        "-c",
        config_path.to_str().unwrap(),
        "--arena",
        "7",
        "--ascii",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Arena 7 not found"));
}

#[test]
fn test_render_ascii_preview() {
    let (config_path, temp_dir) = create_temp_arena_file(OVERLAP_ARENA_YAML);

    let output = run_isolated(&["render", "-c", config_path.to_str().unwrap(), "--ascii"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Arena 0"));
    assert!(stdout.contains('┌'));
    assert!(stdout.contains('!'), "Overlapping cells should be marked");
    assert!(stdout.contains("A  Wall 0 (#0)"));

    // Preview only, no files
    let svgs = fs::read_dir(temp_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "svg"))
        .count();
    assert_eq!(svgs, 0);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("0 errors, 1 warnings"));
}

#[test]
fn test_render_missing_file() {
    let output = run_isolated(&["render", "-c", "/nonexistent/arena.yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_run_checks_and_renders() {
    let (config_path, temp_dir) = create_temp_arena_file(VALID_ARENA_YAML);

    let output = run_isolated(&[
        "run",
        config_path.to_str().unwrap(),
        "--output-dir",
        temp_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
    assert!(stdout.contains("Rendered arena to"));
    assert!(temp_dir.path().join("arena_arena0.svg").is_file());
}

#[test]
fn test_run_renders_even_with_errors() {
    let (config_path, temp_dir) = create_temp_arena_file(UNKNOWN_TYPE_ARENA_YAML);

    let output = run_isolated(&[
        "run",
        config_path.to_str().unwrap(),
        "-o",
        temp_dir.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let svg = fs::read_to_string(temp_dir.path().join("arena_arena0.svg")).unwrap();
    // Unknown item skipped, wall still drawn
    assert_eq!(svg.matches(r#"class="item""#).count(), 1);
}
