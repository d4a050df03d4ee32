//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// One arena with a wall, a goal and the agent, all within range and apart.
pub const VALID_ARENA_YAML: &str = r"!ArenaConfig
arenas:
  0: !Arena
    passMark: 1
    timeLimit: 250
    items:
    - !Item
      name: Wall
      positions:
      - !Vector3 {x: 10, y: 0, z: 10}
      sizes:
      - !Vector3 {x: 2, y: 1, z: 2}
      colors:
      - !RGB {r: 153, g: 153, b: 153}
    - !Item
      name: GoodGoal
      positions:
      - !Vector3 {x: 30, y: 0, z: 30}
    - !Item
      name: Agent
      positions:
      - !Vector3 {x: 20, y: 0, z: 5}
      rotations: [90]
";

/// Two walls sharing floor space.
pub const OVERLAP_ARENA_YAML: &str = r"!ArenaConfig
arenas:
  0: !Arena
    items:
    - !Item
      name: Wall
      positions:
      - !Vector3 {x: 10, y: 0, z: 10}
      - !Vector3 {x: 11, y: 0, z: 10}
      sizes:
      - !Vector3 {x: 2, y: 1, z: 2}
      - !Vector3 {x: 2, y: 1, z: 2}
";

/// A wall wider than the arena: a warning, not an error.
pub const OUT_OF_RANGE_ARENA_YAML: &str = r"!ArenaConfig
arenas:
  0: !Arena
    items:
    - !Item
      name: Wall
      positions:
      - !Vector3 {x: 20, y: 0, z: 20}
      sizes:
      - !Vector3 {x: 50, y: 1, z: 1}
";

/// An item type the style guide does not know.
pub const UNKNOWN_TYPE_ARENA_YAML: &str = r"!ArenaConfig
arenas:
  0: !Arena
    items:
    - !Item
      name: Unicorn
      positions:
      - !Vector3 {x: 5, y: 0, z: 5}
    - !Item
      name: Wall
      positions:
      - !Vector3 {x: 30, y: 0, z: 30}
";

/// Two clean arenas.
pub const MULTI_ARENA_YAML: &str = r"!ArenaConfig
arenas:
  0: !Arena
    items:
    - !Item
      name: Cardbox1
      positions:
      - !Vector3 {x: 5, y: 0, z: 5}
  1: !Arena
    items:
    - !Item
      name: BadGoal
      positions:
      - !Vector3 {x: 35, y: 0, z: 35}
";

/// Not valid YAML at all.
pub const MALFORMED_YAML: &str = "arenas: [unclosed\n";

/// Path to the aai-assist binary
pub fn aai_bin() -> &'static str {
    env!("CARGO_BIN_EXE_aai-assist")
}

/// Creates a temporary directory holding `arena.yaml` with the given content.
///
/// # Returns
/// The config path and the `TempDir` guard (keep it alive for the test).
pub fn create_temp_arena_file(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("arena.yaml");
    fs::write(&path, content).expect("Failed to write arena file");
    (path, temp_dir)
}

/// Creates a Command with an isolated config directory.
///
/// Keeps tests independent of the user's real configuration.
pub fn isolated_command(config_dir: &Path) -> Command {
    let mut cmd = Command::new(aai_bin());
    cmd.env("AAI_ASSIST_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Runs the binary with `args` inside a fresh config directory.
pub fn run_isolated(args: &[&str]) -> std::process::Output {
    let config_dir = TempDir::new().expect("Failed to create temp config dir");
    isolated_command(config_dir.path())
        .args(args)
        .output()
        .expect("Failed to execute command")
}
