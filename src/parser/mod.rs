//! Parsing and serialization of Animal-AI arena configurations.
//!
//! This module handles reading arena YAML files into the data model and
//! writing resolved configurations back out.

pub mod arena_config;
pub mod config_writer;

// Re-export commonly used functions
pub use arena_config::{load_arena_config, parse_arena_config_str, ParseError};
pub use config_writer::{atomic_write, generate_arena_yaml, save_arena_config};
