//! AAI Assist Library
//!
//! Core functionality for checking Animal-AI arena configurations: parsing
//! the YAML format, validating items against the style guide, detecting
//! overlapping footprints, and drawing arenas as SVG or text.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod geometry;
pub mod models;
pub mod parser;
pub mod style_guide;
pub mod validator;
