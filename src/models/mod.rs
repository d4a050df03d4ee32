//! Data models for arena configurations.
//!
//! This module contains the core data structures shared by the parser,
//! validator, and renderers. Models are independent of I/O and presentation.

pub mod arena;
pub mod item;
pub mod rgb;

// Re-export all model types
pub use arena::{Arena, ArenaConfig};
pub use item::{params, Item, ParamValue};
pub use rgb::RgbColor;
