//! Visual output for validated arenas.
//!
//! SVG plots for files and reports, and a coarse text preview for the
//! terminal.

pub mod ascii_renderer;
pub mod svg_renderer;

pub use ascii_renderer::render_arena_ascii;
pub use svg_renderer::{render_arena_svg, save_arena_svg, SvgRenderOptions};
