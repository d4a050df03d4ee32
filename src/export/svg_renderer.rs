//! Top-down SVG plots of an arena.
//!
//! Each item is drawn as its floor footprint, filled with the item colour.
//! Items involved in an overlap get a thick red outline.

use crate::constants::ARENA_SIZE;
use crate::geometry::FootprintShape;
use crate::parser::atomic_write;
use crate::validator::{ResolvedItem, Validation};
use anyhow::Result;
use nalgebra::Point2;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Parameters for SVG rendering.
#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Pixels per arena unit.
    pub pixels_per_unit: f64,
    /// Padding around the arena in pixels.
    pub padding: u32,
    /// Side length of the square arena in arena units.
    pub arena_size: f64,
    /// Draw item names at their centres.
    pub show_labels: bool,
    /// Opacity of item fills.
    pub fill_opacity: f64,
    /// Page background (CSS color string).
    pub background_color: String,
    /// Arena floor fill.
    pub arena_fill: String,
    /// Arena border.
    pub arena_stroke: String,
    /// Outline of items involved in an overlap.
    pub overlap_stroke: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            pixels_per_unit: 15.0,
            padding: 30,
            arena_size: ARENA_SIZE,
            show_labels: true,
            fill_opacity: 0.35,
            background_color: "#ffffff".to_string(),
            arena_fill: "rgba(255,224,130,0.1)".to_string(),
            arena_stroke: "rgb(100,100,100)".to_string(),
            overlap_stroke: "#ff0000".to_string(),
        }
    }
}

impl SvgRenderOptions {
    /// Sets the pixel scale.
    #[must_use]
    pub const fn with_scale(mut self, pixels_per_unit: f64) -> Self {
        self.pixels_per_unit = pixels_per_unit;
        self
    }

    /// Turns item labels on or off.
    #[must_use]
    pub const fn with_labels(mut self, show_labels: bool) -> Self {
        self.show_labels = show_labels;
        self
    }

    fn canvas_size(&self) -> f64 {
        self.arena_size.mul_add(self.pixels_per_unit, 2.0 * f64::from(self.padding))
    }

    /// Arena coordinates to SVG pixels; SVG y grows downwards, arena z upwards.
    fn to_pixels(&self, point: Point2<f64>) -> (f64, f64) {
        let padding = f64::from(self.padding);
        (
            point.x.mul_add(self.pixels_per_unit, padding),
            (self.arena_size - point.y).mul_add(self.pixels_per_unit, padding),
        )
    }
}

/// Renders one arena of a validated configuration as an SVG document.
///
/// Items without a footprint (unknown type or missing position) are skipped
/// with a warning.
#[must_use]
pub fn render_arena_svg(validation: &Validation, arena: usize, options: &SvgRenderOptions) -> String {
    let size = options.canvas_size();
    let padding = f64::from(options.padding);
    let arena_pixels = options.arena_size * options.pixels_per_unit;

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size:.0}" height="{size:.0}" viewBox="0 0 {size:.0} {size:.0}">
  <rect width="100%" height="100%" fill="{}"/>
  <text x="{padding:.0}" y="{:.0}" font-family="sans-serif" font-size="14" fill="#333">Arena {arena}</text>
  <rect x="{padding:.2}" y="{padding:.2}" width="{arena_pixels:.2}" height="{arena_pixels:.2}" fill="{}" stroke="{}" stroke-width="2"/>
"##,
        options.background_color,
        padding / 2.0 + 5.0,
        options.arena_fill,
        options.arena_stroke,
    );

    write_axis_ticks(&mut svg, options);

    let mut drawn = 0;
    for item in validation.items_in_arena(arena) {
        if item.footprint.is_none() {
            let reason = if item.known {
                "it has no position"
            } else {
                "its type is unknown"
            };
            warn!(item = %item.name, index = item.index, "Skipping item in plot: {reason}");
            continue;
        }
        let overlapping = validation.report.is_overlapping(item.index);
        write_item(&mut svg, item, overlapping, options);
        drawn += 1;
    }

    svg.push_str("</svg>\n");
    debug!(arena, drawn, "Rendered arena SVG");
    svg
}

/// Renders one arena and writes it to `path`.
///
/// # Errors
///
/// Returns errors for file I/O failures.
pub fn save_arena_svg(
    validation: &Validation,
    arena: usize,
    options: &SvgRenderOptions,
    path: &Path,
) -> Result<()> {
    let svg = render_arena_svg(validation, arena, options);
    atomic_write(path, &svg)
}

fn write_axis_ticks(svg: &mut String, options: &SvgRenderOptions) {
    let step = 10.0;
    let mut value: f64 = 0.0;
    while value <= options.arena_size + f64::EPSILON {
        let (x, bottom) = options.to_pixels(Point2::new(value, 0.0));
        let (left, y) = options.to_pixels(Point2::new(0.0, value));
        let _ = writeln!(
            svg,
            r##"  <text x="{x:.2}" y="{:.2}" font-family="sans-serif" font-size="10" fill="#666" text-anchor="middle">{value}</text>"##,
            bottom + 14.0
        );
        let _ = writeln!(
            svg,
            r##"  <text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="10" fill="#666" text-anchor="end">{value}</text>"##,
            left - 4.0,
            y + 3.0
        );
        value += step;
    }
}

fn write_item(svg: &mut String, item: &ResolvedItem, overlapping: bool, options: &SvgRenderOptions) {
    let Some(footprint) = item.footprint else {
        return;
    };

    let fill = item.colour.to_hex();
    let (stroke, stroke_width) = if overlapping {
        (options.overlap_stroke.clone(), 3.0)
    } else {
        (fill.clone(), 1.0)
    };
    let style = format!(
        r#"fill="{fill}" fill-opacity="{:.2}" stroke="{stroke}" stroke-width="{stroke_width:.1}""#,
        options.fill_opacity
    );
    let title = escape_xml(&format!("{} (#{})", item.name, item.index));

    let _ = writeln!(svg, r#"  <g class="item" data-type="{}">"#, escape_xml(&item.type_name));
    if footprint.shape == FootprintShape::Circle {
        let (cx, cy) = options.to_pixels(footprint.center);
        let radius = footprint.radius() * options.pixels_per_unit;
        let _ = writeln!(
            svg,
            r#"    <circle cx="{cx:.2}" cy="{cy:.2}" r="{radius:.2}" {style}><title>{title}</title></circle>"#
        );
    } else {
        let points: Vec<String> = footprint
            .outline()
            .into_iter()
            .map(|point| {
                let (x, y) = options.to_pixels(point);
                format!("{x:.2},{y:.2}")
            })
            .collect();
        let _ = writeln!(
            svg,
            r#"    <polygon points="{}" {style}><title>{title}</title></polygon>"#,
            points.join(" ")
        );
    }

    if options.show_labels {
        let (x, y) = options.to_pixels(footprint.center);
        let _ = writeln!(
            svg,
            r##"    <text x="{x:.2}" y="{:.2}" font-family="sans-serif" font-size="9" fill="#222" text-anchor="middle">{}</text>"##,
            y + 3.0,
            escape_xml(&item.name)
        );
    }
    svg.push_str("  </g>\n");
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arena, ArenaConfig, Item};
    use crate::style_guide::StyleGuide;
    use crate::validator::Validator;

    fn validate(items: Vec<Item>) -> Validation {
        let guide = StyleGuide::builtin().unwrap();
        let config = ArenaConfig {
            arenas: vec![Arena::new(0)],
            items,
        };
        Validator::new(&guide).validate(&config)
    }

    fn wall(ordinal: usize, x: f64) -> Item {
        Item::new(0, 0, "Wall", ordinal)
            .with_position(x, 0.0, 10.0)
            .with_size(2.0, 1.0, 2.0)
    }

    #[test]
    fn test_renders_each_item() {
        let goal = Item::new(0, 1, "GoodGoal", 0).with_position(30.0, 0.0, 30.0);
        let validation = validate(vec![wall(0, 10.0), goal]);
        let svg = render_arena_svg(&validation, 0, &SvgRenderOptions::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Arena 0"));
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 1);
        assert!(svg.contains("<title>Wall 0 (#0)</title>"));
        assert!(svg.contains(r##"fill="#999999""##));
        assert!(!svg.contains("#ff0000"));
    }

    #[test]
    fn test_overlapping_items_are_outlined_in_red() {
        let validation = validate(vec![wall(0, 10.0), wall(1, 11.0)]);
        let svg = render_arena_svg(&validation, 0, &SvgRenderOptions::default());
        assert_eq!(svg.matches(r##"stroke="#ff0000""##).count(), 2);
    }

    #[test]
    fn test_unknown_items_are_skipped() {
        let unknown = Item::new(0, 1, "Unicorn", 0).with_position(5.0, 0.0, 5.0);
        let validation = validate(vec![wall(0, 10.0), unknown]);
        let svg = render_arena_svg(&validation, 0, &SvgRenderOptions::default());
        assert!(!svg.contains("Unicorn"));
        assert_eq!(svg.matches(r#"class="item""#).count(), 1);
    }

    #[test]
    fn test_arena_z_axis_points_up() {
        let options = SvgRenderOptions::default();
        let (_, top) = options.to_pixels(Point2::new(0.0, 40.0));
        let (_, bottom) = options.to_pixels(Point2::new(0.0, 0.0));
        assert!(top < bottom);
        assert!((top - 30.0).abs() < 1e-9);
        assert!((options.canvas_size() - 660.0).abs() < 1e-9);
    }

    #[test]
    fn test_labels_can_be_disabled() {
        let validation = validate(vec![wall(0, 10.0)]);
        let with = render_arena_svg(&validation, 0, &SvgRenderOptions::default());
        let without =
            render_arena_svg(&validation, 0, &SvgRenderOptions::default().with_labels(false));
        assert!(with.contains(">Wall 0</text>"));
        assert!(!without.contains(">Wall 0</text>"));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena0.svg");
        let validation = validate(vec![wall(0, 10.0)]);
        save_arena_svg(&validation, 0, &SvgRenderOptions::default(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<polygon"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
