//! Coarse top-down terminal preview of an arena.
//!
//! Generates a character grid framed with box-drawing characters. Each item
//! gets a symbol; cells covered by an overlapping pair show `!`.
//!
//! ```text
//! Arena 0
//! ┌────────────────────┐
//! │                    │
//! │    AAA       B     │
//! │    AA!!CC          │
//! └────────────────────┘
//! A  Wall 0 (#0)
//! ```

use crate::constants::ARENA_SIZE;
use crate::validator::{Problem, ResolvedItem, Validation};
use nalgebra::Point2;
use std::fmt::Write;

const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
/// Symbol used once the alphabet runs out.
const FALLBACK_SYMBOL: char = '#';
const OVERLAP_SYMBOL: char = '!';
/// Smallest usable grid width.
const MIN_COLUMNS: usize = 10;

/// Renders one arena as text, `columns` characters wide inside the frame.
///
/// Terminal cells are roughly twice as tall as they are wide, so the grid
/// has half as many rows as columns.
#[must_use]
pub fn render_arena_ascii(validation: &Validation, arena: usize, columns: usize) -> String {
    let columns = columns.max(MIN_COLUMNS);
    let rows = columns / 2;
    let cell_width = ARENA_SIZE / columns as f64;
    let cell_height = ARENA_SIZE / rows as f64;

    let placed: Vec<(char, &ResolvedItem)> = validation
        .items_in_arena(arena)
        .filter(|item| item.footprint.is_some())
        .enumerate()
        .map(|(ordinal, item)| (SYMBOLS.chars().nth(ordinal).unwrap_or(FALLBACK_SYMBOL), item))
        .collect();

    // Create 2D character buffer
    let mut buffer = vec![vec![' '; columns]; rows];

    for (row, line) in buffer.iter_mut().enumerate() {
        // Row 0 is the far (high z) edge of the arena
        let z = ARENA_SIZE - (row as f64 + 0.5) * cell_height;
        for (col, cell) in line.iter_mut().enumerate() {
            let point = Point2::new((col as f64 + 0.5) * cell_width, z);
            let covering: Vec<&(char, &ResolvedItem)> = placed
                .iter()
                .filter(|(_, item)| item.footprint.is_some_and(|footprint| footprint.contains(point)))
                .collect();

            *cell = match covering.as_slice() {
                [] => ' ',
                [(symbol, _)] => *symbol,
                many => {
                    let clash = many.iter().enumerate().any(|(i, (_, a))| {
                        many[i + 1..]
                            .iter()
                            .any(|(_, b)| overlap_flagged(validation, a.index, b.index))
                    });
                    if clash {
                        OVERLAP_SYMBOL
                    } else {
                        // Later items are drawn on top
                        many.last().map_or(' ', |(symbol, _)| *symbol)
                    }
                }
            };
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "Arena {arena}");
    let _ = writeln!(output, "┌{}┐", "─".repeat(columns));
    for line in &buffer {
        let text: String = line.iter().collect();
        let _ = writeln!(output, "│{text}│");
    }
    let _ = writeln!(output, "└{}┘", "─".repeat(columns));

    for (symbol, item) in &placed {
        let _ = writeln!(output, "{symbol}  {} (#{})", item.name, item.index);
    }
    let skipped = validation
        .items_in_arena(arena)
        .filter(|item| item.footprint.is_none())
        .count();
    if skipped > 0 {
        let _ = writeln!(output, "({skipped} item(s) not shown)");
    }

    output
}

/// True when the report flags `a` and `b` as an overlapping pair.
fn overlap_flagged(validation: &Validation, a: usize, b: usize) -> bool {
    let (first, second) = if a < b { (a, b) } else { (b, a) };
    validation
        .report
        .problems_for(first)
        .iter()
        .any(|problem| matches!(problem, Problem::Overlap { other, .. } if *other == second))
}
