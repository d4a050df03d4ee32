//! Arena-level configuration.

use crate::constants::{DEFAULT_PASS_MARK, DEFAULT_TIME_LIMIT};
use crate::models::item::Item;
use serde::{Deserialize, Serialize};

/// Settings of a single arena (everything except its items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Arena index as written in the `arenas` mapping
    pub index: usize,
    /// Reward needed to pass the arena
    pub pass_mark: f64,
    /// Episode length in steps
    pub time_limit: f64,
}

impl Arena {
    /// Creates an arena with the Animal-AI default pass mark and time limit.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            pass_mark: DEFAULT_PASS_MARK,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

/// A parsed configuration file.
///
/// Items are kept in one flat, ordered sequence across all arenas; each item
/// remembers its arena. Item indices in validation reports refer to this
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Arenas in ascending index order
    pub arenas: Vec<Arena>,
    /// All items in file order
    pub items: Vec<Item>,
}

impl ArenaConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arenas: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Looks up an arena by index.
    #[must_use]
    pub fn arena(&self, index: usize) -> Option<&Arena> {
        self.arenas.iter().find(|arena| arena.index == index)
    }

    /// Iterates over the items of one arena together with their global indices.
    pub fn items_in_arena(&self, arena: usize) -> impl Iterator<Item = (usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.arena() == arena)
    }
}
