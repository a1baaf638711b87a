use std::collections::HashMap;

use super::{Bounds, SearchResult};
use crate::{
    board::{Board, Color, Move},
    Score,
};

/// Which side a node optimizes for. Part of the table key, so a board seen
/// at a max node never answers for the same board at a min node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Max,
    Min,
}

impl NodeKind {
    /// The player who moves at a node of this kind, when searching for
    /// `color`.
    pub fn mover(self, color: Color) -> Color {
        match self {
            NodeKind::Max => color,
            NodeKind::Min => color.opponent(),
        }
    }

    pub fn child(self) -> NodeKind {
        match self {
            NodeKind::Max => NodeKind::Min,
            NodeKind::Min => NodeKind::Max,
        }
    }
}

/// A table key: the board, the color whose perspective values are stored
/// from, and the kind of node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub board: Board,
    pub color: Color,
    pub node: NodeKind,
}

/// What a stored value is known to be. A value computed inside a narrowed
/// window may only be a bound on the true value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact(Score),
    /// The true value is at least this
    Lower(Score),
    /// The true value is at most this
    Upper(Score),
}

impl Bound {
    /// Classifies `value`, returned by a search run inside `window`.
    pub fn from_window(value: Score, window: Bounds) -> Bound {
        if window.at_most_alpha(value) {
            Bound::Upper(value)
        } else if window.at_least_beta(value) {
            Bound::Lower(value)
        } else {
            Bound::Exact(value)
        }
    }

    /// The stored value, if it settles a search inside `window`.
    pub fn usable_in(self, window: Bounds) -> Option<Score> {
        match self {
            Bound::Exact(value) => Some(value),
            Bound::Lower(value) if window.at_least_beta(value) => Some(value),
            Bound::Upper(value) if window.at_most_alpha(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub mv: Option<Move>,
    /// The remaining depth the entry was searched with
    pub depth: u32,
    pub bound: Bound,
}

/// A transposition table owned by one engine. Entries are never evicted,
/// so the table grows for as long as the engine lives.
#[derive(Default)]
pub struct PositionTable {
    table: HashMap<CacheKey, CacheEntry>,
    // Debug info
    lookups: u64,
    hits: u64,
    blanks: u64,
    shallow: u64,
    incompatible: u64,
    stores: u64,
    overwrites: u64,
}

impl PositionTable {
    pub fn new() -> PositionTable { PositionTable::default() }

    pub fn len(&self) -> usize { self.table.len() }

    pub fn is_empty(&self) -> bool { self.table.is_empty() }

    /// Gets the raw entry for a key, whatever it was searched with.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> { self.table.get(key) }

    /// Looks up a result that can stand in for searching `key` to `depth`
    /// inside `window`. Entries searched shallower than `depth`, or holding
    /// a bound that doesn't settle the window, are treated as misses.
    /// Needs to be mutable to update the debug info.
    pub fn lookup(&mut self, key: &CacheKey, depth: u32, window: Bounds) -> Option<SearchResult> {
        self.lookups += 1;

        match self.table.get(key) {
            None => {
                self.blanks += 1;
                None
            }
            Some(entry) if entry.depth < depth => {
                self.shallow += 1;
                None
            }
            Some(entry) => match entry.bound.usable_in(window) {
                Some(value) => {
                    self.hits += 1;
                    Some(SearchResult { mv: entry.mv, value })
                }
                None => {
                    self.incompatible += 1;
                    None
                }
            },
        }
    }

    /// Stores an entry, replacing whatever was there.
    pub fn store(&mut self, key: CacheKey, entry: CacheEntry) {
        self.stores += 1;
        if self.table.insert(key, entry).is_some() {
            self.overwrites += 1;
        }
    }

    pub fn hits(&self) -> u64 { self.hits }

    pub fn info(&self) -> String {
        format!(
            "Position table with {} entries:\n\
            \tTotal stores: {}\n\
            \t\tOverwrites: {} ({}%)\n\
            \tTotal lookups: {}\n\
            \t\tHits: {} ({}%)\n\
            \t\tBlanks: {} ({}%)\n\
            \t\tToo shallow: {} ({}%)\n\
            \t\tIncompatible bounds: {} ({}%)\n",
            self.table.len(),
            self.stores,
            self.overwrites,
            (100 * self.overwrites).checked_div(self.stores).unwrap_or(0),
            self.lookups,
            self.hits,
            (100 * self.hits).checked_div(self.lookups).unwrap_or(0),
            self.blanks,
            (100 * self.blanks).checked_div(self.lookups).unwrap_or(0),
            self.shallow,
            (100 * self.shallow).checked_div(self.lookups).unwrap_or(0),
            self.incompatible,
            (100 * self.incompatible).checked_div(self.lookups).unwrap_or(0),
        )
    }

    pub fn reset_debug_info(&mut self) {
        self.lookups = 0;
        self.hits = 0;
        self.blanks = 0;
        self.shallow = 0;
        self.incompatible = 0;
        self.stores = 0;
        self.overwrites = 0;
    }
}
