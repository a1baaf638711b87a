pub mod alphabeta;
pub mod evaluator;
pub mod heuristic;
pub mod minimax;
pub mod position_table;

mod bounds;
mod branch_info;

pub use bounds::Bounds;
pub use branch_info::{LayerInfo, SearchStats};

use crate::{
    board::{Board, Color, Move},
    logger::Logger,
    Score,
};
use alphabeta::AlphaBeta;
use evaluator::Utility;
use minimax::Minimax;

/// The outcome of searching a node: the best move found (absent at cutoff
/// nodes) and its value for the searching player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Option<Move>,
    pub value: Score,
}

impl SearchResult {
    pub fn cutoff(value: Score) -> SearchResult { SearchResult { mv: None, value } }
}

/// How many plies a search may look ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthLimit {
    /// Search until the side to move has no legal moves
    Unbounded,
    Plies(u32),
}

impl DepthLimit {
    /// Negative limits mean unbounded, as in the game manager's config line.
    pub fn from_int(limit: i64) -> DepthLimit {
        if limit < 0 {
            DepthLimit::Unbounded
        } else {
            DepthLimit::Plies(u32::try_from(limit).unwrap_or(u32::MAX))
        }
    }

    /// The remaining depth at the root of a search of `board`. Every ply
    /// fills one empty square, so this never exceeds the number of empty
    /// squares and recursion is bounded by the board size.
    pub fn remaining(self, board: &Board) -> u32 {
        let empties = board.empty_count() as u32;
        match self {
            DepthLimit::Unbounded => empties,
            DepthLimit::Plies(plies) => plies.min(empties),
        }
    }
}

impl std::fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthLimit::Unbounded => write!(f, "unbounded"),
            DepthLimit::Plies(plies) => write!(f, "{} plies", plies),
        }
    }
}

pub trait Engine {
    /// Searches `board` for `color` and returns the best move with its value.
    fn search(&mut self, board: &Board, color: Color) -> SearchResult;

    /// The move `color` should play, or `None` if it has to pass.
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.search(board, color).mv
    }

    /// Node statistics for the most recent search.
    fn stats(&self) -> &SearchStats;

    fn logger(&self) -> &Logger;
}

/// Runs an isolated minimax search with a fresh table.
pub fn select_move_minimax(
    board: &Board, color: Color, depth_limit: DepthLimit, caching: bool,
) -> Option<Move> {
    Minimax::new(Utility, depth_limit, caching, 0).select_move(board, color)
}

/// Runs an isolated alpha-beta search with a fresh table.
pub fn select_move_alphabeta(
    board: &Board, color: Color, depth_limit: DepthLimit, caching: bool, ordering: bool,
) -> Option<Move> {
    AlphaBeta::new(Utility, depth_limit, caching, ordering, 0).select_move(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_limit_from_int() {
        assert_eq!(DepthLimit::from_int(-1), DepthLimit::Unbounded);
        assert_eq!(DepthLimit::from_int(-7), DepthLimit::Unbounded);
        assert_eq!(DepthLimit::from_int(0), DepthLimit::Plies(0));
        assert_eq!(DepthLimit::from_int(5), DepthLimit::Plies(5));
    }

    #[test]
    fn test_remaining_is_clamped_to_empty_squares() {
        let board = Board::starting(4);
        assert_eq!(DepthLimit::Unbounded.remaining(&board), 12);
        assert_eq!(DepthLimit::Plies(100).remaining(&board), 12);
        assert_eq!(DepthLimit::Plies(3).remaining(&board), 3);
    }

    #[test]
    fn test_selectors_agree_on_opening() {
        let board = Board::starting(4);
        let expected = Some(Move::new(0, 1));
        assert_eq!(select_move_minimax(&board, Color::Dark, DepthLimit::Plies(1), false), expected);
        assert_eq!(
            select_move_alphabeta(&board, Color::Dark, DepthLimit::Plies(1), false, false),
            expected
        );
        assert_eq!(
            select_move_alphabeta(&board, Color::Dark, DepthLimit::Plies(1), true, true),
            expected
        );
    }

    #[test]
    fn test_selectors_pass_without_moves() {
        let board = Board::new(&[vec![1, 1, 1, 1], vec![1, 1, 1, 1], vec![1, 1, 0, 0], vec![1, 1, 0, 0]])
            .unwrap();
        assert_eq!(select_move_minimax(&board, Color::Light, DepthLimit::Unbounded, true), None);
        assert_eq!(
            select_move_alphabeta(&board, Color::Light, DepthLimit::Unbounded, true, true),
            None
        );
    }
}
