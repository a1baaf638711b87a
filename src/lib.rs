mod board;
mod engine;
mod js_interface;
mod logger;
mod protocol;
mod utils;

/// Scores are disc differences (or heuristic values) from the searching
/// player's point of view.
pub type Score = i32;

pub use board::{Board, BoardError, Cell, Color, Move};
pub use engine::{
    alphabeta::AlphaBeta,
    evaluator::{utility, StaticEvaluator, Utility},
    heuristic::{heuristic, Heuristic, Weights},
    minimax::Minimax,
    position_table::{Bound, CacheEntry, CacheKey, NodeKind, PositionTable},
    select_move_alphabeta, select_move_minimax, Bounds, DepthLimit, Engine, LayerInfo, SearchResult,
    SearchStats,
};
pub use js_interface::{js_apply_move, js_legal_moves, js_starting_board, WebAgent};
pub use logger::Logger;
pub use protocol::{
    format_move, parse_board, parse_status, AgentConfig, Algorithm, ProtocolError, Status, PASS,
};

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;
