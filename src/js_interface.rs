use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::{
    board::{Board, Color, Move},
    engine::{
        alphabeta::AlphaBeta,
        evaluator::{StaticEvaluator, Utility},
        heuristic::Heuristic,
        minimax::Minimax,
        DepthLimit, Engine,
    },
};

/// An agent for the browser front end. Boards cross the boundary as JSON
/// arrays of rows (0 empty, 1 dark, 2 light), and moves as `[column, row]`.
#[wasm_bindgen]
pub struct WebAgent {
    engine: Box<dyn Engine>,
}

#[wasm_bindgen]
impl WebAgent {
    /// `depth_limit` below zero searches to the end of the game.
    #[wasm_bindgen(constructor)]
    pub fn new(
        depth_limit: i32, use_minimax: bool, caching: bool, ordering: bool, use_heuristic: bool,
        log_level: u8,
    ) -> WebAgent {
        crate::utils::set_panic_hook();
        let depth_limit = DepthLimit::from_int(depth_limit.into());
        let evaluator: Box<dyn StaticEvaluator> =
            if use_heuristic { Box::new(Heuristic::default()) } else { Box::new(Utility) };
        let engine: Box<dyn Engine> = if use_minimax {
            Box::new(Minimax::new(evaluator, depth_limit, caching, log_level))
        } else {
            Box::new(AlphaBeta::new(evaluator, depth_limit, caching, ordering, log_level))
        };
        WebAgent { engine }
    }

    /// Returns `[column, row]`, or `undefined` if `color` has to pass.
    pub fn choose_move(&mut self, board_json: &str, color: u8) -> Result<Option<Array>, JsError> {
        let board = js_board(board_json)?;
        let color = js_color(color)?;
        Ok(self.engine.select_move(&board, color).map(js_move))
    }
}

#[wasm_bindgen]
pub fn js_legal_moves(board_json: &str, color: u8) -> Result<Array, JsError> {
    let board = js_board(board_json)?;
    let color = js_color(color)?;
    Ok(board.legal_moves(color).into_iter().map(js_move).collect())
}

/// Plays a move and returns the new board as JSON.
#[wasm_bindgen]
pub fn js_apply_move(board_json: &str, color: u8, column: usize, row: usize) -> Result<String, JsError> {
    let board = js_board(board_json)?;
    let color = js_color(color)?;
    let mv = Move::new(column, row);
    if !board.is_legal(color, mv) {
        return Err(JsError::new(&format!("illegal move {}", mv)));
    }
    Ok(serde_json::to_string(&board.apply_move(color, mv))?)
}

#[wasm_bindgen]
pub fn js_starting_board(size: usize) -> Result<String, JsError> {
    if size < crate::board::MIN_SIZE || size % 2 != 0 {
        return Err(JsError::new("board size must be even and at least 4"));
    }
    Ok(serde_json::to_string(&Board::starting(size))?)
}

fn js_board(board_json: &str) -> Result<Board, JsError> { Ok(serde_json::from_str(board_json)?) }

fn js_color(code: u8) -> Result<Color, JsError> {
    Color::from_code(code.into()).ok_or_else(|| JsError::new("color must be 1 or 2"))
}

fn js_move(mv: Move) -> Array {
    let js_move = Array::new();
    js_move.push(&mv.column.into());
    js_move.push(&mv.row.into());
    js_move
}
