//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use othello_agent::{js_apply_move, js_legal_moves, js_starting_board, WebAgent};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn agent_picks_first_best_opening() {
    let board = js_starting_board(4).unwrap();
    let mut agent = WebAgent::new(1, false, true, true, false, 0);
    let mv = agent.choose_move(&board, 1).unwrap().unwrap();
    assert_eq!(mv.get(0).as_f64(), Some(0.0));
    assert_eq!(mv.get(1).as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn legal_moves_and_apply() {
    let board = js_starting_board(4).unwrap();
    assert_eq!(js_legal_moves(&board, 2).unwrap().length(), 4);
    let next = js_apply_move(&board, 1, 0, 1).unwrap();
    assert_eq!(next, "[[0,0,0,0],[1,1,1,0],[0,1,2,0],[0,0,0,0]]");
    assert!(js_apply_move(&board, 1, 0, 0).is_err());
}
