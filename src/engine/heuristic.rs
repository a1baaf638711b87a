use super::evaluator::{utility, StaticEvaluator};
use crate::{
    board::{Board, Cell, Color},
    Score,
};

/// Weights that are added to the running score of whichever side a feature
/// belongs to.
#[derive(Clone, Copy, Debug)]
pub struct Weights {
    /// Per occupied corner. Corners can never be flanked.
    pub corner: Score,
    /// Per occupied square touching a corner. These usually give the corner
    /// away, so the weight is negative.
    pub corner_neighbour: Score,
    /// Per legal move available.
    pub mobility: Score,
}

impl Default for Weights {
    fn default() -> Self { Weights { corner: 4, corner_neighbour: -2, mobility: 1 } }
}

/// A composite of disc difference, corner control, corner-neighbour danger
/// and mobility. Each side gets a running score and the result is the
/// difference between them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Heuristic {
    weights: Weights,
}

impl Heuristic {
    pub fn new(weights: Weights) -> Heuristic { Heuristic { weights } }
}

impl StaticEvaluator for Heuristic {
    fn evaluate(&self, board: &Board, color: Color) -> Score {
        let opponent = color.opponent();
        let my_moves = board.legal_moves(color).len() as Score;
        let their_moves = board.legal_moves(opponent).len() as Score;

        let mut mine = utility(board, color);
        let mut theirs = utility(board, opponent);

        let mut credit = |column: usize, row: usize, weight: Score| match board.get(column, row) {
            Cell::Disc(c) if c == color => mine += weight,
            Cell::Disc(_) => theirs += weight,
            Cell::Empty => {}
        };

        for (column, row) in corners(board.size()) {
            credit(column, row, self.weights.corner);
        }
        for (column, row) in corner_neighbours(board.size()) {
            credit(column, row, self.weights.corner_neighbour);
        }

        mine += self.weights.mobility * my_moves;
        theirs += self.weights.mobility * their_moves;

        mine - theirs
    }
}

/// Scores `board` for `color` with the default weights.
pub fn heuristic(board: &Board, color: Color) -> Score { Heuristic::default().evaluate(board, color) }

fn corners(size: usize) -> [(usize, usize); 4] {
    let last = size - 1;
    [(0, 0), (0, last), (last, 0), (last, last)]
}

/// The squares horizontally, vertically or diagonally adjacent to a corner.
/// Twelve on any board of at least 4x4.
fn corner_neighbours(size: usize) -> Vec<(usize, usize)> {
    let last = size as isize - 1;
    let mut squares = Vec::with_capacity(12);
    for (cx, cy) in corners(size) {
        for (dx, dy) in [(0, 1), (1, 0), (1, 1), (0, -1), (-1, 0), (-1, -1), (1, -1), (-1, 1)] {
            let (x, y) = (cx as isize + dx, cy as isize + dy);
            if (0..=last).contains(&x) && (0..=last).contains(&y) {
                squares.push((x as usize, y as usize));
            }
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_corner_neighbours() {
        for size in [4, 6, 8] {
            let squares = corner_neighbours(size);
            assert_eq!(squares.len(), 12);
            let corners = corners(size);
            assert!(squares.iter().all(|sq| !corners.contains(sq)));
        }
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::starting(8);
        assert_eq!(heuristic(&board, Color::Dark), 0);
        assert_eq!(heuristic(&board, Color::Light), 0);
    }

    #[test]
    fn test_corner_and_neighbour_weights() {
        // On 4x4 every central square touches a corner
        let board = Board::new(&[
            vec![1, 0, 0, 0],
            vec![0, 2, 1, 0],
            vec![0, 1, 2, 2],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        let my_moves = board.legal_moves(Color::Dark).len() as Score;
        let their_moves = board.legal_moves(Color::Light).len() as Score;
        assert!(my_moves > 0);
        // dark: corner +4, two neighbours -2 each
        // light: three neighbours -2 each
        let mine = 4 - 4 + my_moves;
        let theirs = -6 + their_moves;
        assert_eq!(heuristic(&board, Color::Dark), mine - theirs);
        assert_eq!(heuristic(&board, Color::Light), theirs - mine);
    }

    #[test]
    fn test_finished_game_keeps_positional_terms() {
        let board = Board::new(&[vec![1, 1, 1, 1], vec![1, 1, 1, 1], vec![2, 2, 2, 2], vec![1, 1, 1, 1]])
            .unwrap();
        assert!(board.is_game_over());
        // dark: 8 + four corners - eight neighbours; light: -8 - four neighbours
        assert_eq!(heuristic(&board, Color::Dark), 24);
        assert_eq!(heuristic(&board, Color::Light), -24);
    }
}
