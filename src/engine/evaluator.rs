use crate::{board::{Board, Color}, Score};

pub trait StaticEvaluator {
    /// Evaluates `board` from the point of view of `color`. Higher is better
    /// for `color`. Must be pure: the same board and color always give the
    /// same score.
    fn evaluate(&self, board: &Board, color: Color) -> Score;
}

impl<E: StaticEvaluator + ?Sized> StaticEvaluator for Box<E> {
    fn evaluate(&self, board: &Board, color: Color) -> Score { (**self).evaluate(board, color) }
}

/// The exact disc difference, `color`'s discs minus its opponent's.
pub fn utility(board: &Board, color: Color) -> Score {
    let (dark, light) = board.disc_counts();
    match color {
        Color::Dark => dark - light,
        Color::Light => light - dark,
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Utility;

impl StaticEvaluator for Utility {
    fn evaluate(&self, board: &Board, color: Color) -> Score { utility(board, color) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_is_antisymmetric() {
        let mut board = Board::starting(8);
        let mut color = Color::Dark;
        for _ in 0..10 {
            assert_eq!(utility(&board, Color::Dark), -utility(&board, Color::Light));
            let Some(mv) = board.legal_moves(color).into_iter().last() else { break };
            board = board.apply_move(color, mv);
            color = !color;
        }
    }

    #[test]
    fn test_utility_counts_discs() {
        let board = Board::new(&[
            vec![1, 1, 1, 0],
            vec![0, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ])
        .unwrap();
        assert_eq!(utility(&board, Color::Dark), 2);
        assert_eq!(Utility.evaluate(&board, Color::Light), -2);
    }
}
