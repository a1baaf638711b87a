use super::{
    evaluator::StaticEvaluator,
    position_table::{Bound, CacheEntry, CacheKey, NodeKind, PositionTable},
    Bounds, DepthLimit, Engine, SearchResult, SearchStats,
};
use crate::{
    board::{Board, Color},
    logger::Logger,
};

/// Exhaustive depth-limited minimax. Move ordering has nothing to speed up
/// here, so there is no ordering option.
pub struct Minimax {
    static_evaluator: Box<dyn StaticEvaluator>,
    depth_limit: DepthLimit,
    caching: bool,
    position_table: PositionTable,
    logger: Logger,
    stats: SearchStats,
}

impl Minimax {
    pub fn new(
        static_evaluator: impl StaticEvaluator + 'static, depth_limit: DepthLimit, caching: bool,
        log_level: u8,
    ) -> Self {
        Minimax {
            static_evaluator: Box::new(static_evaluator),
            depth_limit,
            caching,
            position_table: PositionTable::new(),
            logger: Logger::new(log_level),
            stats: SearchStats::new(),
        }
    }

    pub fn position_table(&self) -> &PositionTable { &self.position_table }

    /// Evaluates a node where `node.mover(color)` is to move, with `depth`
    /// plies left. Values are always from `color`'s point of view.
    fn evaluate_node(
        &mut self, board: &Board, color: Color, node: NodeKind, depth: u32, ply: usize,
    ) -> SearchResult {
        self.stats.layer(ply).visited += 1;

        let key = self.caching.then(|| CacheKey { board: board.clone(), color, node });

        if let Some(key) = &key {
            if let Some(result) = self.position_table.lookup(key, depth, Bounds::widest()) {
                self.stats.layer(ply).cached += 1;
                return result;
            }
        }

        let mover = node.mover(color);
        let moves = if depth == 0 { Vec::new() } else { board.legal_moves(mover) };

        let result = if moves.is_empty() {
            SearchResult::cutoff(self.static_evaluator.evaluate(board, color))
        } else {
            self.stats.layer(ply).expanded += 1;
            let is_maxing = node == NodeKind::Max;
            let mut best: Option<SearchResult> = None;

            for mv in moves {
                let child = board.apply_move(mover, mv);
                let value = self.evaluate_node(&child, color, node.child(), depth - 1, ply + 1).value;

                // Ties keep the earlier move
                let improves = best.map_or(true, |best| {
                    if is_maxing { value > best.value } else { value < best.value }
                });
                if improves {
                    best = Some(SearchResult { mv: Some(mv), value });
                }
            }

            best.expect("an expanded node has at least one move")
        };

        if let Some(key) = key {
            self.position_table.store(
                key,
                CacheEntry { mv: result.mv, depth, bound: Bound::Exact(result.value) },
            );
        }

        result
    }
}

impl Engine for Minimax {
    fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.logger.log_lazy(5, || format!("Minimax searching for {:?}:\n{}", color, board));
        self.logger.time_start(2, "minimax search");
        self.stats.reset_statistics();
        self.position_table.reset_debug_info();

        let depth = self.depth_limit.remaining(board);
        let result = self.evaluate_node(board, color, NodeKind::Max, depth, 0);

        self.logger.time_end(2, "minimax search");
        self.logger.log_lazy(2, || match result.mv {
            Some(mv) => format!("Depth {}: move {} with value {}", depth, mv, result.value),
            None => format!("Depth {}: no move, value {}", depth, result.value),
        });
        self.logger.log_lazy(6, || self.stats.statistics());
        if self.caching {
            self.logger.log_lazy(6, || self.position_table.info());
        }

        result
    }

    fn stats(&self) -> &SearchStats { &self.stats }

    fn logger(&self) -> &Logger { &self.logger }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::{board::Move, engine::evaluator::{utility, Utility}, Score};

    /// Counts how many times it is asked for an evaluation.
    struct Counting(Rc<Cell<usize>>);

    impl StaticEvaluator for Counting {
        fn evaluate(&self, board: &Board, color: Color) -> Score {
            self.0.set(self.0.get() + 1);
            utility(board, color)
        }
    }

    fn search(board: &Board, color: Color, limit: DepthLimit, caching: bool) -> SearchResult {
        Minimax::new(Utility, limit, caching, 0).search(board, color)
    }

    #[test]
    fn test_depth_one_opening() {
        let board = Board::starting(4);
        let result = search(&board, Color::Dark, DepthLimit::Plies(1), false);
        assert_eq!(result, SearchResult { mv: Some(Move::new(0, 1)), value: 3 });
    }

    #[test]
    fn test_depth_zero_evaluates_once() {
        let calls = Rc::new(Cell::new(0));
        let board = Board::starting(6);
        let mut engine = Minimax::new(Counting(calls.clone()), DepthLimit::Plies(0), false, 0);
        let result = engine.search(&board, Color::Light);
        assert_eq!(result, SearchResult::cutoff(utility(&board, Color::Light)));
        assert_eq!(calls.get(), 1);
        assert_eq!(engine.stats().total().expanded, 0);
    }

    #[test]
    fn test_no_moves_is_cutoff_at_any_depth() {
        let board = Board::new(&[
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 0, 0],
            vec![1, 1, 0, 0],
        ])
        .unwrap();
        for limit in [DepthLimit::Plies(1), DepthLimit::Plies(4), DepthLimit::Unbounded] {
            assert_eq!(
                search(&board, Color::Light, limit, false),
                SearchResult::cutoff(utility(&board, Color::Light))
            );
        }
    }

    #[test]
    fn test_min_node_picks_opponent_reply() {
        // The four openings are symmetric, so the root value is whatever
        // light's most damaging reply to the chosen one leaves dark with.
        let board = Board::starting(4);
        let result = search(&board, Color::Dark, DepthLimit::Plies(2), false);
        let mv = result.mv.unwrap();
        let after = board.apply_move(Color::Dark, mv);
        let worst = after
            .legal_moves(Color::Light)
            .into_iter()
            .map(|reply| utility(&after.apply_move(Color::Light, reply), Color::Dark))
            .min()
            .unwrap();
        assert_eq!(result.value, worst);
    }

    #[test]
    fn test_caching_keeps_root_value() {
        let board = Board::starting(4);
        for limit in [DepthLimit::Plies(3), DepthLimit::Plies(5), DepthLimit::Unbounded] {
            let plain = search(&board, Color::Dark, limit, false);
            let mut engine = Minimax::new(Utility, limit, true, 0);
            let cached = engine.search(&board, Color::Dark);
            assert_eq!(plain, cached);
            assert!(!engine.position_table().is_empty());
        }
    }

    #[test]
    fn test_caching_resolves_transpositions() {
        let board = Board::starting(4);
        let mut engine = Minimax::new(Utility, DepthLimit::Unbounded, true, 0);
        engine.search(&board, Color::Dark);
        assert!(engine.stats().total().cached > 0);
        assert!(engine.position_table().hits() > 0);
    }

    #[test]
    fn test_disabled_cache_is_untouched_and_deterministic() {
        let board = Board::starting(6);
        let mut engine = Minimax::new(Utility, DepthLimit::Plies(3), false, 0);
        let first = engine.search(&board, Color::Dark);
        let second = engine.search(&board, Color::Dark);
        assert_eq!(first, second);
        assert!(engine.position_table().is_empty());
    }
}
