
use either::Either::{Left, Right};

use super::{
    evaluator::{utility, StaticEvaluator},
    position_table::{Bound, CacheEntry, CacheKey, NodeKind, PositionTable},
    Bounds, DepthLimit, Engine, SearchResult, SearchStats,
};
use crate::{
    board::{Board, Color},
    logger::Logger,
};

pub struct AlphaBeta {
    static_evaluator: Box<dyn StaticEvaluator>,
    depth_limit: DepthLimit,
    caching: bool,
    ordering: bool,
    position_table: PositionTable,
    logger: Logger,
    stats: SearchStats,
}

impl AlphaBeta {
    pub fn new(
        static_evaluator: impl StaticEvaluator + 'static, depth_limit: DepthLimit, caching: bool,
        ordering: bool, log_level: u8,
    ) -> Self {
        AlphaBeta {
            static_evaluator: Box::new(static_evaluator),
            depth_limit,
            caching,
            ordering,
            position_table: PositionTable::new(),
            logger: Logger::new(log_level),
            stats: SearchStats::new(),
        }
    }

    pub fn position_table(&self) -> &PositionTable { &self.position_table }

    pub(crate) fn position_table_mut(&mut self) -> &mut PositionTable { &mut self.position_table }

    /// Gets the best move at a node where `node.mover(color)` is to move,
    /// along with its value for `color`.
    ///
    /// The search runs inside `bounds`. A value at or below `bounds.alpha`
    /// is only an upper bound on the true value, and one at or above
    /// `bounds.beta` is only a lower bound; anything strictly inside is
    /// exact. The table records which case applied.
    fn get_scored_best_move(
        &mut self, board: &Board, color: Color, node: NodeKind, bounds: Bounds, depth: u32,
        ply: usize,
    ) -> SearchResult {
        assert!(!bounds.closed(), "searched with a closed window");

        self.stats.layer(ply).visited += 1;

        let key = self.caching.then(|| CacheKey { board: board.clone(), color, node });

        // Check if there is an existing entry that settles this window
        if let Some(key) = &key {
            if let Some(result) = self.position_table.lookup(key, depth, bounds) {
                self.stats.layer(ply).cached += 1;
                return result;
            }
        }

        let mover = node.mover(color);

        if depth == 0 || !board.has_moves(mover) {
            let result = SearchResult::cutoff(self.static_evaluator.evaluate(board, color));
            if let Some(key) = key {
                self.position_table.store(
                    key,
                    CacheEntry { mv: None, depth, bound: Bound::Exact(result.value) },
                );
            }
            return result;
        }

        self.stats.layer(ply).expanded += 1;

        let is_maxing = node == NodeKind::Max;

        let moves = if self.ordering {
            let mut moves = board.legal_moves(mover);
            // One ply of disc-difference lookahead, best first for whoever is
            // moving. The sort is stable so equal scores keep generation order.
            moves.sort_by_cached_key(|mv| {
                let score = utility(&board.apply_move(mover, *mv), color);
                if is_maxing { -score } else { score }
            });
            Left(moves.into_iter())
        } else {
            Right(board.moves(mover))
        };

        let mut window = bounds;
        let mut best: Option<SearchResult> = None;

        for mv in moves {
            let child = board.apply_move(mover, mv);
            let value =
                self.get_scored_best_move(&child, color, node.child(), window, depth - 1, ply + 1)
                    .value;

            // Ties keep the earlier move
            let improves = best.map_or(true, |best| {
                if is_maxing { value > best.value } else { value < best.value }
            });
            if improves {
                best = Some(SearchResult { mv: Some(mv), value });
                if is_maxing {
                    window.raise_alpha(value);
                } else {
                    window.lower_beta(value);
                }
            }

            if window.closed() {
                self.stats.layer(ply).prunes += 1;
                break;
            }
        }

        let result = best.expect("an expanded node has at least one move");

        if let Some(key) = key {
            self.position_table.store(
                key,
                CacheEntry { mv: result.mv, depth, bound: Bound::from_window(result.value, bounds) },
            );
        }

        result
    }
}

impl Engine for AlphaBeta {
    fn search(&mut self, board: &Board, color: Color) -> SearchResult {
        self.logger.log_lazy(5, || format!("Alpha-beta searching for {:?}:\n{}", color, board));
        self.logger.time_start(2, "alpha-beta search");
        self.stats.reset_statistics();
        self.position_table.reset_debug_info();

        let depth = self.depth_limit.remaining(board);
        let result =
            self.get_scored_best_move(board, color, NodeKind::Max, Bounds::widest(), depth, 0);

        self.logger.time_end(2, "alpha-beta search");
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
