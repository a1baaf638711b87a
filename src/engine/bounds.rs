use crate::Score;

/// The (alpha, beta) window of a search. `None` stands for an infinite
/// bound, so the widest window is `(None, None)`.
///
/// - `alpha` is the best value the maximizer can already guarantee on the
///   current path.
/// - `beta` is the best value the minimizer can already guarantee.
///
/// Once `alpha >= beta` the window is closed and the remaining siblings can
/// be pruned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub alpha: Option<Score>,
    pub beta: Option<Score>,
}

impl Bounds {
    pub fn widest() -> Bounds { Bounds { alpha: None, beta: None } }

    pub fn new(alpha: Score, beta: Score) -> Bounds { Bounds { alpha: Some(alpha), beta: Some(beta) } }

    pub fn closed(self) -> bool {
        match (self.alpha, self.beta) {
            (Some(alpha), Some(beta)) => alpha >= beta,
            _ => false,
        }
    }

    /// True if `score` cannot improve on what the maximizer already has.
    pub fn at_most_alpha(self, score: Score) -> bool {
        self.alpha.map_or(false, |alpha| score <= alpha)
    }

    /// True if `score` is at least what the minimizer already has.
    pub fn at_least_beta(self, score: Score) -> bool {
        self.beta.map_or(false, |beta| score >= beta)
    }

    pub fn raise_alpha(&mut self, score: Score) {
        if self.alpha.map_or(true, |alpha| score > alpha) {
            self.alpha = Some(score);
        }
    }

    pub fn lower_beta(&mut self, score: Score) {
        if self.beta.map_or(true, |beta| score < beta) {
            self.beta = Some(score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widest_bounds() {
        let bounds = Bounds::widest();
        assert!(!bounds.closed());
        assert!(!bounds.at_most_alpha(Score::MIN));
        assert!(!bounds.at_least_beta(Score::MAX));
    }

    #[test]
    fn test_raise_and_lower() {
        let mut bounds = Bounds::widest();
        bounds.raise_alpha(3);
        bounds.raise_alpha(1);
        assert_eq!(bounds.alpha, Some(3));
        bounds.lower_beta(8);
        bounds.lower_beta(10);
        assert_eq!(bounds.beta, Some(8));
        assert!(!bounds.closed());
        bounds.lower_beta(3);
        assert!(bounds.closed());
    }

    #[test]
    fn test_inclusive_edges() {
        let bounds = Bounds::new(-2, 4);
        assert!(bounds.at_most_alpha(-2));
        assert!(!bounds.at_most_alpha(-1));
        assert!(bounds.at_least_beta(4));
        assert!(!bounds.at_least_beta(3));
    }
}
