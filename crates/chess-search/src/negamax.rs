//! Depth-limited negamax with optional alpha-beta pruning.

use chess_core::Move;
use chess_engine::Game;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::eval::{evaluate, CHECKMATE};
use crate::{SearchError, SearchOutcome};

/// Bound outside every reachable score.
const INFINITY: i32 = CHECKMATE + 1;

/// Negamax searcher. Scores are from the side to move's point of view.
#[derive(Debug, Clone)]
pub struct Searcher {
    pruning: bool,
    nodes: u64,
}

impl Searcher {
    pub fn new(pruning: bool) -> Self {
        Self { pruning, nodes: 0 }
    }

    /// Positions visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Best move at `depth` plies. Equally scored moves are all kept and
    /// one is drawn with `rng`, so pruning never changes which moves are
    /// candidates.
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        game: &mut Game,
        depth: u32,
        rng: &mut R,
    ) -> Result<SearchOutcome, SearchError> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        self.nodes = 0;

        let moves = game.valid_moves();
        let mut best = -INFINITY;
        let mut ties: Vec<Move> = Vec::new();

        for mv in moves {
            game.make_move(mv)?;
            self.nodes += 1;
            // One below the best so far keeps equal scores exact.
            let beta = if self.pruning && best > -INFINITY {
                -(best - 1)
            } else {
                INFINITY
            };
            let score = -self.negamax(game, depth - 1, -INFINITY, beta)?;
            game.undo_move();
            trace!(mv = %mv, score, "root move");

            if score > best {
                best = score;
                ties.clear();
                ties.push(mv);
            } else if score == best {
                ties.push(mv);
            }
        }

        let chosen = ties.choose(rng).copied();
        let score = if chosen.is_some() { best } else { evaluate_for_mover(game) };
        debug!(
            strategy = "negamax",
            depth,
            pruning = self.pruning,
            nodes = self.nodes,
            score,
            ties = ties.len(),
            best = ?chosen.map(|mv| mv.to_notation()),
            "search finished"
        );
        Ok(SearchOutcome {
            best: chosen,
            score,
            nodes: self.nodes,
        })
    }

    /// Fail-soft negamax. Move generation runs at every node, leaves
    /// included, so mates and stalemates are scored where they occur.
    pub fn negamax(
        &mut self,
        game: &mut Game,
        depth: u32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, SearchError> {
        let moves = game.valid_moves();
        if depth == 0 || moves.is_empty() {
            return Ok(evaluate_for_mover(game));
        }

        #[cfg(debug_assertions)]
        let snapshot = game.clone();

        let mut best = -INFINITY;
        for mv in moves {
            game.make_move(mv)?;
            self.nodes += 1;
            let score = -self.negamax(game, depth - 1, -beta, -alpha)?;
            game.undo_move();
            #[cfg(debug_assertions)]
            debug_assert_eq!(*game, snapshot, "search left the game changed after {}", mv);

            best = best.max(score);
            alpha = alpha.max(score);
            if self.pruning && alpha >= beta {
                break;
            }
        }
        Ok(best)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(true)
    }
}

fn evaluate_for_mover(game: &Game) -> i32 {
    game.side_to_move().sign() * evaluate(game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn best(fen: &str, depth: u32, pruning: bool) -> SearchOutcome {
        let mut rng = StdRng::seed_from_u64(42);
        let mut game = Game::from_fen(fen).unwrap();
        Searcher::new(pruning).search(&mut game, depth, &mut rng).unwrap()
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new();
        let err = Searcher::default().search(&mut game, 0, &mut rng).unwrap_err();
        assert!(matches!(err, SearchError::ZeroDepth));
    }

    #[test]
    fn depth_one_takes_free_material() {
        let outcome = best("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", 1, true);
        assert_eq!(outcome.best.map(|m| m.to_notation()), Some("d2d5".to_string()));
        assert_eq!(outcome.score, 5);
    }

    #[test]
    fn finds_back_rank_mate() {
        for pruning in [false, true] {
            let outcome = best("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 1, pruning);
            assert_eq!(outcome.best.map(|m| m.to_notation()), Some("a1a8".to_string()));
            assert_eq!(outcome.score, CHECKMATE);
        }
    }

    #[test]
    fn sees_the_poisoned_capture() {
        // Rxd5 wins a pawn at depth 1 but loses the rook to exd5 at depth 2.
        let fen = "4k3/8/4p3/3p4/8/8/3R4/4K3 w - - 0 1";
        let shallow = best(fen, 1, true);
        assert_eq!(shallow.best.map(|m| m.to_notation()), Some("d2d5".to_string()));
        let deep = best(fen, 2, true);
        assert_ne!(deep.best.map(|m| m.to_notation()), Some("d2d5".to_string()));
    }

    #[test]
    fn pruning_visits_fewer_nodes_with_same_score() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        let full = best(fen, 3, false);
        let pruned = best(fen, 3, true);
        assert_eq!(full.score, pruned.score);
        assert!(pruned.nodes < full.nodes);
    }

    #[test]
    fn terminal_root_has_no_move() {
        let outcome = best("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2, true);
        assert_eq!(outcome.best, None);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn search_restores_the_game() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = Game::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let before = game.clone();
        Searcher::new(true).search(&mut game, 2, &mut rng).unwrap();
        assert_eq!(game, before);
    }
}
