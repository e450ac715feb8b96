//! One-ply lookahead: pick the move whose best reply hurts least.

use chess_engine::Game;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::eval::{evaluate, CHECKMATE};
use crate::{SearchError, SearchOutcome};

/// For every own move, plays each opponent reply and keeps the reply's
/// best score from the opponent's side. The own move minimising that score
/// wins; ties are broken at random.
///
/// An own move that leaves the opponent without replies is scored as the
/// resulting position: checkmate is the best possible outcome, stalemate
/// is level.
pub fn greedy_move<R: Rng + ?Sized>(
    game: &mut Game,
    rng: &mut R,
) -> Result<SearchOutcome, SearchError> {
    let opponent = game.side_to_move().opposite();
    let mut nodes = 0u64;
    let mut best = CHECKMATE + 1;
    let mut ties = Vec::new();

    for mv in game.valid_moves() {
        game.make_move(mv)?;
        nodes += 1;

        let replies = game.valid_moves();
        let opponent_best = if replies.is_empty() {
            opponent.sign() * evaluate(game)
        } else {
            let mut max = -CHECKMATE - 1;
            for reply in replies {
                game.make_move(reply)?;
                nodes += 1;
                game.valid_moves();
                max = max.max(opponent.sign() * evaluate(game));
                game.undo_move();
            }
            max
        };

        game.undo_move();

        if opponent_best < best {
            best = opponent_best;
            ties.clear();
            ties.push(mv);
        } else if opponent_best == best {
            ties.push(mv);
        }
    }

    let chosen = ties.choose(rng).copied();
    let score = if chosen.is_some() { -best } else { 0 };
    debug!(
        strategy = "greedy",
        nodes,
        score,
        ties = ties.len(),
        best = ?chosen.map(|mv| mv.to_notation()),
        "search finished"
    );
    Ok(SearchOutcome {
        best: chosen,
        score,
        nodes,
    })
}
