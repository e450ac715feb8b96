//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a fixed depth.
//! The counts for well-known positions are published, so any mismatch
//! points at a generation or make/undo bug.

use crate::{Game, GameError};

/// Counts the leaf nodes at the given depth.
pub fn perft(game: &mut Game, depth: u32) -> Result<u64, GameError> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = game.valid_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        game.make_move(mv)?;
        nodes += perft(game, depth - 1)?;
        game.undo_move();
    }
    Ok(nodes)
}

/// Node count below each root move, sorted by move notation. Handy for
/// locating which subtree disagrees with a reference engine.
pub fn perft_divide(game: &mut Game, depth: u32) -> Result<Vec<(String, u64)>, GameError> {
    let moves = game.valid_moves();
    let mut results = Vec::with_capacity(moves.len());

    for mv in moves {
        game.make_move(mv)?;
        let nodes = if depth > 1 {
            perft(game, depth - 1)?
        } else {
            1
        };
        game.undo_move();
        results.push((mv.to_notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}
