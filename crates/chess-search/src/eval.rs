//! Static evaluation.

use chess_core::{Color, Piece};
use chess_engine::{Game, GameStatus, Position};

/// Score of a won game. Larger than any material balance.
pub const CHECKMATE: i32 = 10_000;
pub const STALEMATE: i32 = 0;

/// Material value of a piece. The king has none; losing it is scored
/// through [`CHECKMATE`] instead.
pub const fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 1,
        Piece::Knight | Piece::Bishop => 3,
        Piece::Rook => 5,
        Piece::Queen => 9,
        Piece::King => 0,
    }
}

/// Material balance, positive when White is ahead.
pub fn material(position: &Position) -> i32 {
    position
        .pieces()
        .map(|(_, piece, color)| match color {
            Color::White => piece_value(piece),
            Color::Black => -piece_value(piece),
        })
        .sum()
}

/// Score of the game, positive when White is better.
///
/// Relies on the status computed by the last `valid_moves` call, so a
/// mated or stalemated side is only recognised once its moves have been
/// generated.
pub fn evaluate(game: &Game) -> i32 {
    match game.status() {
        GameStatus::Checkmate => -game.side_to_move().sign() * CHECKMATE,
        GameStatus::Stalemate => STALEMATE,
        GameStatus::Ongoing => material(game.position()),
    }
}
