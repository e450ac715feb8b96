//! Check-aware filtering of generated moves.

use chess_core::{Color, Move, Piece};

use super::{EnPassantWindow, MoveGenerator};
use crate::attacks::{in_pin, square_under_attack};
use crate::position::CastlingRights;
use crate::Position;

/// Result of a full legal move generation.
#[derive(Debug, Clone, Default)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    /// Whether the side to move was in check.
    pub in_check: bool,
}

/// All legal moves for `color`.
///
/// With no check, generation is already legal. With one checker, only king
/// moves and moves onto the checker's blocking squares survive. With two,
/// only the king may move.
pub fn legal_moves(
    position: &Position,
    color: Color,
    castling: CastlingRights,
    en_passant: Option<EnPassantWindow>,
) -> LegalMoves {
    let Some(king) = position.king(color) else {
        return LegalMoves::default();
    };

    let checks = square_under_attack(position, king, color);
    let pins = in_pin(position, color);
    let generator = MoveGenerator::new(position, color, &pins);
    let mut moves = Vec::with_capacity(48);

    match checks.as_slice() {
        [] => {
            generator.pseudo_legal(en_passant, &mut moves);
            generator.castle_moves(castling, &mut moves);
        }
        [checker] => {
            generator.pseudo_legal(en_passant, &mut moves);
            let blocks = checker.blocking_squares(king);
            moves.retain(|mv| {
                mv.piece() == Piece::King
                    || blocks.contains(&mv.to())
                    || (mv.is_en_passant() && mv.capture_square() == Some(checker.square))
            });
        }
        _ => generator.king_moves(king, &mut moves),
    }

    LegalMoves {
        moves,
        in_check: !checks.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Fen, Square};

    fn legal(fen: &str) -> LegalMoves {
        let fen = Fen::parse(fen).unwrap();
        let window = fen
            .en_passant
            .and_then(|target| EnPassantWindow::from_target(target, fen.side_to_move));
        let position = Position::from_board(fen.board);
        legal_moves(
            &position,
            fen.side_to_move,
            CastlingRights::from_fen_field(&fen.castling),
            window,
        )
    }

    fn names(result: &LegalMoves) -> Vec<String> {
        let mut names: Vec<String> = result.moves.iter().map(|m| m.to_notation()).collect();
        names.sort();
        names
    }

    #[test]
    fn twenty_moves_from_start() {
        let result = legal(Fen::STARTPOS);
        assert_eq!(result.moves.len(), 20);
        assert!(!result.in_check);
    }

    #[test]
    fn knight_check_cannot_be_blocked() {
        // Knight on d3 checks the king on e1. The rook cannot interpose.
        let result = legal("4k3/8/8/8/8/3n4/8/R3K3 w Q - 0 1");
        assert!(result.in_check);
        assert_eq!(
            names(&result),
            vec!["e1d1", "e1d2", "e1e2", "e1f1"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn slider_check_can_be_blocked() {
        // Rook e8 checks e1; the bishop can interpose on e2 or e4.
        let result = legal("4r1k1/8/8/8/8/3B4/8/4K3 w - - 0 1");
        assert!(result.in_check);
        let names = names(&result);
        assert!(names.contains(&"d3e2".to_string()));
        assert!(names.contains(&"d3e4".to_string()));
        assert!(!names.contains(&"d3c4".to_string()));
        assert!(!names.contains(&"e1e2".to_string()));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        // Rook e8 and bishop b4 both give check.
        let result = legal("4r1k1/8/8/8/1b6/8/8/4K2N w - - 0 1");
        assert!(result.in_check);
        assert!(!result.moves.is_empty());
        assert!(result.moves.iter().all(|m| m.piece() == Piece::King));
    }

    #[test]
    fn pawn_checker_can_be_taken_en_passant() {
        // Black just played d7d5 with check on the king on e4.
        let result = legal("4k3/8/8/3pP3/4K3/8/8/8 w - d6 0 1");
        assert!(result.in_check);
        assert!(result
            .moves
            .iter()
            .any(|m| m.is_en_passant() && m.to() == Square::from_algebraic("d6").unwrap()));
    }

    #[test]
    fn checkmate_has_no_moves() {
        let result = legal("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(result.in_check);
        assert!(result.moves.is_empty());
    }

    #[test]
    fn stalemate_has_no_moves_and_no_check() {
        let result = legal("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!result.in_check);
        assert!(result.moves.is_empty());
    }

    #[test]
    fn missing_king_yields_nothing() {
        let position = Position::empty();
        let result = legal_moves(&position, Color::White, CastlingRights::ALL, None);
        assert!(result.moves.is_empty());
        assert!(!result.in_check);
    }
}
