//! Move generation.
//!
//! One routine per piece kind. Each routine consults the pin list for its
//! own square first, so a pinned piece only produces moves along its pin
//! line. King moves are checked against enemy attacks here as well, which
//! leaves the legality filter with nothing to do unless the king is in
//! check.

mod legality;
pub mod perft;

use chess_core::{Color, Move, Piece, Square};

use crate::attacks::{
    exposed_after, square_under_attack, PinRecord, ALL_DIRECTIONS, DIAGONAL, KNIGHT_JUMPS,
    ORTHOGONAL,
};
use crate::position::{CastleSide, CastlingRights};
use crate::Position;

pub use legality::{legal_moves, LegalMoves};

/// The one-ply window in which an en passant capture is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassantWindow {
    /// Square the capturing pawn lands on.
    pub target: Square,
    /// Square of the pawn that just advanced two ranks.
    pub captured: Square,
}

impl EnPassantWindow {
    /// Window opened by `last` if it was a two-square pawn advance.
    pub fn after(last: &Move) -> Option<Self> {
        if last.piece() != Piece::Pawn || last.from().file() != last.to().file() {
            return None;
        }
        let rank_delta = last.to().rank() as i8 - last.from().rank() as i8;
        if rank_delta.abs() != 2 {
            return None;
        }
        let target = last.from().offset(rank_delta / 2, 0)?;
        Some(EnPassantWindow {
            target,
            captured: last.to(),
        })
    }

    /// Window described by a FEN en passant field, for the side to move.
    pub fn from_target(target: Square, mover: Color) -> Option<Self> {
        let captured = target.offset(-mover.forward(), 0)?;
        Some(EnPassantWindow { target, captured })
    }
}

/// Generates moves for one side of a position.
pub struct MoveGenerator<'a> {
    position: &'a Position,
    color: Color,
    pins: &'a [PinRecord],
}

impl<'a> MoveGenerator<'a> {
    pub fn new(position: &'a Position, color: Color, pins: &'a [PinRecord]) -> Self {
        MoveGenerator {
            position,
            color,
            pins,
        }
    }

    fn pin_on(&self, sq: Square) -> Option<&PinRecord> {
        self.pins.iter().find(|pin| pin.square == sq)
    }

    fn pin_allows(&self, from: Square, to: Square) -> bool {
        self.pin_on(from).map_or(true, |pin| pin.allows(to))
    }

    fn is_friendly(&self, sq: Square) -> bool {
        matches!(self.position.piece_at(sq), Some((_, c)) if c == self.color)
    }

    fn enemy_at(&self, sq: Square) -> Option<Piece> {
        match self.position.piece_at(sq) {
            Some((piece, c)) if c != self.color => Some(piece),
            _ => None,
        }
    }

    fn is_attacked(&self, sq: Square) -> bool {
        !square_under_attack(self.position, sq, self.color).is_empty()
    }

    /// Moves for every piece of the side, except castling.
    pub fn pseudo_legal(&self, en_passant: Option<EnPassantWindow>, out: &mut Vec<Move>) {
        for (sq, piece, color) in self.position.pieces() {
            if color != self.color {
                continue;
            }
            match piece {
                Piece::Pawn => self.pawn_moves(sq, en_passant, out),
                Piece::Knight => self.knight_moves(sq, out),
                Piece::Bishop | Piece::Rook | Piece::Queen => self.slider_moves(sq, piece, out),
                Piece::King => self.king_moves(sq, out),
            }
        }
    }

    pub fn pawn_moves(&self, from: Square, en_passant: Option<EnPassantWindow>, out: &mut Vec<Move>) {
        let forward = self.color.forward();

        if let Some(one) = from.offset(forward, 0) {
            if self.position.is_empty(one) {
                if self.pin_allows(from, one) {
                    self.push_pawn_move(from, one, None, out);
                }
                if from.rank() == self.color.pawn_rank() {
                    if let Some(two) = one.offset(forward, 0) {
                        if self.position.is_empty(two) && self.pin_allows(from, two) {
                            out.push(Move::new(from, two, Piece::Pawn, self.color, None));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = from.offset(forward, df) else {
                continue;
            };
            if !self.pin_allows(from, to) {
                continue;
            }
            if let Some(captured) = self.enemy_at(to) {
                self.push_pawn_move(from, to, Some(captured), out);
                continue;
            }
            let Some(window) = en_passant else {
                continue;
            };
            if window.target == to
                && from.offset(0, df) == Some(window.captured)
                && self.enemy_at(window.captured) == Some(Piece::Pawn)
                && !exposed_after(self.position, self.color, &[from, window.captured], to)
            {
                out.push(Move::en_passant(from, to, self.color, window.captured));
            }
        }
    }

    fn push_pawn_move(&self, from: Square, to: Square, captured: Option<Piece>, out: &mut Vec<Move>) {
        if to.rank() == self.color.promotion_rank() {
            for promote_to in Piece::PROMOTIONS {
                out.push(Move::promotion(from, to, self.color, captured, promote_to));
            }
        } else {
            out.push(Move::new(from, to, Piece::Pawn, self.color, captured));
        }
    }

    pub fn knight_moves(&self, from: Square, out: &mut Vec<Move>) {
        // A pinned knight can never stay on its pin line.
        if self.pin_on(from).is_some() {
            return;
        }
        for (dr, df) in KNIGHT_JUMPS {
            if let Some(to) = from.offset(dr, df) {
                if !self.is_friendly(to) {
                    out.push(Move::new(from, to, Piece::Knight, self.color, self.enemy_at(to)));
                }
            }
        }
    }

    pub fn slider_moves(&self, from: Square, piece: Piece, out: &mut Vec<Move>) {
        let directions: &[(i8, i8)] = match piece {
            Piece::Bishop => &DIAGONAL,
            Piece::Rook => &ORTHOGONAL,
            _ => &ALL_DIRECTIONS,
        };
        for &(dr, df) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, df) {
                if !self.pin_allows(from, to) || self.is_friendly(to) {
                    break;
                }
                let captured = self.enemy_at(to);
                out.push(Move::new(from, to, piece, self.color, captured));
                if captured.is_some() {
                    break;
                }
                current = to;
            }
        }
    }

    pub fn king_moves(&self, from: Square, out: &mut Vec<Move>) {
        for (dr, df) in ALL_DIRECTIONS {
            if let Some(to) = from.offset(dr, df) {
                if !self.is_friendly(to) && !self.is_attacked(to) {
                    out.push(Move::new(from, to, Piece::King, self.color, self.enemy_at(to)));
                }
            }
        }
    }

    /// Castling moves allowed by `rights`: king and rook on their home
    /// squares, nothing in between, and the king's start, transit and
    /// destination squares all unattacked.
    pub fn castle_moves(&self, rights: CastlingRights, out: &mut Vec<Move>) {
        let home = self.color.home_rank();
        let Some(king) = Square::new(home, 4) else {
            return;
        };
        if self.position.piece_at(king) != Some((Piece::King, self.color)) || self.is_attacked(king)
        {
            return;
        }

        for side in CastleSide::BOTH {
            if !rights.can_castle(self.color, side) {
                continue;
            }
            let Some(rook_from) = Square::new(home, side.rook_file()) else {
                continue;
            };
            if self.position.piece_at(rook_from) != Some((Piece::Rook, self.color)) {
                continue;
            }

            let step = side.step();
            let mut path_clear = true;
            let mut current = king;
            while let Some(next) = current.offset(0, step) {
                if next == rook_from {
                    break;
                }
                if !self.position.is_empty(next) {
                    path_clear = false;
                    break;
                }
                current = next;
            }
            if !path_clear {
                continue;
            }

            let (Some(transit), Some(destination)) = (king.offset(0, step), king.offset(0, 2 * step))
            else {
                continue;
            };
            if self.is_attacked(transit) || self.is_attacked(destination) {
                continue;
            }
            out.push(Move::castle(king, destination, self.color, rook_from, transit));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attacks::in_pin;
    use chess_core::Fen;

    fn position(fen: &str) -> Position {
        Position::from_board(Fen::parse(fen).unwrap().board)
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn targets(moves: &[Move]) -> Vec<String> {
        let mut names: Vec<String> = moves.iter().map(|m| m.to_notation()).collect();
        names.sort();
        names
    }

    #[test]
    fn pawn_pushes_from_start() {
        let pos = Position::default();
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.pawn_moves(sq("e2"), None, &mut moves);
        assert_eq!(targets(&moves), vec!["e2e3", "e2e4"]);
    }

    #[test]
    fn blocked_double_push() {
        let pos = position("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.pawn_moves(sq("e2"), None, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn promotion_yields_four_moves_per_square() {
        let pos = position("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.pawn_moves(sq("a7"), None, &mut moves);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves.iter().filter(|m| m.is_capture()).count(), 4);
        assert!(moves.iter().all(|m| m.promotion_piece().is_some()));
    }

    #[test]
    fn en_passant_needs_the_window() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.pawn_moves(sq("e5"), None, &mut moves);
        assert_eq!(targets(&moves), vec!["e5e6"]);

        let window = EnPassantWindow::from_target(sq("d6"), Color::White);
        assert_eq!(window.map(|w| w.captured), Some(sq("d5")));
        moves.clear();
        gen.pawn_moves(sq("e5"), window, &mut moves);
        assert_eq!(targets(&moves), vec!["e5d6", "e5e6"]);
        assert!(moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn en_passant_refused_when_rank_opens() {
        let pos = position("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.pawn_moves(sq("b5"), EnPassantWindow::from_target(sq("c6"), Color::White), &mut moves);
        assert_eq!(targets(&moves), vec!["b5b6"]);
    }

    #[test]
    fn window_after_double_push() {
        let mv = Move::new(sq("d7"), sq("d5"), Piece::Pawn, Color::Black, None);
        assert_eq!(
            EnPassantWindow::after(&mv),
            Some(EnPassantWindow {
                target: sq("d6"),
                captured: sq("d5")
            })
        );
        let single = Move::new(sq("d7"), sq("d6"), Piece::Pawn, Color::Black, None);
        assert_eq!(EnPassantWindow::after(&single), None);
        let rook = Move::new(sq("d7"), sq("d5"), Piece::Rook, Color::Black, None);
        assert_eq!(EnPassantWindow::after(&rook), None);
    }

    #[test]
    fn knight_in_corner() {
        let pos = position("4k3/8/8/8/8/8/2P5/N3K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.knight_moves(Square::A1, &mut moves);
        assert_eq!(targets(&moves), vec!["a1b3"]);
    }

    #[test]
    fn pinned_knight_has_no_moves() {
        let pos = position("4k3/8/8/b7/8/2N5/8/4K3 w - - 0 1");
        let pins = in_pin(&pos, Color::White);
        let gen = MoveGenerator::new(&pos, Color::White, &pins);
        let mut moves = Vec::new();
        gen.knight_moves(sq("c3"), &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn pinned_bishop_slides_along_pin() {
        let pos = position("4k3/8/8/b7/8/2B5/8/4K3 w - - 0 1");
        let pins = in_pin(&pos, Color::White);
        let gen = MoveGenerator::new(&pos, Color::White, &pins);
        let mut moves = Vec::new();
        gen.slider_moves(sq("c3"), Piece::Bishop, &mut moves);
        assert_eq!(targets(&moves), vec!["c3a5", "c3b4", "c3d2"]);
        assert!(moves.iter().any(|m| m.captured() == Some(Piece::Bishop)));
    }

    #[test]
    fn rook_stops_at_pieces() {
        let pos = position("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.slider_moves(sq("d4"), Piece::Rook, &mut moves);
        // Left: c4, b4 (capture). Right: e4, f4. Up: d5..d8. Down: d3..d1.
        assert_eq!(moves.len(), 2 + 2 + 4 + 3);
    }

    #[test]
    fn king_avoids_attacked_squares() {
        let pos = position("4k3/8/8/8/8/8/r7/4K3 w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.king_moves(Square::E1, &mut moves);
        assert_eq!(targets(&moves), vec!["e1d1", "e1f1"]);
    }

    #[test]
    fn castling_both_wings() {
        let pos = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.castle_moves(CastlingRights::ALL, &mut moves);
        assert_eq!(targets(&moves), vec!["e1c1", "e1g1"]);
        let kingside = moves.iter().find(|m| m.to() == Square::G1).unwrap();
        assert_eq!(
            kingside.special(),
            Some(chess_core::Special::Castle {
                rook_from: Square::H1,
                rook_to: Square::F1
            })
        );
    }

    #[test]
    fn castling_blocked_by_attacked_transit() {
        // Black rook on f8 covers f1.
        let pos = position("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.castle_moves(CastlingRights::ALL, &mut moves);
        assert_eq!(targets(&moves), vec!["e1c1"]);
    }

    #[test]
    fn queenside_castling_needs_empty_b_file() {
        let pos = position("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.castle_moves(CastlingRights::ALL, &mut moves);
        assert!(moves.is_empty());
    }

    #[test]
    fn queenside_castling_allows_attacked_b_square() {
        // b1 is attacked by the rook on b8 but the king never crosses it.
        let pos = position("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.castle_moves(CastlingRights::ALL, &mut moves);
        assert_eq!(targets(&moves), vec!["e1c1"]);
    }

    #[test]
    fn no_castling_without_rights_or_rook() {
        let pos = position("4k3/8/8/8/8/8/8/4K2R w - - 0 1");
        let gen = MoveGenerator::new(&pos, Color::White, &[]);
        let mut moves = Vec::new();
        gen.castle_moves(CastlingRights::NONE, &mut moves);
        assert!(moves.is_empty());
        gen.castle_moves(CastlingRights::ALL, &mut moves);
        assert_eq!(targets(&moves), vec!["e1g1"]);
    }
}
