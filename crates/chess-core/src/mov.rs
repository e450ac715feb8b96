//! Move representation.

use crate::{Color, Piece, Square};
use std::fmt;

/// Extra information a move needs beyond its two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    /// The captured pawn stands beside the destination, not on it.
    EnPassant { captured: Square },
    /// The king moves two squares and the rook jumps over it.
    Castle { rook_from: Square, rook_to: Square },
    /// The pawn is replaced by this kind on arrival.
    Promotion(Piece),
}

/// One ply.
///
/// A move carries everything needed to apply it and to take it back:
/// the mover, what it captures and any special payload. Equality covers
/// the whole record, so e7e8=Q and e7e8=N are different moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    color: Color,
    captured: Option<Piece>,
    special: Option<Special>,
}

impl Move {
    /// A plain move or capture.
    #[inline]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        color: Color,
        captured: Option<Piece>,
    ) -> Self {
        Move {
            from,
            to,
            piece,
            color,
            captured,
            special: None,
        }
    }

    /// A pawn capturing en passant; `captured` is the square of the taken pawn.
    pub const fn en_passant(from: Square, to: Square, color: Color, captured: Square) -> Self {
        Move {
            from,
            to,
            piece: Piece::Pawn,
            color,
            captured: Some(Piece::Pawn),
            special: Some(Special::EnPassant { captured }),
        }
    }

    /// A castling move, expressed as the king's two-square step.
    pub const fn castle(
        from: Square,
        to: Square,
        color: Color,
        rook_from: Square,
        rook_to: Square,
    ) -> Self {
        Move {
            from,
            to,
            piece: Piece::King,
            color,
            captured: None,
            special: Some(Special::Castle { rook_from, rook_to }),
        }
    }

    /// A pawn reaching the last rank and becoming `promote_to`.
    pub const fn promotion(
        from: Square,
        to: Square,
        color: Color,
        captured: Option<Piece>,
        promote_to: Piece,
    ) -> Self {
        Move {
            from,
            to,
            piece: Piece::Pawn,
            color,
            captured,
            special: Some(Special::Promotion(promote_to)),
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The kind of the moving piece (a pawn for promotions).
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Kind of the captured piece; its color is always the opponent's.
    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn special(&self) -> Option<Special> {
        self.special
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self.special, Some(Special::Castle { .. }))
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.special, Some(Special::EnPassant { .. }))
    }

    pub const fn promotion_piece(&self) -> Option<Piece> {
        match self.special {
            Some(Special::Promotion(piece)) => Some(piece),
            _ => None,
        }
    }

    /// Square the captured piece is removed from.
    pub const fn capture_square(&self) -> Option<Square> {
        match (self.captured, self.special) {
            (None, _) => None,
            (Some(_), Some(Special::EnPassant { captured })) => Some(captured),
            (Some(_), _) => Some(self.to),
        }
    }

    /// Start and end square in coordinate form, e.g. "e2e4". Promotions
    /// append the chosen piece letter ("e7e8q").
    pub fn to_notation(&self) -> String {
        self.to_string()
    }

    /// Splits coordinate notation into its squares and optional promotion
    /// letter. The result is matched against generated moves by the caller.
    pub fn parse_notation(s: &str) -> Option<(Square, Square, Option<Piece>)> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => match Piece::from_letter(c)? {
                Piece::King | Piece::Pawn => return None,
                piece => Some(piece),
            },
            None => None,
        };
        Some((from, to, promotion))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {} {}", self, self.color, self.piece)?;
        if let Some(captured) = self.captured {
            write!(f, " x{}", captured)?;
        }
        if self.is_castle() {
            f.write_str(" castle")?;
        } else if self.is_en_passant() {
            f.write_str(" e.p.")?;
        }
        f.write_str(")")
    }
}
