//! Board contents: the 8x8 grid and its piece-location index.

use chess_core::{Color, Move, Piece, Square};
use std::fmt;

use crate::index::PieceIndex;

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// File of the rook's home corner.
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File direction the king travels.
    pub const fn step(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// Castling availability, a (kingside, queenside) pair per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights([[bool; 2]; 2]);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights([[false; 2]; 2]);
    pub const ALL: CastlingRights = CastlingRights([[true; 2]; 2]);

    /// Reads the castling field of a FEN record ("KQkq", "Kq", "").
    pub fn from_fen_field(field: &str) -> Self {
        let mut rights = CastlingRights::NONE;
        for c in field.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::Kingside),
                'Q' => (Color::White, CastleSide::Queenside),
                'k' => (Color::Black, CastleSide::Kingside),
                'q' => (Color::Black, CastleSide::Queenside),
                _ => continue,
            };
            rights.0[color.index()][side as usize] = true;
        }
        rights
    }

    pub fn to_fen_field(self) -> String {
        let mut field = String::new();
        for (color, side, c) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.can_castle(color, side) {
                field.push(c);
            }
        }
        field
    }

    #[inline]
    pub const fn can_castle(self, color: Color, side: CastleSide) -> bool {
        self.0[color.index()][side as usize]
    }

    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Kingside)
    }

    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.can_castle(color, CastleSide::Queenside)
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) {
        self.0[color.index()][side as usize] = false;
    }

    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.0[color.index()] = [false; 2];
    }

    /// The side whose rook starts on `sq` for `color`, if any.
    pub fn side_for_rook_home(color: Color, sq: Square) -> Option<CastleSide> {
        if sq.rank() != color.home_rank() {
            return None;
        }
        CastleSide::BOTH
            .into_iter()
            .find(|side| side.rook_file() == sq.file())
    }
}

/// Mailbox board plus the index of king and slider locations.
///
/// All writes go through [`Position::lift`] and [`Position::place`], which
/// keep the grid and the index in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<(Piece, Color)>; 64],
    index: PieceIndex,
}

impl Position {
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            index: PieceIndex::default(),
        }
    }

    pub fn from_board(board: [Option<(Piece, Color)>; 64]) -> Self {
        let index = PieceIndex::from_board(&board);
        Position { board, index }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.board[sq.index() as usize]
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    #[inline]
    pub fn board(&self) -> &[Option<(Piece, Color)>; 64] {
        &self.board
    }

    #[inline]
    pub fn index(&self) -> &PieceIndex {
        &self.index
    }

    #[inline]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.index.king(color)
    }

    /// Number of pieces of the given kind and color on the board.
    pub fn count(&self, piece: Piece, color: Color) -> usize {
        self.board
            .iter()
            .filter(|cell| **cell == Some((piece, color)))
            .count()
    }

    /// Every occupied square with its content.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Removes and returns whatever stands on `sq`.
    pub fn lift(&mut self, sq: Square) -> Option<(Piece, Color)> {
        let cell = self.board[sq.index() as usize].take();
        if let Some((piece, color)) = cell {
            self.index.remove(piece, color, sq);
        }
        cell
    }

    /// Puts a piece on `sq`, dropping any previous occupant.
    pub fn place(&mut self, sq: Square, piece: Piece, color: Color) {
        debug_assert!(self.is_empty(sq), "placing onto occupied {}", sq);
        self.lift(sq);
        self.board[sq.index() as usize] = Some((piece, color));
        self.index.insert(piece, color, sq);
    }

    /// Moves the occupant of `from` to the empty square `to`.
    pub fn relocate(&mut self, from: Square, to: Square) {
        if let Some((piece, color)) = self.lift(from) {
            self.place(to, piece, color);
        }
    }

    /// A plain move between two squares as seen on this board, recording
    /// whatever stands on `to` as captured. Castling, en passant and
    /// promotion are resolved against the legal move list instead.
    pub fn move_between(&self, from: Square, to: Square) -> Option<Move> {
        let (piece, color) = self.piece_at(from)?;
        let captured = self.piece_at(to).map(|(p, _)| p);
        Some(Move::new(from, to, piece, color, captured))
    }

    /// Whether the index agrees with a fresh scan of the grid.
    pub fn index_is_consistent(&self) -> bool {
        self.index == PieceIndex::from_board(&self.board)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::from_board(chess_core::Fen::startpos().board)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::new(rank, file)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', |(piece, color)| piece.to_fen_char(color));
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
