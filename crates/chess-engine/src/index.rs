//! Piece-location index.
//!
//! Kings, queens, rooks and bishops are tracked per color so that attack
//! and pin scans can enumerate them without walking the board. Knights and
//! pawns are found by scanning. The lists are kept sorted by square so
//! that removing and re-adding a piece restores the exact same state.

use chess_core::{Color, Piece, Square};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceIndex {
    kings: [Option<Square>; 2],
    /// Queens, rooks, bishops in that order.
    sliders: [[Vec<Square>; 3]; 2],
}

const fn slot(piece: Piece) -> Option<usize> {
    match piece {
        Piece::Queen => Some(0),
        Piece::Rook => Some(1),
        Piece::Bishop => Some(2),
        _ => None,
    }
}

const SLIDERS: [Piece; 3] = [Piece::Queen, Piece::Rook, Piece::Bishop];

impl PieceIndex {
    /// Builds an index by scanning a full board.
    pub fn from_board(board: &[Option<(Piece, Color)>; 64]) -> Self {
        let mut index = PieceIndex::default();
        for sq in Square::all() {
            if let Some((piece, color)) = board[sq.index() as usize] {
                index.insert(piece, color, sq);
            }
        }
        index
    }

    pub fn insert(&mut self, piece: Piece, color: Color, sq: Square) {
        if piece == Piece::King {
            self.kings[color.index()] = Some(sq);
        } else if let Some(slot) = slot(piece) {
            let list = &mut self.sliders[color.index()][slot];
            if let Err(pos) = list.binary_search(&sq) {
                list.insert(pos, sq);
            }
        }
    }

    pub fn remove(&mut self, piece: Piece, color: Color, sq: Square) {
        if piece == Piece::King {
            if self.kings[color.index()] == Some(sq) {
                self.kings[color.index()] = None;
            }
        } else if let Some(slot) = slot(piece) {
            let list = &mut self.sliders[color.index()][slot];
            if let Ok(pos) = list.binary_search(&sq) {
                list.remove(pos);
            }
        }
    }

    #[inline]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Squares holding `piece` of `color`. Empty for knights, pawns and kings.
    pub fn squares(&self, piece: Piece, color: Color) -> &[Square] {
        match slot(piece) {
            Some(slot) => &self.sliders[color.index()][slot],
            None => &[],
        }
    }

    /// Every queen, rook and bishop of `color` with its square.
    pub fn sliders(&self, color: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        SLIDERS.iter().flat_map(move |&piece| {
            self.squares(piece, color)
                .iter()
                .map(move |&sq| (piece, sq))
        })
    }
}
