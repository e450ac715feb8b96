//! Attack and pin analysis.
//!
//! Everything here is computed relative to a defending color: attackers
//! are the defender's opponent's pieces, and the defender's own king is
//! transparent to sliding scans so that a check ray carries on past the
//! king onto the squares it might try to step back into.

use chess_core::{Color, Piece, Square};

use crate::Position;

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// A piece attacking a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRecord {
    /// Where the attacker stands.
    pub square: Square,
    /// Unit step from the attacked square toward the attacker. `None` for
    /// knights, whose attacks are not along a line.
    pub direction: Option<(i8, i8)>,
    pub piece: Piece,
}

impl AttackRecord {
    /// Squares a defender may move to in order to stop this attack on
    /// `target`: the attacker's own square, plus the line in between when
    /// the attacker slides.
    pub fn blocking_squares(&self, target: Square) -> Vec<Square> {
        let mut squares = Vec::new();
        if let (true, Some((dr, df))) = (self.piece.is_slider(), self.direction) {
            let mut current = target;
            while let Some(next) = current.offset(dr, df) {
                squares.push(next);
                if next == self.square {
                    break;
                }
                current = next;
            }
        } else {
            squares.push(self.square);
        }
        squares
    }
}

/// A piece that cannot leave the line between its king and an enemy slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinRecord {
    pub square: Square,
    /// Unit step along the pin line, pointing toward the pinned piece's king.
    pub direction: (i8, i8),
}

impl PinRecord {
    /// Whether moving the pinned piece from its square to `to` keeps it on
    /// the pin line.
    pub fn allows(&self, to: Square) -> bool {
        let (dr, df) = self.direction;
        match self.square.direction_to(to) {
            Some(step) => step == (dr, df) || step == (-dr, -df),
            None => false,
        }
    }
}

/// Every piece of `defender`'s opponent that attacks `target`.
///
/// Two pawns hitting the same square are both reported, and the edge files
/// are handled the same way on both wings.
pub fn square_under_attack(position: &Position, target: Square, defender: Color) -> Vec<AttackRecord> {
    let enemy = defender.opposite();
    let own_king = position.king(defender);
    let mut attackers = Vec::new();

    for (piece, from) in position.index().sliders(enemy) {
        let Some(direction) = target.direction_to(from) else {
            continue;
        };
        if !piece.slides_along(direction) {
            continue;
        }
        if line_is_clear(position, target, from, direction, own_king) {
            attackers.push(AttackRecord {
                square: from,
                direction: Some(direction),
                piece,
            });
        }
    }

    for (dr, df) in KNIGHT_JUMPS {
        if let Some(from) = target.offset(dr, df) {
            if position.piece_at(from) == Some((Piece::Knight, enemy)) {
                attackers.push(AttackRecord {
                    square: from,
                    direction: None,
                    piece: Piece::Knight,
                });
            }
        }
    }

    // An enemy pawn captures toward its own forward direction, so it
    // stands one rank behind the target from its point of view.
    let behind = -enemy.forward();
    for df in [-1, 1] {
        if let Some(from) = target.offset(behind, df) {
            if position.piece_at(from) == Some((Piece::Pawn, enemy)) {
                attackers.push(AttackRecord {
                    square: from,
                    direction: Some((behind, df)),
                    piece: Piece::Pawn,
                });
            }
        }
    }

    if let Some(king) = position.king(enemy) {
        if let Some(direction) = target.direction_to(king) {
            if target.offset(direction.0, direction.1) == Some(king) {
                attackers.push(AttackRecord {
                    square: king,
                    direction: Some(direction),
                    piece: Piece::King,
                });
            }
        }
    }

    attackers
}

fn line_is_clear(
    position: &Position,
    from: Square,
    to: Square,
    (dr, df): (i8, i8),
    transparent: Option<Square>,
) -> bool {
    let mut current = from;
    while let Some(next) = current.offset(dr, df) {
        if next == to {
            return true;
        }
        if !position.is_empty(next) && Some(next) != transparent {
            return false;
        }
        current = next;
    }
    false
}

/// Pieces of `color` pinned against their own king.
pub fn in_pin(position: &Position, color: Color) -> Vec<PinRecord> {
    let Some(king) = position.king(color) else {
        return Vec::new();
    };
    let mut pins = Vec::new();

    for (piece, slider) in position.index().sliders(color.opposite()) {
        let Some((dr, df)) = king.direction_to(slider) else {
            continue;
        };
        if !piece.slides_along((dr, df)) {
            continue;
        }

        let mut between = None;
        let mut blockers = 0;
        let mut current = king;
        while let Some(next) = current.offset(dr, df) {
            if next == slider {
                break;
            }
            if let Some((_, owner)) = position.piece_at(next) {
                blockers += 1;
                if owner == color {
                    between = Some(next);
                } else {
                    break;
                }
            }
            current = next;
        }

        if let (1, Some(square)) = (blockers, between) {
            pins.push(PinRecord {
                square,
                direction: (-dr, -df),
            });
        }
    }

    pins
}

/// Whether `color`'s king would be hit along a rank, file or diagonal once
/// `vacated` squares are emptied and `landing` is occupied.
///
/// This catches the en passant case where the capturing and the captured
/// pawn leave the king's line together, which the pin scan cannot see
/// because two pieces stood in between.
pub fn exposed_after(
    position: &Position,
    color: Color,
    vacated: &[Square],
    landing: Square,
) -> bool {
    let Some(king) = position.king(color) else {
        return false;
    };
    let enemy = color.opposite();

    for (dr, df) in ALL_DIRECTIONS {
        let mut current = king;
        while let Some(next) = current.offset(dr, df) {
            current = next;
            if next == landing {
                break;
            }
            if vacated.contains(&next) {
                continue;
            }
            match position.piece_at(next) {
                None => continue,
                Some((piece, owner)) => {
                    if owner == enemy && piece.slides_along((dr, df)) {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}
