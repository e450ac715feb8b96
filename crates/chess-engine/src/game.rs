//! The mutable game state: board, turn, castling rights and move log.
//!
//! [`Game`] is the single writer of a position. Moves are applied in place
//! with [`Game::make_move`] and taken back with [`Game::undo_move`]; the log
//! is a strict LIFO stack of [`MoveRecord`]s, each holding what undo needs
//! beyond the move itself.

use chess_core::{Color, Fen, FenError, Move, Piece, Special, Square};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

use crate::attacks::{in_pin, square_under_attack, AttackRecord, PinRecord};
use crate::movegen::{legal_moves, EnPassantWindow, LegalMoves};
use crate::position::{CastlingRights, Position};

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move was not generated against the current board.
    #[error("move {0} does not fit the current board")]
    StaleMove(String),
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// Several promotions match and no promotion piece was chosen.
    #[error("promotion piece required for {0}")]
    PromotionChoiceRequired(String),
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    /// The game has already ended in checkmate or stalemate.
    #[error("game has already ended")]
    GameOver,
    #[error("position must have exactly one {0} king")]
    KingCount(Color),
    /// The side that just moved would have left its king attacked.
    #[error("{0} king is attacked but it is not {0}'s turn")]
    WaitingSideInCheck(Color),
    #[error(transparent)]
    Fen(#[from] FenError),
}

/// Whether the side to move can still play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => f.write_str("ongoing"),
            GameStatus::Checkmate => f.write_str("checkmate"),
            GameStatus::Stalemate => f.write_str("stalemate"),
        }
    }
}

/// One entry of the move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    /// Castling rights before the move.
    pub prior_castling: CastlingRights,
    pub prior_halfmove_clock: u32,
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    position: Position,
    side_to_move: Color,
    castling: CastlingRights,
    log: Vec<MoveRecord>,
    status: GameStatus,
    promotion_target: Option<Piece>,
    /// En passant target from the FEN the game was loaded from. Only
    /// consulted while the log is empty.
    initial_en_passant: Option<Square>,
    initial_side: Color,
    initial_fullmove: u32,
    halfmove_clock: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// A game at the standard starting position.
    pub fn new() -> Self {
        Self::build(Fen::startpos())
    }

    /// Loads a game from FEN. The position must have one king per side.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fen = Fen::parse(fen)?;
        for color in Color::BOTH {
            let kings = fen
                .board
                .iter()
                .filter(|cell| **cell == Some((Piece::King, color)))
                .count();
            if kings != 1 {
                return Err(GameError::KingCount(color));
            }
        }

        let waiting = fen.side_to_move.opposite();
        let position = Position::from_board(fen.board);
        let exposed = position
            .king(waiting)
            .is_some_and(|king| !square_under_attack(&position, king, waiting).is_empty());
        if exposed {
            return Err(GameError::WaitingSideInCheck(waiting));
        }
        Ok(Self::build(fen))
    }

    fn build(fen: Fen) -> Self {
        let mut game = Game {
            position: Position::from_board(fen.board),
            side_to_move: fen.side_to_move,
            castling: CastlingRights::from_fen_field(&fen.castling),
            log: Vec::new(),
            status: GameStatus::Ongoing,
            promotion_target: None,
            initial_en_passant: fen.en_passant,
            initial_side: fen.side_to_move,
            initial_fullmove: fen.fullmove_number,
            halfmove_clock: fen.halfmove_clock,
        };
        game.valid_moves();
        game
    }

    /// Back to the standard starting position with an empty log.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn to_fen(&self) -> String {
        let plies = self.log.len() as u32 + u32::from(self.initial_side == Color::Black);
        Fen {
            board: *self.position.board(),
            side_to_move: self.side_to_move,
            castling: self.castling.to_fen_field(),
            en_passant: self.en_passant_window().map(|window| window.target),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.initial_fullmove + plies / 2,
        }
        .to_string()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.position.piece_at(sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Status as of the last [`Game::valid_moves`] call.
    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_checkmate(&self) -> bool {
        self.status == GameStatus::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.status == GameStatus::Stalemate
    }

    /// Whether the side to move is in check right now.
    pub fn is_check(&self) -> bool {
        self.position
            .king(self.side_to_move)
            .is_some_and(|king| !self.square_under_attack(king).is_empty())
    }

    pub fn move_log(&self) -> &[MoveRecord] {
        &self.log
    }

    pub fn ply_count(&self) -> usize {
        self.log.len()
    }

    pub fn promotion_target(&self) -> Option<Piece> {
        self.promotion_target
    }

    /// Piece used by [`Game::resolve_move`] to pick among promotion moves.
    /// It stays set until changed.
    pub fn set_promotion_target(&mut self, piece: Option<Piece>) {
        self.promotion_target = piece;
    }

    /// Enemy pieces attacking `sq`, from the side to move's point of view.
    pub fn square_under_attack(&self, sq: Square) -> Vec<AttackRecord> {
        square_under_attack(&self.position, sq, self.side_to_move)
    }

    /// Pieces of the side to move pinned against their king.
    pub fn in_pin(&self) -> Vec<PinRecord> {
        in_pin(&self.position, self.side_to_move)
    }

    /// The en passant capture open to the side to move, if any.
    pub fn en_passant_window(&self) -> Option<EnPassantWindow> {
        match self.log.last() {
            Some(record) => EnPassantWindow::after(&record.mv),
            None => self
                .initial_en_passant
                .and_then(|target| EnPassantWindow::from_target(target, self.side_to_move)),
        }
    }

    /// All legal moves for the side to move.
    ///
    /// Also refreshes the status: an empty result means checkmate when the
    /// king is attacked and stalemate otherwise.
    pub fn valid_moves(&mut self) -> Vec<Move> {
        let LegalMoves { moves, in_check } = legal_moves(
            &self.position,
            self.side_to_move,
            self.castling,
            self.en_passant_window(),
        );

        let status = match (moves.is_empty(), in_check) {
            (false, _) => GameStatus::Ongoing,
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
        };
        if status.is_terminal() && status != self.status {
            debug!(%status, side = %self.side_to_move, ply = self.log.len(), "game over");
        }
        self.status = status;
        moves
    }

    /// Applies a move generated for the current position.
    ///
    /// The move is checked against the board before anything changes: the
    /// mover, the captured piece and any castling rook must be where the
    /// move says. Full legality is not re-checked.
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.check_fits(&mv)?;

        let record = MoveRecord {
            mv,
            prior_castling: self.castling,
            prior_halfmove_clock: self.halfmove_clock,
        };
        self.apply(&mv);
        self.update_castling(&mv);
        self.halfmove_clock = if mv.piece() == Piece::Pawn || mv.is_capture() {
            0
        } else {
            self.halfmove_clock + 1
        };
        self.log.push(record);
        self.side_to_move = self.side_to_move.opposite();
        self.status = GameStatus::Ongoing;

        trace!(mv = %mv, ply = self.log.len(), "make");
        debug_assert!(self.position.index_is_consistent(), "index drift after {}", mv);
        Ok(())
    }

    /// Takes back the last move. Does nothing on an empty log.
    pub fn undo_move(&mut self) -> Option<Move> {
        let record = self.log.pop()?;
        let mv = record.mv;
        self.revert(&mv);
        self.castling = record.prior_castling;
        self.halfmove_clock = record.prior_halfmove_clock;
        self.side_to_move = mv.color();
        // A position a legal move was played from is never terminal.
        self.status = GameStatus::Ongoing;

        trace!(mv = %mv, ply = self.log.len(), "undo");
        debug_assert!(self.position.index_is_consistent(), "index drift undoing {}", mv);
        Some(mv)
    }

    /// The legal move from `from` to `to`. When the move promotes, the
    /// promotion target picks among the four choices.
    pub fn resolve_move(&mut self, from: Square, to: Square) -> Result<Move, GameError> {
        self.resolve_with(from, to, self.promotion_target)
    }

    fn resolve_with(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Result<Move, GameError> {
        let moves = self.valid_moves();
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        let candidates: Vec<Move> = moves
            .into_iter()
            .filter(|mv| mv.from() == from && mv.to() == to)
            .collect();

        match candidates.as_slice() {
            [] => Err(GameError::IllegalMove(format!("{}{}", from, to))),
            [only] => Ok(*only),
            several => {
                let choice = promotion
                    .ok_or_else(|| GameError::PromotionChoiceRequired(format!("{}{}", from, to)))?;
                several
                    .iter()
                    .find(|mv| mv.promotion_piece() == Some(choice))
                    .copied()
                    .ok_or_else(|| GameError::IllegalMove(format!("{}{}{}", from, to, choice.letter())))
            }
        }
    }

    /// Plays a move given in coordinate notation such as "e2e4" or "e7e8q".
    /// A promotion letter applies to this move only; without one the
    /// promotion target decides.
    pub fn make_move_notation(&mut self, notation: &str) -> Result<Move, GameError> {
        let (from, to, promotion) = Move::parse_notation(notation)
            .ok_or_else(|| GameError::InvalidNotation(notation.to_string()))?;
        let mv = self.resolve_with(from, to, promotion.or(self.promotion_target))?;
        self.make_move(mv)?;
        Ok(mv)
    }

    fn check_fits(&self, mv: &Move) -> Result<(), GameError> {
        let stale = || GameError::StaleMove(mv.to_notation());
        let color = mv.color();
        let enemy = color.opposite();

        if color != self.side_to_move
            || mv.from() == mv.to()
            || self.position.piece_at(mv.from()) != Some((mv.piece(), color))
        {
            return Err(stale());
        }
        if mv.captured() == Some(Piece::King) {
            return Err(GameError::IllegalMove(mv.to_notation()));
        }

        let expected_at_target = mv.captured().map(|piece| (piece, enemy));
        let fits = match mv.special() {
            None => self.position.piece_at(mv.to()) == expected_at_target,
            Some(Special::Promotion(kind)) => {
                mv.piece() == Piece::Pawn
                    && mv.to().rank() == color.promotion_rank()
                    && Piece::PROMOTIONS.contains(&kind)
                    && self.position.piece_at(mv.to()) == expected_at_target
            }
            Some(Special::EnPassant { captured }) => {
                mv.piece() == Piece::Pawn
                    && self.position.is_empty(mv.to())
                    && self.position.piece_at(captured) == Some((Piece::Pawn, enemy))
            }
            Some(Special::Castle { rook_from, rook_to }) => {
                mv.piece() == Piece::King
                    && self.position.is_empty(mv.to())
                    && self.position.is_empty(rook_to)
                    && self.position.piece_at(rook_from) == Some((Piece::Rook, color))
            }
        };
        if fits {
            Ok(())
        } else {
            Err(stale())
        }
    }

    fn apply(&mut self, mv: &Move) {
        let board = &mut self.position;
        match mv.special() {
            Some(Special::Castle { rook_from, rook_to }) => {
                board.relocate(mv.from(), mv.to());
                board.relocate(rook_from, rook_to);
            }
            Some(Special::EnPassant { captured }) => {
                board.lift(captured);
                board.relocate(mv.from(), mv.to());
            }
            Some(Special::Promotion(kind)) => {
                board.lift(mv.to());
                board.lift(mv.from());
                board.place(mv.to(), kind, mv.color());
            }
            None => {
                board.lift(mv.to());
                board.relocate(mv.from(), mv.to());
            }
        }
    }

    fn revert(&mut self, mv: &Move) {
        let board = &mut self.position;
        let enemy = mv.color().opposite();
        match mv.special() {
            Some(Special::Castle { rook_from, rook_to }) => {
                board.relocate(rook_to, rook_from);
                board.relocate(mv.to(), mv.from());
            }
            Some(Special::EnPassant { captured }) => {
                board.relocate(mv.to(), mv.from());
                board.place(captured, Piece::Pawn, enemy);
            }
            Some(Special::Promotion(_)) => {
                board.lift(mv.to());
                board.place(mv.from(), Piece::Pawn, mv.color());
                if let Some(piece) = mv.captured() {
                    board.place(mv.to(), piece, enemy);
                }
            }
            None => {
                board.relocate(mv.to(), mv.from());
                if let Some(piece) = mv.captured() {
                    board.place(mv.to(), piece, enemy);
                }
            }
        }
    }

    fn update_castling(&mut self, mv: &Move) {
        let color = mv.color();
        match mv.piece() {
            Piece::King => self.castling.remove_color(color),
            Piece::Rook => {
                if let Some(side) = CastlingRights::side_for_rook_home(color, mv.from()) {
                    self.castling.remove(color, side);
                }
            }
            _ => {}
        }
        if mv.captured() == Some(Piece::Rook) {
            let enemy = color.opposite();
            if let Some(side) = CastlingRights::side_for_rook_home(enemy, mv.to()) {
                self.castling.remove(enemy, side);
            }
        }
    }
}
