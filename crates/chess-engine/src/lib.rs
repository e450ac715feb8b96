//! Chess rules engine with reversible, in-place move application.
//!
//! This crate provides:
//! - [`Position`] - mailbox board with an index of king and slider squares
//! - [`Game`] - turn, castling rights, move log, make/undo and game status
//! - [`attacks`] - attackers of a square and pins against a king
//! - [`movegen`] - pin-aware per-piece generation and check filtering
//!
//! # Architecture
//!
//! Legal moves are produced in one pass: pins and checks are computed for
//! the side to move, each piece generates only moves that respect its pin,
//! the king never steps onto an attacked square, and when in check the
//! remaining moves are narrowed to those that capture or block the checker.
//! Nothing is tried and rolled back to test legality, so a search can
//! drive [`Game::make_move`] and [`Game::undo_move`] directly.
//!
//! # Example
//!
//! ```
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! assert_eq!(game.valid_moves().len(), 20);
//!
//! game.make_move_notation("e2e4").unwrap();
//! game.make_move_notation("e7e5").unwrap();
//! game.undo_move();
//! println!("{}", game.to_fen());
//! ```

pub mod attacks;
mod game;
mod index;
pub mod movegen;
mod position;

pub use attacks::{AttackRecord, PinRecord};
pub use game::{Game, GameError, GameStatus, MoveRecord};
pub use index::PieceIndex;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{legal_moves, EnPassantWindow, LegalMoves};
pub use position::{CastleSide, CastlingRights, Position};
