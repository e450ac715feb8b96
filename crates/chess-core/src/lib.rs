//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! search:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for (rank, file) board coordinates
//! - [`Move`] with its [`Special`] payload
//! - FEN parsing and serialization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, Special};
pub use piece::Piece;
pub use square::Square;
