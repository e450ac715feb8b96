//! Move selection on top of [`chess_engine::Game`].
//!
//! Three strategies share one evaluation:
//! - [`random_move`] - any legal move
//! - [`greedy_move`] - one-ply lookahead over the opponent's replies
//! - [`Searcher`] - depth-limited negamax with optional alpha-beta pruning
//!
//! Every strategy drives the game through `make_move`/`undo_move` and hands
//! it back exactly as it found it. Ties between equally scored moves are
//! broken with a caller-supplied random source.
//!
//! ```
//! use chess_engine::Game;
//! use chess_search::{MoveFinder, SearchConfig, Strategy};
//!
//! let mut game = Game::new();
//! let mut finder = MoveFinder::new(SearchConfig {
//!     strategy: Strategy::Negamax,
//!     depth: 2,
//!     seed: Some(7),
//!     ..SearchConfig::default()
//! });
//! let outcome = finder.find_move(&mut game).unwrap();
//! assert!(outcome.best.is_some());
//! ```

mod config;
pub mod eval;
mod greedy;
mod negamax;
mod random;

use chess_core::Move;
use chess_engine::GameError;
use thiserror::Error;

pub use config::{MoveFinder, SearchConfig, Strategy};
pub use eval::{evaluate, CHECKMATE, STALEMATE};
pub use greedy::greedy_move;
pub use negamax::Searcher;
pub use random::random_move;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search depth must be at least 1")]
    ZeroDepth,
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Result of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// `None` when the side to move has no legal move.
    pub best: Option<Move>,
    /// Score of `best` from the mover's side.
    pub score: i32,
    pub nodes: u64,
}
