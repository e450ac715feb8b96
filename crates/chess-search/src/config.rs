//! Search settings and a seeded move finder built from them.

use chess_engine::Game;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::greedy::greedy_move;
use crate::negamax::Searcher;
use crate::random::random_move;
use crate::{SearchError, SearchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Random,
    Greedy,
    #[default]
    Negamax,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub strategy: Strategy,
    /// Plies searched by negamax. Ignored by the other strategies.
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_pruning")]
    pub pruning: bool,
    /// Fixed seed for reproducible tie-breaks. Drawn from the OS when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_depth() -> u32 {
    3
}

fn default_pruning() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            depth: default_depth(),
            pruning: default_pruning(),
            seed: None,
        }
    }
}

/// Picks moves according to a [`SearchConfig`], owning the random source
/// used for tie-breaks.
#[derive(Debug)]
pub struct MoveFinder {
    config: SearchConfig,
    rng: StdRng,
}

impl MoveFinder {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn find_move(&mut self, game: &mut Game) -> Result<SearchOutcome, SearchError> {
        match self.config.strategy {
            Strategy::Random => Ok(SearchOutcome {
                best: random_move(game, &mut self.rng),
                score: 0,
                nodes: 0,
            }),
            Strategy::Greedy => greedy_move(game, &mut self.rng),
            Strategy::Negamax => {
                Searcher::new(self.config.pruning).search(game, self.config.depth, &mut self.rng)
            }
        }
    }
}
