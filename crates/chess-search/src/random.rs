//! Uniformly random move choice.

use chess_core::Move;
use chess_engine::Game;
use rand::seq::SliceRandom;
use rand::Rng;

/// Any legal move, each equally likely. `None` when the game is over.
pub fn random_move<R: Rng + ?Sized>(game: &mut Game, rng: &mut R) -> Option<Move> {
    game.valid_moves().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn picks_a_legal_move() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game = Game::new();
        let legal = game.valid_moves();
        for _ in 0..20 {
            let mv = random_move(&mut game, &mut rng).unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn nothing_to_pick_when_mated() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
        assert_eq!(random_move(&mut game, &mut rng), None);
    }

    #[test]
    fn covers_every_choice_eventually() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(random_move(&mut game, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }
}
