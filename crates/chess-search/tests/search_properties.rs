use chess_engine::Game;
use chess_search::{greedy_move, random_move, Searcher, CHECKMATE};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Plays `plies` random moves from the start, stopping early if the game ends.
fn random_game(seed: u64, plies: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    for _ in 0..plies {
        match random_move(&mut game, &mut rng) {
            Some(mv) => game.make_move(mv).unwrap(),
            None => break,
        }
    }
    game.valid_moves();
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn pruning_never_changes_the_score(seed in any::<u64>(), plies in 0usize..30) {
        let mut game = random_game(seed, plies);
        let mut rng = StdRng::seed_from_u64(seed);
        let full = Searcher::new(false).search(&mut game, 2, &mut rng).unwrap();
        let pruned = Searcher::new(true).search(&mut game, 2, &mut rng).unwrap();
        prop_assert_eq!(full.score, pruned.score);
        prop_assert!(pruned.nodes <= full.nodes);
    }

    #[test]
    fn search_hands_back_the_same_game(seed in any::<u64>(), plies in 0usize..30) {
        let mut game = random_game(seed, plies);
        let before = game.clone();
        let mut rng = StdRng::seed_from_u64(seed);

        Searcher::new(true).search(&mut game, 2, &mut rng).unwrap();
        prop_assert_eq!(&game, &before);
        greedy_move(&mut game, &mut rng).unwrap();
        prop_assert_eq!(&game, &before);
    }

    #[test]
    fn scores_stay_within_mate_bounds(seed in any::<u64>(), plies in 0usize..40) {
        let mut game = random_game(seed, plies);
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = Searcher::new(true).search(&mut game, 2, &mut rng).unwrap();
        prop_assert!(outcome.score.abs() <= CHECKMATE);
        if let Some(best) = outcome.best {
            prop_assert!(game.valid_moves().contains(&best));
        }
    }
}

#[test]
fn depth_two_avoids_walking_into_mate() {
    // g2g4 allows Qh4#.
    let mut game =
        Game::from_fen("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2").unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let outcome = Searcher::new(true).search(&mut game, 2, &mut rng).unwrap();
    assert_ne!(outcome.best.map(|m| m.to_notation()), Some("g2g4".to_string()));
    assert!(outcome.score > -CHECKMATE);
}

#[test]
fn depth_three_finds_mate_in_two() {
    // 1. Ra7 Kg8 2. Rb8#
    let mut game = Game::from_fen("7k/8/8/8/8/8/1R6/R5K1 w - - 0 1").unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let outcome = Searcher::new(true).search(&mut game, 3, &mut rng).unwrap();
    assert_eq!(outcome.score, CHECKMATE);
}
