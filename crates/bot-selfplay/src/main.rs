//! Bot Self-play - pits two search configurations against each other.
//!
//! Each side picks its moves with its own strategy until the game ends or
//! the ply limit is reached. Progress is logged through `tracing`; set
//! `RUST_LOG=debug` to also see per-search summaries.

mod config;

use std::path::PathBuf;

use chess_core::Color;
use chess_engine::{Game, GameStatus};
use chess_search::{MoveFinder, Strategy};
use clap::Parser;
use config::SelfplayConfig;

/// Bot Self-play - plays one game between two search strategies.
#[derive(Parser)]
#[command(name = "bot-selfplay")]
#[command(about = "Plays one game between two search strategies")]
struct Args {
    /// Path to the match configuration
    #[arg(long, default_value = "selfplay.toml")]
    config: PathBuf,

    /// Strategy for White, overriding the config file
    #[arg(long, value_parser = parse_strategy)]
    white: Option<Strategy>,

    /// Strategy for Black, overriding the config file
    #[arg(long, value_parser = parse_strategy)]
    black: Option<Strategy>,

    /// Negamax depth for both sides
    #[arg(long)]
    depth: Option<u32>,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<usize>,

    /// Starting position in FEN
    #[arg(long)]
    fen: Option<String>,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    match s.to_ascii_lowercase().as_str() {
        "random" => Ok(Strategy::Random),
        "greedy" => Ok(Strategy::Greedy),
        "negamax" => Ok(Strategy::Negamax),
        other => Err(format!("unknown strategy '{other}' (random, greedy, negamax)")),
    }
}

/// How a self-play game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    PlyLimit,
}

fn apply_overrides(config: &mut SelfplayConfig, args: &Args) {
    if let Some(strategy) = args.white {
        config.side_mut(Color::White).strategy = strategy;
    }
    if let Some(strategy) = args.black {
        config.side_mut(Color::Black).strategy = strategy;
    }
    if let Some(depth) = args.depth {
        for color in Color::BOTH {
            config.side_mut(color).depth = depth;
        }
    }
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    if let Some(fen) = &args.fen {
        config.start_fen = Some(fen.clone());
    }
}

fn play(config: &SelfplayConfig) -> anyhow::Result<(Outcome, Game)> {
    let mut game = match &config.start_fen {
        Some(fen) => Game::from_fen(fen)?,
        None => Game::new(),
    };
    let mut white = MoveFinder::new(config.side(Color::White).clone());
    let mut black = MoveFinder::new(config.side(Color::Black).clone());

    for _ in 0..config.max_plies {
        let side = game.side_to_move();
        let finder = match side {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let search = finder.find_move(&mut game)?;
        let Some(mv) = search.best else {
            let outcome = match game.status() {
                GameStatus::Checkmate => Outcome::Checkmate {
                    winner: side.opposite(),
                },
                _ => Outcome::Stalemate,
            };
            return Ok((outcome, game));
        };

        game.make_move(mv)?;
        tracing::info!(
            ply = game.ply_count(),
            %side,
            mv = %mv,
            score = search.score,
            nodes = search.nodes,
            "move"
        );
    }

    // The last move may have ended the game exactly at the limit.
    game.valid_moves();
    let outcome = match game.status() {
        GameStatus::Checkmate => Outcome::Checkmate {
            winner: game.side_to_move().opposite(),
        },
        GameStatus::Stalemate => Outcome::Stalemate,
        GameStatus::Ongoing => Outcome::PlyLimit,
    };
    Ok((outcome, game))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = SelfplayConfig::load(&args.config)?;
    apply_overrides(&mut config, &args);

    tracing::info!("White: {:?}", config.white);
    tracing::info!("Black: {:?}", config.black);

    let (outcome, game) = play(&config)?;
    match outcome {
        Outcome::Checkmate { winner } => tracing::info!("{} wins by checkmate", winner),
        Outcome::Stalemate => tracing::info!("Draw by stalemate"),
        Outcome::PlyLimit => tracing::info!("Stopped after {} plies", config.max_plies),
    }
    println!("{}", game.position());
    println!("{}", game.to_fen());
    Ok(())
}
