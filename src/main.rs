use minesweeper_ai::{Game, GameConfig, GameError, GameState, Move, Turn};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let config = match parse_args(env::args().skip(1)) {
        Some(config) => config,
        None => {
            eprintln!("Usage: minesweeper-ai [height width mines [seed]]");
            return ExitCode::FAILURE;
        }
    };

    match run_game(&config) {
        Ok(GameState::Lost) | Ok(GameState::Stuck) => ExitCode::from(2),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Game error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<GameConfig> {
    let mut config = GameConfig::default();
    let Some(height) = args.next() else {
        return Some(config);
    };

    config.height = height.parse().ok()?;
    config.width = args.next()?.parse().ok()?;
    config.mines = args.next()?.parse().ok()?;
    config.seed = match args.next() {
        Some(seed) => Some(seed.parse().ok()?),
        None => None,
    };
    Some(config)
}

fn run_game(config: &GameConfig) -> Result<GameState, GameError> {
    let mut game = Game::new(config)?;

    while game.state() == GameState::Playing {
        match game.step()? {
            Turn::Revealed { mv, count } => match mv {
                Move::Safe(pos) => println!("AI making safe move {pos}: {count}"),
                Move::Guess(pos) => println!("AI guessing {pos}: {count}"),
            },
            Turn::Exploded(mv) => println!("AI revealed a mine at {}", mv.position()),
            Turn::NoMoves => println!("No moves left to make."),
        }
    }

    println!("{}", game.board());
    println!("{}", summary(&game));
    Ok(game.state())
}

fn summary(game: &Game) -> String {
    let flagged = game.board().mines_found().len();
    let total = game.board().mines_count();
    match game.state() {
        GameState::Won => format!("Won! All {flagged} mines flagged."),
        GameState::Lost => format!("Lost after {} moves.", game.turns()),
        GameState::Stuck => format!("Stuck with {flagged} of {total} mines flagged."),
        GameState::Playing => format!("Still playing, {flagged} of {total} mines flagged."),
    }
}
