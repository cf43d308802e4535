use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_rules::config::PlayConfig;
use chess_rules::game::{GameController, GameState, LogObserver};
use chess_rules::piece::Color;
use chess_rules::logger;

const MAX_PLIES: usize = 300;
const DEFAULT_GAMES: usize = 20;
const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Default)]
struct Tally {
    white_wins: u32,
    black_wins: u32,
    stalemates: u32,
    unfinished: u32,
}

/// Play uniformly random legal moves until the game ends or the ply cap is
/// hit, checking the board invariants after every move.
fn play_game(rng: &mut StdRng) -> Result<GameController, String> {
    let mut game = GameController::with_observer(Box::new(LogObserver));
    for _ in 0..MAX_PLIES {
        if game.current_game_state().is_terminal() {
            break;
        }
        let moves = game.legal_moves();
        let Some(&mv) = moves.choose(rng) else {
            return Err(format!("no legal moves but state is {}", game.current_game_state()));
        };
        game.apply_move(mv)
            .map_err(|e| format!("generated move {mv} was rejected: {e}"))?;

        let board = game.current_board_snapshot();
        board.validate().map_err(|e| format!("after {mv}: {e}"))?;
        let mover = game.current_turn().opposite();
        if board.is_king_in_check(mover) {
            return Err(format!("{mover} left its king in check with {mv}"));
        }
    }
    Ok(game)
}

fn flag<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    args.iter()
        .find_map(|a| a.strip_prefix(name))
        .and_then(|v| v.parse().ok())
}

fn main() {
    let config = PlayConfig::from_env();
    if let Err(e) = logger::init(config.log_level, config.log_file.as_deref()) {
        eprintln!("logging disabled: {e}");
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let games = flag(&args, "--games=").unwrap_or(DEFAULT_GAMES);
    let seed = flag(&args, "--seed=").unwrap_or(DEFAULT_SEED);
    let json = args.iter().any(|a| a == "--json");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tally = Tally::default();
    let mut last = None;

    for n in 1..=games {
        let game = match play_game(&mut rng) {
            Ok(game) => game,
            Err(e) => {
                eprintln!("game {n}: invariant violated: {e}");
                std::process::exit(1);
            }
        };
        let state = game.current_game_state();
        match state {
            GameState::Checkmate(Color::White) => tally.white_wins += 1,
            GameState::Checkmate(Color::Black) => tally.black_wins += 1,
            GameState::Stalemate => tally.stalemates += 1,
            _ => tally.unfinished += 1,
        }
        println!("game {n}: {} plies, {state}", game.history().len());
        last = Some(game);
    }

    println!(
        "White {} / Black {} / stalemate {} / unfinished {} (seed {seed})",
        tally.white_wins, tally.black_wins, tally.stalemates, tally.unfinished
    );

    if json {
        if let Some(game) = last {
            match serde_json::to_string_pretty(game.current_board_snapshot()) {
                Ok(text) => println!("{text}"),
                Err(e) => eprintln!("could not serialize board: {e}"),
            }
        }
    }
}
