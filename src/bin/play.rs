use std::io::{self, BufRead, Write};

use chess_rules::config::PlayConfig;
use chess_rules::game::{GameController, GameState, LogObserver};
use chess_rules::logger;
use chess_rules::moves::Move;
use chess_rules::position::Position;
use chess_rules::render::render;

const HELP: &str = "Enter moves as e2e4. 'moves e2' lists targets, 'exit' quits.";

fn show(game: &GameController, config: &PlayConfig) {
    let perspective = config.perspective_for(game.current_turn());
    let board = game.current_board_snapshot();
    print!("{}", render(board, config.glyphs, perspective, config.show_coordinates));
    match game.current_game_state() {
        GameState::Check(color) => println!("{color} is in check!"),
        GameState::Checkmate(winner) => println!("Checkmate! {winner} wins."),
        GameState::Stalemate => println!("Stalemate! It's a draw."),
        GameState::Ongoing => {}
    }
}

fn list_targets(game: &GameController, square: &str) {
    match square.parse::<Position>() {
        Ok(from) => {
            let targets: Vec<String> =
                game.legal_destinations(from).iter().map(|p| p.to_string()).collect();
            if targets.is_empty() {
                println!("No legal moves from {from}.");
            } else {
                println!("{from}: {}", targets.join(" "));
            }
        }
        Err(e) => println!("{e}"),
    }
}

fn main() -> io::Result<()> {
    let config = PlayConfig::from_env();
    if let Err(e) = logger::init(config.log_level, config.log_file.as_deref()) {
        eprintln!("logging disabled: {e}");
    }

    println!("chess_rules (built {})", env!("BUILD_TIMESTAMP"));
    println!("{HELP}");

    let mut game = GameController::with_observer(Box::new(LogObserver));
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        show(&game, &config);
        if game.current_game_state().is_terminal() {
            break;
        }

        print!("{} to move: ", game.current_turn());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?.trim().to_ascii_lowercase();

        match input.as_str() {
            "" => continue,
            "exit" | "quit" => {
                println!("Game terminated by user.");
                break;
            }
            "help" => println!("{HELP}"),
            _ => {
                if let Some(square) = input.strip_prefix("moves ") {
                    list_targets(&game, square.trim());
                    continue;
                }
                match Move::from_uci(&input) {
                    Ok(mv) => {
                        if let Err(e) = game.apply_move(mv) {
                            println!("Invalid move: {e}");
                        }
                    }
                    Err(e) => println!("Could not read '{input}': {e}"),
                }
            }
        }
    }
    Ok(())
}
