use crate::game::{GameController, GameState, LogObserver};
use crate::piece::Color;
use crate::position::Position;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    piece_type: String,
    color: String,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    state: GameState,
    game_over: bool,
    is_in_check: bool,
    en_passant_target: Option<[u8; 2]>,
    last_move: Option<[[u8; 2]; 2]>,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn coords(pos: Position) -> [u8; 2] {
    [pos.rank(), pos.file()]
}

fn build_board_state(game: &GameController) -> BoardState {
    let board = game.current_board_snapshot();
    let squares: Vec<Vec<Option<SquarePiece>>> = (0..8u8)
        .map(|r| {
            (0..8u8)
                .map(|c| {
                    Position::new(r, c)
                        .ok()
                        .and_then(|pos| board.piece_at(pos))
                        .map(|p| SquarePiece {
                            piece_type: format!("{:?}", p.kind),
                            color: p.color.to_string(),
                        })
                })
                .collect()
        })
        .collect();

    let state = game.current_game_state();
    BoardState {
        squares,
        current_turn: game.current_turn().to_string(),
        state,
        game_over: state.is_terminal(),
        is_in_check: board.is_king_in_check(game.current_turn()),
        en_passant_target: board.en_passant_target().map(coords),
        last_move: game.last_move().map(|m| [coords(m.from), coords(m.to)]),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct Game {
    controller: GameController,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            controller: GameController::with_observer(Box::new(LogObserver)),
        }
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.controller))
    }

    pub fn make_move(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> JsValue {
        let squares = Position::new(from_row, from_col).and_then(|from| {
            Position::new(to_row, to_col).map(|to| (from, to))
        });
        let outcome = match squares {
            Ok((from, to)) => self
                .controller
                .apply_player_move(from, to)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let result = match outcome {
            Ok(()) => MoveResult {
                board_state: Some(build_board_state(&self.controller)),
                error: None,
            },
            Err(error) => MoveResult { board_state: None, error: Some(error) },
        };
        to_js(&result)
    }

    pub fn get_legal_moves_for_square(&self, row: u8, col: u8) -> JsValue {
        let targets: Vec<[u8; 2]> = Position::new(row, col)
            .map(|from| self.controller.legal_destinations(from))
            .unwrap_or_default()
            .into_iter()
            .map(coords)
            .collect();
        to_js(&targets)
    }

    pub fn current_turn_is_white(&self) -> bool {
        self.controller.current_turn() == Color::White
    }
}
