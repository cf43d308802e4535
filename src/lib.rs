pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod logger;
pub mod moves;
pub mod piece;
pub mod position;
pub mod render;
pub mod validator;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::{BoardError, MoveError, NotationError, PositionError};
pub use game::{GameController, GameObserver, GameState, LogObserver, NullObserver};
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
pub use position::{notation_to_position, position_to_notation, Position};
