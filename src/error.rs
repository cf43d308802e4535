use thiserror::Error;

use crate::game::GameState;
use crate::piece::Color;
use crate::position::Position;

/// A coordinate outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("coordinate (rank {rank}, file {file}) is off the board")]
    InvalidCoordinate { rank: u8, file: u8 },
}

/// Malformed algebraic square notation such as `"z9"` or `"e"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected {expected} characters, found {len}")]
    InvalidLength { expected: usize, len: usize },
    #[error("invalid file '{0}', expected a-h")]
    InvalidFile(char),
    #[error("invalid rank '{0}', expected 1-8")]
    InvalidRank(char),
}

/// Why a move request was refused. Every variant leaves the game untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on {0}")]
    EmptySource(Position),
    #[error("the piece on {from} does not belong to {side}, who is to move")]
    WrongSideToMove { from: Position, side: Color },
    #[error("{from}{to} is not a legal move")]
    IllegalDestination { from: Position, to: Position },
    #[error("the game is over ({0})")]
    GameOver(GameState),
    /// A broken board invariant, e.g. a king missing from the king index.
    #[error("unreachable board state: {0}")]
    UnreachableState(&'static str),
}

/// A board setup that violates the occupancy or king invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("two pieces placed on {0}")]
    Overlap(Position),
    #[error("piece stored on {0} records a different square")]
    MisplacedPiece(Position),
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    DuplicateKing(Color),
}
