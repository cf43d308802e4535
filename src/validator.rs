// =============================================================================
// Move validation
//
// A move is legal when it is among the piece's geometric destinations and,
// played out on a copy of the board, does not leave the mover's king
// attacked. Pins, moving into check and failing to answer a check all fall
// out of that single rule.
// =============================================================================

use crate::board::Board;
use crate::game::GameState;
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::position::Position;

pub fn is_legal(piece: &Piece, to: Position, board: &Board) -> bool {
    if !piece.destinations(board).contains(&to) {
        return false;
    }
    leaves_king_safe(piece, to, board)
}

fn leaves_king_safe(piece: &Piece, to: Position, board: &Board) -> bool {
    let mut simulated = board.clone();
    simulated.apply_move(piece.position, to);
    !simulated.is_king_in_check(piece.color)
}

/// The legal subset of `piece.destinations(board)`.
pub fn legal_destinations(piece: &Piece, board: &Board) -> Vec<Position> {
    piece
        .destinations(board)
        .into_iter()
        .filter(|&to| leaves_king_safe(piece, to, board))
        .collect()
}

/// Every legal move for `color`, a1 to h8 by origin square.
pub fn legal_moves(color: Color, board: &Board) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|piece| {
            legal_destinations(&piece, board)
                .into_iter()
                .map(move |to| Move::new(piece.position, to))
        })
        .collect()
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(color: Color, board: &Board) -> bool {
    board.pieces_of(color).any(|piece| {
        piece
            .destinations(board)
            .into_iter()
            .any(|to| leaves_king_safe(&piece, to, board))
    })
}

pub fn is_checkmate(color: Color, board: &Board) -> bool {
    board.is_king_in_check(color) && !has_any_legal_move(color, board)
}

pub fn is_stalemate(color: Color, board: &Board) -> bool {
    !board.is_king_in_check(color) && !has_any_legal_move(color, board)
}

/// Classify the position from the point of view of `to_move`, the side that
/// has just been handed the move.
pub fn game_state(to_move: Color, board: &Board) -> GameState {
    let in_check = board.is_king_in_check(to_move);
    let can_move = has_any_legal_move(to_move, board);
    match (in_check, can_move) {
        (true, false) => GameState::Checkmate(to_move.opposite()),
        (true, true) => GameState::Check(to_move),
        (false, false) => GameState::Stalemate,
        (false, true) => GameState::Ongoing,
    }
}
