// =============================================================================
// Pieces and geometric move generation
//
// Each piece kind produces the squares it could reach on a given board,
// ignoring whose turn it is and whether its own king would be left in check.
// Legality is layered on top by the validator.
// =============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::position::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Upper-case letter as used in algebraic notation (`P` for pawns).
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// Whether a king's move set includes castling. Attack detection must always
/// use `Exclude`: castling squares are not attacked squares, and asking
/// whether the king may castle itself asks which squares are attacked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Castling {
    Include,
    Exclude,
}

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub position: Position,
    /// Set on every relocation. Only consulted for castling and the pawn
    /// double step.
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, position: Position) -> Self {
        Piece { kind, color, position, has_moved: false }
    }

    pub(crate) fn relocate(&mut self, to: Position) {
        self.position = to;
        self.has_moved = true;
    }

    /// Every square this piece could move to, castling included.
    pub fn destinations(&self, board: &Board) -> Vec<Position> {
        self.moves(board, Castling::Include)
    }

    pub fn moves(&self, board: &Board, castling: Castling) -> Vec<Position> {
        let mut out = Vec::new();
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board, &mut out),
            PieceKind::Knight => self.step_moves(board, &KNIGHT_OFFSETS, &mut out),
            PieceKind::Bishop => self.sliding_moves(board, &BISHOP_DIRS, &mut out),
            PieceKind::Rook => self.sliding_moves(board, &ROOK_DIRS, &mut out),
            PieceKind::Queen => {
                self.sliding_moves(board, &ROOK_DIRS, &mut out);
                self.sliding_moves(board, &BISHOP_DIRS, &mut out);
            }
            PieceKind::King => {
                self.step_moves(board, &KING_OFFSETS, &mut out);
                if castling == Castling::Include {
                    self.castling_moves(board, &mut out);
                }
            }
        }
        out
    }

    /// Squares this piece attacks. Pawns attack their two forward diagonals
    /// whether or not anything stands there, and never attack by pushing.
    /// Every other kind attacks exactly where it could move, minus castling.
    pub fn attacks(&self, board: &Board) -> Vec<Position> {
        match self.kind {
            PieceKind::Pawn => [-1i8, 1]
                .iter()
                .filter_map(|&df| self.position.offset(self.color.forward(), df))
                .collect(),
            _ => self.moves(board, Castling::Exclude),
        }
    }

    fn pawn_moves(&self, board: &Board, out: &mut Vec<Position>) {
        let dir = self.color.forward();

        if let Some(one) = self.position.offset(dir, 0) {
            if board.is_empty(one) {
                out.push(one);

                let on_start = self.position.rank() == self.color.pawn_rank();
                if on_start && !self.has_moved {
                    if let Some(two) = one.offset(dir, 0) {
                        if board.is_empty(two) {
                            out.push(two);
                        }
                    }
                }
            }
        }

        for df in [-1i8, 1] {
            let Some(diag) = self.position.offset(dir, df) else {
                continue;
            };
            if board.is_occupied_by_opponent(diag, self.color)
                || self.can_capture_en_passant(board, diag, df)
            {
                out.push(diag);
            }
        }
    }

    /// The en-passant square is empty; the pawn being captured sits beside
    /// us, on the destination's file and our own rank.
    fn can_capture_en_passant(&self, board: &Board, diag: Position, df: i8) -> bool {
        if board.en_passant_target() != Some(diag) {
            return false;
        }
        self.position
            .offset(0, df)
            .and_then(|beside| board.piece_at(beside))
            .is_some_and(|p| p.kind == PieceKind::Pawn && p.color != self.color)
    }

    fn step_moves(&self, board: &Board, offsets: &[(i8, i8)], out: &mut Vec<Position>) {
        for &(dr, df) in offsets {
            let Some(to) = self.position.offset(dr, df) else {
                continue;
            };
            if board.is_empty(to) || board.is_occupied_by_opponent(to, self.color) {
                out.push(to);
            }
        }
    }

    fn sliding_moves(&self, board: &Board, directions: &[(i8, i8)], out: &mut Vec<Position>) {
        for &(dr, df) in directions {
            let mut next = self.position.offset(dr, df);
            while let Some(to) = next {
                if !board.is_empty(to) {
                    if board.is_occupied_by_opponent(to, self.color) {
                        out.push(to);
                    }
                    break;
                }
                out.push(to);
                next = to.offset(dr, df);
            }
        }
    }

    fn castling_moves(&self, board: &Board, out: &mut Vec<Position>) {
        let home = self.color.back_rank();
        if self.has_moved || self.position.rank() != home || self.position.file() != 4 {
            return;
        }
        if board.is_king_in_check(self.color) {
            return;
        }

        // (rook file, squares that must be empty, squares the king crosses or lands on)
        let sides: [(u8, &[u8], [u8; 2]); 2] = [
            (7, &[5, 6][..], [5, 6]),
            (0, &[1, 2, 3][..], [3, 2]),
        ];

        for (rook_file, between, king_path) in sides {
            let square = |file: u8| Position::new(home, file).ok();

            let rook_ready = square(rook_file)
                .and_then(|sq| board.piece_at(sq))
                .is_some_and(|p| p.kind == PieceKind::Rook && p.color == self.color && !p.has_moved);
            if !rook_ready {
                continue;
            }

            let clear = between
                .iter()
                .all(|&file| square(file).is_some_and(|sq| board.is_empty(sq)));
            if !clear {
                continue;
            }

            let safe = king_path.iter().all(|&file| {
                square(file).is_some_and(|sq| !board.is_square_attacked(sq, self.color.opposite()))
            });
            if !safe {
                continue;
            }

            if let Some(&landing) = king_path.last() {
                if let Some(to) = square(landing) {
                    out.push(to);
                }
            }
        }
    }
}
