use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

/// Occupancy of the 64 squares plus the state a move leaves behind for the
/// next one: the en-passant target and where each king stands.
///
/// `Clone` is a full deep copy; the validator simulates moves on clones and
/// never touches the real board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    en_passant_target: Option<Position>,
    kings: [Option<Position>; 2],
}

/// Serialized form of a [`Board`]. The king index is derived, so it is rebuilt
/// rather than stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub pieces: Vec<Piece>,
    pub en_passant_target: Option<Position>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            en_passant_target: None,
            kings: [None; 2],
        }
    }

    /// The standard starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (file, &kind) in BACK_ROW.iter().enumerate() {
                board.put_new(kind, color, color.back_rank(), file as u8);
                board.put_new(PieceKind::Pawn, color, color.pawn_rank(), file as u8);
            }
        }
        board
    }

    fn put_new(&mut self, kind: PieceKind, color: Color, rank: u8, file: u8) {
        if let Ok(pos) = Position::new(rank, file) {
            self.put(Piece::new(kind, color, pos));
        }
    }

    /// Put a fresh, unmoved piece on `pos`, replacing whatever stood there.
    /// Returns the replaced piece. Fails if it would give `color` a second king.
    pub fn place(
        &mut self,
        pos: Position,
        kind: PieceKind,
        color: Color,
    ) -> Result<Option<Piece>, BoardError> {
        if kind == PieceKind::King {
            if let Some(existing) = self.kings[color.index()] {
                if existing != pos {
                    return Err(BoardError::DuplicateKing(color));
                }
            }
        }
        let replaced = self.take(pos);
        self.put(Piece::new(kind, color, pos));
        Ok(replaced)
    }

    pub fn remove(&mut self, pos: Position) -> Option<Piece> {
        self.take(pos)
    }

    fn take(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.squares[pos.rank() as usize][pos.file() as usize].take()?;
        if piece.kind == PieceKind::King && self.kings[piece.color.index()] == Some(pos) {
            self.kings[piece.color.index()] = None;
        }
        Some(piece)
    }

    fn put(&mut self, piece: Piece) {
        let pos = piece.position;
        if piece.kind == PieceKind::King {
            self.kings[piece.color.index()] = Some(pos);
        }
        self.squares[pos.rank() as usize][pos.file() as usize] = Some(piece);
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.rank() as usize][pos.file() as usize]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.piece_at(pos).is_none()
    }

    pub fn is_occupied_by_opponent(&self, pos: Position, color: Color) -> bool {
        self.piece_at(pos).is_some_and(|p| p.color != color)
    }

    /// The square a pawn may capture into en passant. Only ever set for the
    /// single ply following a pawn's double step.
    pub fn en_passant_target(&self) -> Option<Position> {
        self.en_passant_target
    }

    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.kings[color.index()]
    }

    /// All pieces, a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().flatten().copied()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Apply the mechanical effects of moving the piece on `from` to `to`:
    /// en-passant bookkeeping and capture, promotion, the castling rook, and
    /// the king index. Legality is the caller's business. Returns the captured
    /// piece, if any; an empty `from` is a no-op.
    pub fn apply_move(&mut self, from: Position, to: Position) -> Option<Piece> {
        let mut piece = self.take(from)?;
        let previous_target = self.en_passant_target.take();
        let mut captured = None;

        if piece.kind == PieceKind::Pawn {
            if from.rank().abs_diff(to.rank()) == 2 {
                self.en_passant_target = from.offset(piece.color.forward(), 0);
            }
            if previous_target == Some(to) && from.file() != to.file() {
                if let Ok(bypassed) = Position::new(from.rank(), to.file()) {
                    captured = self.take(bypassed);
                }
            }
        }

        if piece.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
            let (rook_from, rook_to) = if to.file() > from.file() { (7, 5) } else { (0, 3) };
            let rook_from = Position::new(from.rank(), rook_from).ok();
            let rook_to = Position::new(from.rank(), rook_to).ok();
            if let (Some(rook_from), Some(rook_to)) = (rook_from, rook_to) {
                if let Some(mut rook) = self.take(rook_from) {
                    rook.relocate(rook_to);
                    self.put(rook);
                }
            }
        }

        if piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank() {
            piece = Piece::new(PieceKind::Queen, piece.color, from);
        }

        if let Some(victim) = self.take(to) {
            captured = Some(victim);
        }
        piece.relocate(to);
        self.put(piece);
        captured
    }

    /// Whether any piece of `by` attacks `pos`. Kings contribute their plain
    /// steps only, never castling squares.
    pub fn is_square_attacked(&self, pos: Position, by: Color) -> bool {
        self.pieces_of(by).any(|p| p.attacks(self).contains(&pos))
    }

    /// A board missing `color`'s king reports no check; the controller
    /// rejects such boards before they are played on.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        self.king_position(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opposite()))
    }

    /// Exactly one king per color, and the king index points at it.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in [Color::White, Color::Black] {
            let mut kings = self
                .pieces_of(color)
                .filter(|p| p.kind == PieceKind::King)
                .map(|p| p.position);
            let Some(found) = kings.next() else {
                return Err(BoardError::MissingKing(color));
            };
            if kings.next().is_some() {
                return Err(BoardError::DuplicateKing(color));
            }
            if self.king_position(color) != Some(found) {
                return Err(BoardError::MisplacedPiece(found));
            }
        }
        Ok(())
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        BoardSnapshot {
            pieces: board.pieces().collect(),
            en_passant_target: board.en_passant_target,
        }
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = BoardError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for piece in snapshot.pieces {
            if !board.is_empty(piece.position) {
                return Err(BoardError::Overlap(piece.position));
            }
            if piece.kind == PieceKind::King && board.kings[piece.color.index()].is_some() {
                return Err(BoardError::DuplicateKing(piece.color));
            }
            board.put(piece);
        }
        board.en_passant_target = snapshot.en_passant_target;
        Ok(board)
    }
}
