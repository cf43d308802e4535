use std::fmt;

use crate::board::Board;
use crate::config::GlyphStyle;
use crate::piece::{Color, Piece, PieceKind};
use crate::position::Position;

pub fn glyph(piece: Piece, style: GlyphStyle) -> char {
    match style {
        GlyphStyle::Letters => {
            let letter = piece.kind.letter();
            match piece.color {
                Color::White => letter,
                Color::Black => letter.to_ascii_lowercase(),
            }
        }
        GlyphStyle::Unicode => match (piece.color, piece.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        },
    }
}

/// Draw the board as text, `perspective`'s pieces at the bottom.
pub fn render(board: &Board, style: GlyphStyle, perspective: Color, coordinates: bool) -> String {
    let ranks: Vec<u8> = match perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };
    let empty = match style {
        GlyphStyle::Letters => '.',
        GlyphStyle::Unicode => '·',
    };

    let mut out = String::new();
    for &rank in &ranks {
        if coordinates {
            out.push((b'1' + rank) as char);
            out.push(' ');
        }
        let row: Vec<String> = files
            .iter()
            .filter_map(|&file| Position::new(rank, file).ok())
            .map(|pos| board.piece_at(pos).map_or(empty, |p| glyph(p, style)).to_string())
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    if coordinates {
        let labels: Vec<String> = files.iter().map(|&f| ((b'a' + f) as char).to_string()).collect();
        out.push_str("  ");
        out.push_str(&labels.join(" "));
        out.push('\n');
    }
    out
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self, GlyphStyle::Letters, Color::White, true))
    }
}
