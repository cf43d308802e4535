use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NotationError, PositionError};

/// A square on the board. Rank 0 is White's back rank ("1"), file 0 is the
/// a-file. Both components are always in 0..8; there is no way to build an
/// off-board `Position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    rank: u8,
    file: u8,
}

#[derive(Serialize, Deserialize)]
struct RawPosition {
    rank: u8,
    file: u8,
}

impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.rank, raw.file)
    }
}

impl From<Position> for RawPosition {
    fn from(pos: Position) -> Self {
        RawPosition { rank: pos.rank, file: pos.file }
    }
}

impl Position {
    pub fn new(rank: u8, file: u8) -> Result<Self, PositionError> {
        if rank < 8 && file < 8 {
            Ok(Position { rank, file })
        } else {
            Err(PositionError::InvalidCoordinate { rank, file })
        }
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    pub fn file(self) -> u8 {
        self.file
    }

    /// The square `dr` ranks and `df` files away, or `None` if that walks off
    /// the board.
    pub fn offset(self, dr: i8, df: i8) -> Option<Position> {
        let rank = (self.rank as i8).checked_add(dr)?;
        let file = (self.file as i8).checked_add(df)?;
        if (0..8).contains(&rank) && (0..8).contains(&file) {
            Some(Position { rank: rank as u8, file: file as u8 })
        } else {
            None
        }
    }

    /// All 64 squares, a1, b1, ..., h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Position { rank, file }))
    }

    pub fn to_notation(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'1' + self.rank) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(NotationError::InvalidLength { expected: 2, len: chars.len() });
        }
        let (file, rank) = (chars[0], chars[1]);
        if !('a'..='h').contains(&file) {
            return Err(NotationError::InvalidFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(NotationError::InvalidRank(rank));
        }
        Ok(Position {
            rank: rank as u8 - b'1',
            file: file as u8 - b'a',
        })
    }
}

/// Parse a square such as `"e4"`. Stateless; no board is consulted.
pub fn notation_to_position(notation: &str) -> Result<Position, NotationError> {
    notation.parse()
}

pub fn position_to_notation(pos: Position) -> String {
    pos.to_notation()
}
