use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotationError;
use crate::position::Position;

/// A from/to pair. Promotion is implicit (always to a queen), so there is no
/// promotion field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    pub fn new(from: Position, to: Position) -> Self {
        Move { from, to }
    }

    /// Coordinate notation, e.g. "e2e4".
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parse coordinate notation. A trailing `q` (as written by tools that
    /// always spell out the promotion piece) is accepted and ignored.
    pub fn from_uci(s: &str) -> Result<Move, NotationError> {
        let body = match s.len() {
            4 => s,
            5 if s.ends_with('q') => &s[..4],
            len => return Err(NotationError::InvalidLength { expected: 4, len }),
        };
        if !body.is_ascii() {
            return Err(NotationError::InvalidLength { expected: 4, len: body.chars().count() });
        }
        Ok(Move {
            from: body[..2].parse()?,
            to: body[2..].parse()?,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}
