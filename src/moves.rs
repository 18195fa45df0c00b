use std::fmt;
use std::str::FromStr;

use crate::piece::PieceKind;
use crate::position::{ParsePositionError, Position};

/// A move from one square to another, optionally promoting a pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Position,
    pub end: Position,
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(start: Position, end: Position, promotion: PieceKind) -> Self {
        Self {
            start,
            end,
            promotion: Some(promotion),
        }
    }
}

/// Long algebraic notation: `e2e4`, or `e7e8q` for a promotion.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (Some(start), Some(end)) = (s.get(0..2), s.get(2..4)) else {
            return Err(ParseMoveError::WrongLength);
        };
        let start = start.parse()?;
        let end = end.parse()?;

        let mut rest = s[4..].chars();
        match (rest.next(), rest.next()) {
            (None, _) => Ok(Self::new(start, end)),
            (Some(c), None) => match PieceKind::from_char(c) {
                Some(kind) if PieceKind::PROMOTIONS.contains(&kind) => {
                    Ok(Self::with_promotion(start, end, kind))
                }
                _ => Err(ParseMoveError::BadPromotion(c)),
            },
            (Some(_), Some(_)) => Err(ParseMoveError::WrongLength),
        }
    }
}

/// Error type for parsing long algebraic move notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("move must be 4 or 5 characters (e.g., 'e2e4', 'e7e8q')")]
    WrongLength,
    #[error("invalid square: {0}")]
    Square(#[from] ParsePositionError),
    #[error("'{0}' is not a promotion piece (q, r, b or n)")]
    BadPromotion(char),
}
