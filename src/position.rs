use std::fmt;
use std::str::FromStr;

/// Number of ranks (and files) on the board.
pub const BOARD_SIZE: u8 = 8;

/// A single square on the board, identified by rank and file.
///
/// Both coordinates are 1-based: rank 1 is White's back rank, file 1 is the
/// a-file. A `Position` can only be built through [`Position::new`], so an
/// out-of-range square is never representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    rank: u8,
    file: u8,
}

impl Position {
    /// Creates a position if both rank and file are in `1..=8`.
    pub const fn new(rank: u8, file: u8) -> Option<Self> {
        if rank >= 1 && rank <= BOARD_SIZE && file >= 1 && file <= BOARD_SIZE {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// Returns the rank (1-8).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Returns the file (1-8, a-file is 1).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the file as its letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file - 1) as char
    }

    /// Steps by the given rank/file deltas, or `None` when leaving the board.
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        let rank = self.rank.checked_add_signed(d_rank)?;
        let file = self.file.checked_add_signed(d_file)?;
        Self::new(rank, file)
    }

    /// Iterates over all 64 squares, rank 1 first, a-file first within a rank.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=BOARD_SIZE).flat_map(|rank| (1..=BOARD_SIZE).map(move |file| Self { rank, file }))
    }

    /// Index into a row-major 64 element array (a1 = 0, h8 = 63).
    #[inline]
    pub(crate) const fn index(self) -> usize {
        ((self.rank - 1) * BOARD_SIZE + (self.file - 1)) as usize
    }
}

/// Parse algebraic notation like "e4" into a Position.
///
/// # Examples
/// ```
/// # use chess_rules::Position;
/// let position: Position = "e4".parse().unwrap();
/// assert_eq!((position.rank(), position.file()), (4, 5));
/// ```
impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParsePositionError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(ParsePositionError::BadFile);
        }
        let rank = rank
            .to_digit(10)
            .filter(|rank| (1..=8).contains(rank))
            .ok_or(ParsePositionError::BadRank)?;

        Self::new(rank as u8, file as u8 - b'a' + 1).ok_or(ParsePositionError::BadRank)
    }
}

/// Display position in algebraic notation (e.g., "e4").
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank)
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    /// Square notation must be exactly 2 characters
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    /// File must be a letter from a-h
    #[error("file must be a-h")]
    BadFile,
    /// Rank must be a digit from 1-8
    #[error("rank must be 1-8")]
    BadRank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(1, 1).is_some());
        assert!(Position::new(8, 8).is_some());
        assert!(Position::new(0, 1).is_none());
        assert!(Position::new(1, 0).is_none());
        assert!(Position::new(9, 1).is_none());
        assert!(Position::new(1, 9).is_none());
    }

    #[test_case("a1", 1, 1)]
    #[test_case("h1", 1, 8)]
    #[test_case("a8", 8, 1)]
    #[test_case("e4", 4, 5)]
    #[test_case("E4", 4, 5; "uppercase file")]
    fn test_position_from_str(s: &str, rank: u8, file: u8) {
        let position: Position = s.parse().unwrap();
        assert_eq!(position, Position::new(rank, file).unwrap());
    }

    #[test_case("", ParsePositionError::WrongLength)]
    #[test_case("a", ParsePositionError::WrongLength)]
    #[test_case("abc", ParsePositionError::WrongLength)]
    #[test_case("a9", ParsePositionError::BadRank)]
    #[test_case("a0", ParsePositionError::BadRank)]
    #[test_case("i1", ParsePositionError::BadFile)]
    fn test_position_from_str_invalid(s: &str, expected: ParsePositionError) {
        assert_eq!(s.parse::<Position>(), Err(expected));
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(1, 1).unwrap().to_string(), "a1");
        assert_eq!(Position::new(4, 5).unwrap().to_string(), "e4");
        assert_eq!(Position::new(8, 8).unwrap().to_string(), "h8");
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = Position::new(1, 1).unwrap();
        assert_eq!(a1.offset(1, 2), Position::new(2, 3));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);

        let h8 = Position::new(8, 8).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-7, -7), Some(a1));
    }

    #[test]
    fn test_all_covers_board_in_order() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0].to_string(), "a1");
        assert_eq!(all[7].to_string(), "h1");
        assert_eq!(all[63].to_string(), "h8");
        for (index, position) in all.iter().enumerate() {
            assert_eq!(position.index(), index);
        }
    }
}
