use std::fmt;
use std::str::FromStr;

use crate::piece::{Color, Piece, PieceKind};
use crate::position::{BOARD_SIZE, Position};

/// An 8x8 grid of optional pieces.
///
/// Squares are stored inline, so `clone()` yields a fully independent copy:
/// the legality filter in [`Game`](crate::Game) simulates candidate moves on
/// clones and relies on the original never observing those writes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// The standard 32-piece starting arrangement.
    pub fn initial_position() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            for (file, kind) in (1..=BOARD_SIZE).zip(PieceKind::BACK_RANK) {
                board.place(color.back_rank(), file, Piece::new(color, kind));
                board.place(
                    color.pawn_start_rank(),
                    file,
                    Piece::new(color, PieceKind::Pawn),
                );
            }
        }
        board
    }

    /// Get the piece at a given position, if any
    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    /// Put `piece` on `position`, replacing whatever was there.
    #[inline]
    pub fn set(&mut self, position: Position, piece: Option<Piece>) {
        self.squares[position.index()] = piece;
    }

    /// Removes and returns the piece at `position`.
    #[inline]
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.index()].take()
    }

    /// Iterates over occupied squares, rank 1 first, a-file first within a rank.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|position| self.get(position).map(|piece| (position, piece)))
    }

    /// Occupied squares belonging to `color`, in the same order as [`Board::pieces`].
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Square of the first king of `color` in board order.
    pub fn king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }

    fn place(&mut self, rank: u8, file: u8, piece: Piece) {
        if let Some(position) = Position::new(rank, file) {
            self.set(position, Some(piece));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial_position()
    }
}

/// Formats the board as a FEN piece-placement field, rank 8 first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (1..=BOARD_SIZE).rev() {
            let mut empty = 0;
            for file in 1..=BOARD_SIZE {
                match Position::new(rank, file).and_then(|position| self.get(position)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 1 {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board")
            .field(&format_args!("{self}"))
            .finish()
    }
}

/// Parses a FEN piece-placement field such as
/// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(ParseBoardError::WrongRankCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, rank) in rows.into_iter().zip((1..=BOARD_SIZE).rev()) {
            let mut file = 1u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                    file = file.saturating_add(skip as u8);
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or(ParseBoardError::BadPiece(c))?;
                let position =
                    Position::new(rank, file).ok_or(ParseBoardError::BadRankLength(rank))?;
                board.set(position, Some(piece));
                file = file.saturating_add(1);
            }
            if file != BOARD_SIZE + 1 {
                return Err(ParseBoardError::BadRankLength(rank));
            }
        }
        Ok(board)
    }
}

/// Error type for parsing a FEN piece-placement field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("expected 8 ranks separated by '/', found {0}")]
    WrongRankCount(usize),
    #[error("rank {0} does not describe exactly 8 squares")]
    BadRankLength(u8),
    #[error("invalid piece letter '{0}'")]
    BadPiece(char),
}
