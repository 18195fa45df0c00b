use std::fmt;
use std::str::FromStr;

use crate::board::{Board, ParseBoardError};
use crate::movegen::{attacks, pseudo_legal_moves};
use crate::moves::Move;
use crate::piece::{Color, Piece};
use crate::position::Position;

/// Error returned when a move is rejected.
///
/// Covers an empty start square, a piece of the side not to move, and any
/// move outside the legal set. Callers get the offending move back but no
/// finer-grained cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid move: {0}")]
pub struct InvalidMove(pub Move);

/// Terminal-state summary for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check(Color),
    Checkmate(Color),
    Stalemate(Color),
}

/// A game in progress: the board and whose turn it is.
///
/// Only [`Game::make_move`] changes the position during play; every query
/// works on the live board or on throwaway clones of it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Game {
    /// Standard starting position, White to move.
    #[inline]
    pub fn initial() -> Self {
        Self::from_board(Board::initial_position(), Color::White)
    }

    /// Creates a game from an arbitrary board.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// Color to move.
    #[inline]
    pub fn team_turn(&self) -> Color {
        self.turn
    }

    pub fn set_team_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    /// Legal moves for the piece on `position`, regardless of whose turn it is.
    ///
    /// Each pseudo-legal candidate is played on a clone of the board and kept
    /// only if the mover's king is not in check afterwards. Returns an empty
    /// list for an empty square.
    pub fn valid_moves(&self, position: Position) -> Vec<Move> {
        let Some(piece) = self.board.get(position) else {
            return Vec::new();
        };

        pseudo_legal_moves(&self.board, position)
            .into_iter()
            .filter(|&mv| {
                let mut after = self.board.clone();
                apply(&mut after, mv);
                let safe = !in_check(&after, piece.color);
                if !safe {
                    log::trace!("pruned {mv}: leaves {} king in check", piece.color);
                }
                safe
            })
            .collect()
    }

    /// Legal moves of every piece of `color`, in board order.
    pub fn all_valid_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces_of(color)
            .flat_map(|(position, _)| self.valid_moves(position))
            .collect()
    }

    /// Plays `mv` for the side to move.
    ///
    /// On success the piece (or its promotion) lands on the destination, the
    /// start square is cleared and the turn passes. On failure nothing changes.
    pub fn make_move(&mut self, mv: Move) -> Result<(), InvalidMove> {
        let Some(piece) = self.board.get(mv.start) else {
            log::debug!("rejected {mv}: no piece on {}", mv.start);
            return Err(InvalidMove(mv));
        };
        if piece.color != self.turn {
            log::debug!("rejected {mv}: {} to move", self.turn);
            return Err(InvalidMove(mv));
        }
        if !self.valid_moves(mv.start).contains(&mv) {
            log::debug!("rejected {mv}: not a legal {}", piece.kind);
            return Err(InvalidMove(mv));
        }

        apply(&mut self.board, mv);
        self.turn = !self.turn;
        log::debug!("{} played {mv}", piece.color);
        Ok(())
    }

    /// True if `color` has a king and some enemy piece attacks it.
    ///
    /// Uses pseudo-legal enemy moves, so pinned attackers still give check.
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(&self.board, color)
    }

    /// True if it is `color`'s turn, `color` is in check and no piece of
    /// `color` has a legal move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.turn == color && self.is_in_check(color) && !self.has_any_valid_move(color)
    }

    /// True if `color` has a king, is not in check and no piece of `color`
    /// has a legal move.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        self.board.king(color).is_some()
            && !self.is_in_check(color)
            && !self.has_any_valid_move(color)
    }

    /// Summarises check, checkmate and stalemate for the side to move.
    pub fn status(&self) -> GameStatus {
        let color = self.turn;
        if self.is_in_checkmate(color) {
            GameStatus::Checkmate(color)
        } else if self.is_in_check(color) {
            GameStatus::Check(color)
        } else if self.is_in_stalemate(color) {
            GameStatus::Stalemate(color)
        } else {
            GameStatus::Ongoing
        }
    }

    /// Scans every piece of `color`, stopping at the first one that can move.
    fn has_any_valid_move(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(position, _)| !self.valid_moves(position).is_empty())
    }
}

/// Commits `mv` on `board` without any legality checks.
fn apply(board: &mut Board, mv: Move) {
    let Some(piece) = board.take(mv.start) else {
        return;
    };
    let landed = match mv.promotion {
        Some(kind) => Piece::new(piece.color, kind),
        None => piece,
    };
    board.set(mv.end, Some(landed));
}

fn in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        return false;
    };
    board
        .pieces_of(!color)
        .any(|(position, _)| attacks(board, position, king))
}

impl Default for Game {
    fn default() -> Self {
        Self::initial()
    }
}

/// Formats as `<placement> <w|b>`, the first two FEN fields.
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.board, self.turn.char())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &format_args!("{}", self.board))
            .field("turn", &self.turn)
            .finish()
    }
}

impl FromStr for Game {
    type Err = ParseGameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let (Some(placement), Some(turn)) = (fields.next(), fields.next()) else {
            return Err(ParseGameError::MissingField);
        };
        let board = placement.parse()?;
        let mut chars = turn.chars();
        let turn = match (chars.next(), chars.next()) {
            (Some(c), None) => Color::from_char(c),
            _ => None,
        }
        .ok_or_else(|| ParseGameError::BadTurn(turn.to_string()))?;
        Ok(Self::from_board(board, turn))
    }
}

/// Error type for parsing `<placement> <w|b>` game notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseGameError {
    #[error("expected '<placement> <w|b>'")]
    MissingField,
    #[error(transparent)]
    Board(#[from] ParseBoardError),
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    BadTurn(String),
}
