use std::collections::VecDeque;

use thiserror::Error;

use crate::game::{Game, InvalidMove};
use crate::moves::{Move, ParseMoveError};

/// Error when parsing or replaying a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("invalid move notation '{token}': {source}")]
    Parse {
        token: String,
        source: ParseMoveError,
    },
    #[error(transparent)]
    Rejected(#[from] InvalidMove),
}

/// A queue of moves in long algebraic notation, replayed one per tick.
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    pending: VecDeque<Move>,
}

impl MoveScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a script and create a queue from it.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut queue = Self::new();
        queue.push_script(script)?;
        Ok(queue)
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Moves are long algebraic notation (e.g., "e2e4", "e7e8q")
    /// - Whitespace and periods both separate moves
    ///
    /// Examples:
    /// - `"e2e4 e7e5"` - two moves
    /// - `"e2e4. e7e5. g1f3."` - three moves
    ///
    /// A script with any invalid move queues nothing.
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let moves = parse_script(script)?;
        self.pending.extend(moves);
        Ok(())
    }

    /// Queue a single move.
    pub fn push(&mut self, mv: Move) {
        self.pending.push_back(mv);
    }

    /// Number of moves still queued.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Play the next queued move on `game`.
    /// Returns None if no moves are pending.
    pub fn tick(&mut self, game: &mut Game) -> Option<Result<Move, InvalidMove>> {
        let mv = self.pending.pop_front()?;
        Some(game.make_move(mv).map(|()| mv))
    }

    /// Play every pending move, stopping at the first rejected one.
    ///
    /// Moves after a rejection stay queued.
    pub fn drain(&mut self, game: &mut Game) -> Result<(), ScriptError> {
        while let Some(result) = self.tick(game) {
            result?;
        }
        Ok(())
    }
}

/// Parse a script string into moves.
fn parse_script(script: &str) -> Result<Vec<Move>, ScriptError> {
    script
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().map_err(|source| ScriptError::Parse {
                token: token.to_string(),
                source,
            })
        })
        .collect()
}
