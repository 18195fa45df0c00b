//! Chess rules engine: board, move generation, legality and game state.
//!
//! [`Game`] is the entry point. It owns a [`Board`] and the color to move,
//! filters pseudo-legal moves from [`movegen`] down to legal ones, executes
//! moves and answers check, checkmate and stalemate queries. Castling, en
//! passant and draw rules other than stalemate are not part of the rules.

pub mod board;
pub mod feedback;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod script;
pub mod terminal;

pub use board::Board;
pub use game::{Game, GameStatus, InvalidMove};
pub use moves::Move;
pub use piece::{Color, Piece, PieceKind};
pub use position::Position;
