//! Pseudo-legal move generation.
//!
//! Every rule here ignores whether the mover's own king ends up in check;
//! that filter lives in [`Game::valid_moves`](crate::Game::valid_moves).

use crate::board::Board;
use crate::moves::Move;
use crate::piece::{Piece, PieceKind};
use crate::position::Position;

/// Appends the pseudo-legal moves of `piece` standing on `from`.
pub type Generator = fn(&Board, Position, Piece, &mut Vec<Move>);

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ADJACENT: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, -1),
    (2, 1),
    (1, -2),
    (1, 2),
    (-1, -2),
    (-1, 2),
    (-2, -1),
    (-2, 1),
];

/// Movement rule for each piece kind.
pub fn generator(kind: PieceKind) -> Generator {
    match kind {
        PieceKind::King => king_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Pawn => pawn_moves,
    }
}

/// Pseudo-legal moves of whatever piece stands on `from`; empty if none.
///
/// The order is fixed for a given board, which keeps everything built on
/// top of it deterministic.
pub fn pseudo_legal_moves(board: &Board, from: Position) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(piece) = board.get(from) {
        generator(piece.kind)(board, from, piece, &mut moves);
    }
    moves
}

/// True if `piece` on `from` could move to `target` ignoring check.
pub fn attacks(board: &Board, from: Position, target: Position) -> bool {
    pseudo_legal_moves(board, from)
        .iter()
        .any(|mv| mv.end == target)
}

fn king_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    step(board, from, piece, &ADJACENT, moves);
}

fn knight_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    step(board, from, piece, &KNIGHT_JUMPS, moves);
}

fn rook_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    slide(board, from, piece, &ORTHOGONAL, moves);
}

fn bishop_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    slide(board, from, piece, &DIAGONAL, moves);
}

fn queen_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    slide(board, from, piece, &ORTHOGONAL, moves);
    slide(board, from, piece, &DIAGONAL, moves);
}

fn pawn_moves(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
    let forward = piece.color.forward();

    if let Some(one) = from.offset(forward, 0)
        && board.get(one).is_none()
    {
        push_pawn_move(from, one, piece, moves);

        if from.rank() == piece.color.pawn_start_rank()
            && let Some(two) = one.offset(forward, 0)
            && board.get(two).is_none()
        {
            push_pawn_move(from, two, piece, moves);
        }
    }

    for side in [-1, 1] {
        if let Some(to) = from.offset(forward, side)
            && board.get(to).is_some_and(|other| other.color != piece.color)
        {
            push_pawn_move(from, to, piece, moves);
        }
    }
}

/// A pawn reaching its last rank emits one move per promotion choice.
fn push_pawn_move(from: Position, to: Position, piece: Piece, moves: &mut Vec<Move>) {
    if to.rank() == piece.color.promotion_rank() {
        moves.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promotion(from, to, kind)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Single-step movement to each offset that is empty or holds an enemy.
fn step(board: &Board, from: Position, piece: Piece, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &(d_rank, d_file) in offsets {
        let Some(to) = from.offset(d_rank, d_file) else {
            continue;
        };
        if board.get(to).is_none_or(|other| other.color != piece.color) {
            moves.push(Move::new(from, to));
        }
    }
}

/// Ray movement: extend until the edge, stopping before an own piece and on
/// an enemy piece.
fn slide(
    board: &Board,
    from: Position,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_rank, d_file) in directions {
        let mut current = from;
        while let Some(to) = current.offset(d_rank, d_file) {
            match board.get(to) {
                None => moves.push(Move::new(from, to)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;
    use test_case::test_case;

    fn at(s: &str) -> Position {
        s.parse().expect("test square is invalid")
    }

    fn board(fen: &str) -> Board {
        fen.parse().expect("invalid placement")
    }

    /// Destination squares in notation, sorted, for readable comparisons.
    fn destinations(board: &Board, from: &str) -> Vec<String> {
        let mut ends: Vec<String> = pseudo_legal_moves(board, at(from))
            .iter()
            .map(|mv| mv.end.to_string())
            .collect();
        ends.sort();
        ends
    }

    #[test]
    fn test_empty_square_has_no_moves() {
        assert!(pseudo_legal_moves(&Board::initial_position(), at("e4")).is_empty());
    }

    #[test_case("8/8/8/8/3K4/8/8/8", "d4", 8; "king center")]
    #[test_case("8/8/8/8/8/8/8/K7", "a1", 3; "king corner")]
    #[test_case("8/8/8/8/3N4/8/8/8", "d4", 8; "knight center")]
    #[test_case("8/8/8/8/8/8/8/N7", "a1", 2; "knight corner")]
    #[test_case("8/8/8/8/3R4/8/8/8", "d4", 14; "rook open board")]
    #[test_case("8/8/8/8/3B4/8/8/8", "d4", 13; "bishop open board")]
    #[test_case("8/8/8/8/3Q4/8/8/8", "d4", 27; "queen open board")]
    fn test_open_board_move_counts(fen: &str, from: &str, expected: usize) {
        assert_eq!(pseudo_legal_moves(&board(fen), at(from)).len(), expected);
    }

    #[test]
    fn test_rook_stops_before_own_and_on_enemy() {
        // White rook d4, own pawn d6, enemy pawn f4
        let board = board("8/8/3P4/8/3R1p2/8/8/8");
        assert_eq!(
            destinations(&board, "d4"),
            ["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4"]
        );
    }

    #[test]
    fn test_bishop_rays_blocked() {
        // White bishop c1 boxed in by own pawns b2/d2
        let initial = Board::initial_position();
        assert!(pseudo_legal_moves(&initial, at("c1")).is_empty());

        // Enemy knight on e3 is captured, nothing beyond it
        let board = board("8/8/8/8/8/4n3/8/2B5");
        assert_eq!(destinations(&board, "c1"), ["a3", "b2", "d2", "e3"]);
    }

    #[test]
    fn test_knight_from_initial_position() {
        let initial = Board::initial_position();
        assert_eq!(destinations(&initial, "g1"), ["f3", "h3"]);
        assert_eq!(destinations(&initial, "b8"), ["a6", "c6"]);
    }

    #[test]
    fn test_king_cannot_take_own_pieces() {
        let initial = Board::initial_position();
        assert!(pseudo_legal_moves(&initial, at("e1")).is_empty());
    }

    #[test_case("e2", &["e3", "e4"]; "white start rank")]
    #[test_case("d7", &["d5", "d6"]; "black start rank")]
    fn test_pawn_double_step(from: &str, expected: &[&str]) {
        assert_eq!(destinations(&Board::initial_position(), from), expected);
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        // Blocker on e3 stops both steps, blocker on d4 only the double step
        let board = board("8/8/8/8/3n4/4n3/3PP3/8");
        assert!(destinations(&board, "e2").is_empty());
        assert_eq!(destinations(&board, "d2"), ["d3", "e3"]);
    }

    #[test]
    fn test_pawn_no_double_step_off_start_rank() {
        let board = board("8/8/8/8/8/4P3/8/8");
        assert_eq!(destinations(&board, "e3"), ["e4"]);
    }

    #[test]
    fn test_pawn_captures_only_enemies_diagonally() {
        // White pawn e4, black pawn d5, white pawn f5, black pawn e5 blocks
        let board = board("8/8/8/3ppP2/4P3/8/8/8");
        assert_eq!(destinations(&board, "e4"), ["d5"]);
    }

    #[test]
    fn test_black_pawn_moves_down() {
        let board = board("8/8/8/8/4p3/3P4/8/8");
        assert_eq!(destinations(&board, "e4"), ["d3", "e3"]);
    }

    #[test]
    fn test_promotion_emits_four_moves() {
        let board = board("8/4P3/8/8/8/8/8/8");
        let moves = pseudo_legal_moves(&board, at("e7"));

        assert_eq!(moves.len(), 4);
        for kind in PieceKind::PROMOTIONS {
            assert!(moves.contains(&Move::with_promotion(at("e7"), at("e8"), kind)));
        }
        assert!(!moves.contains(&Move::new(at("e7"), at("e8"))));
    }

    #[test]
    fn test_promotion_by_capture() {
        // Black pawn b2 blocked on b1, may capture on a1 or c1
        let board = board("8/8/8/8/8/8/1p6/RNB5");
        let moves = pseudo_legal_moves(&board, at("b2"));

        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.promotion.is_some()));
        assert!(moves.iter().all(|mv| mv.end == at("a1") || mv.end == at("c1")));
    }

    #[test]
    fn test_every_generated_move_starts_on_source() {
        let initial = Board::initial_position();
        for (from, _) in initial.pieces() {
            for mv in pseudo_legal_moves(&initial, from) {
                assert_eq!(mv.start, from);
                assert_ne!(mv.end, from);
            }
        }
    }

    #[test]
    fn test_attacks() {
        let board = board("4k3/8/8/8/8/8/8/4R3");
        assert!(attacks(&board, at("e1"), at("e8")));
        assert!(!attacks(&board, at("e1"), at("d8")));
        assert_eq!(board.get(at("e8")).map(|p| p.color), Some(Color::Black));
    }
}
