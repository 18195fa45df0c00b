use crate::game::Game;
use crate::moves::Move;
use crate::piece::PieceKind;
use crate::position::Position;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination for the selected piece
    Destination,
    /// Legal destination that captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, currently attacked
    Check,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by the terminal renderer
/// (or any other presentation layer) to highlight a selected piece, where it may go, and a
/// king in check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Position, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Position, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, position: Position) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any earlier entry for it.
    pub fn set(&mut self, position: Position, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(pos, _)| *pos == position) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((position, feedback)),
        }
    }

    /// Returns true if there are no feedback squares to display.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the game.
pub trait FeedbackSource {
    /// Legal moves of the piece on `position`
    fn legal_moves_from(&self, position: Position) -> Vec<Move>;

    /// Whether a piece occupies `position`
    fn is_occupied(&self, position: Position) -> bool;

    /// Square of the side to move's king, if that king is in check
    fn checked_king(&self) -> Option<Position>;
}

impl FeedbackSource for Game {
    fn legal_moves_from(&self, position: Position) -> Vec<Move> {
        self.valid_moves(position)
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    fn checked_king(&self) -> Option<Position> {
        let turn = self.team_turn();
        if self.is_in_check(turn) {
            self.board().king(turn)
        } else {
            None
        }
    }
}

/// Compute visual feedback for the current game state.
///
/// - King in check: marks the king square
/// - Piece selected: marks it as origin plus every legal destination,
///   distinguishing captures from quiet moves
pub fn compute_feedback(source: &impl FeedbackSource, selected: Option<Position>) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(king) = source.checked_king() {
        feedback.set(king, SquareFeedback::Check);
    }

    if let Some(from) = selected {
        feedback.set(from, SquareFeedback::Origin);
        for mv in source.legal_moves_from(from) {
            // Promotions yield four moves to the same square; show it once.
            if mv.promotion.is_some_and(|kind| kind != PieceKind::Queen) {
                continue;
            }
            feedback.set(mv.end, classify_move(source, &mv));
        }
    }

    feedback
}

/// Classify a move as either a capture or regular destination
fn classify_move(source: &impl FeedbackSource, mv: &Move) -> SquareFeedback {
    if source.is_occupied(mv.end) {
        SquareFeedback::Capture
    } else {
        SquareFeedback::Destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> Position {
        s.parse().expect("test square is invalid")
    }

    fn game(s: &str) -> Game {
        s.parse().expect("invalid test position")
    }

    struct MockFeedbackSource {
        moves: Vec<Move>,
        occupied: Vec<Position>,
        checked_king: Option<Position>,
    }

    impl FeedbackSource for MockFeedbackSource {
        fn legal_moves_from(&self, position: Position) -> Vec<Move> {
            self.moves
                .iter()
                .copied()
                .filter(|mv| mv.start == position)
                .collect()
        }

        fn is_occupied(&self, position: Position) -> bool {
            self.occupied.contains(&position)
        }

        fn checked_king(&self) -> Option<Position> {
            self.checked_king
        }
    }

    #[test]
    fn test_no_feedback_when_nothing_happening() {
        let feedback = compute_feedback(&Game::initial(), None);
        assert_eq!(feedback.squares().len(), 0);
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_show_destinations_when_piece_selected() {
        let feedback = compute_feedback(&Game::initial(), Some(at("e2")));

        assert_eq!(feedback.get(at("e2")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(at("e3")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(at("e4")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(at("d2")), None);
    }

    #[test]
    fn test_selecting_empty_square_marks_only_origin() {
        let feedback = compute_feedback(&Game::initial(), Some(at("e4")));
        assert_eq!(feedback.squares(), &[(at("e4"), SquareFeedback::Origin)]);
    }

    #[test]
    fn test_distinguish_captures() {
        let game = game("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w");

        let feedback = compute_feedback(&game, Some(at("e4")));

        assert_eq!(feedback.get(at("e4")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(at("e5")), Some(SquareFeedback::Destination));
        assert_eq!(feedback.get(at("d5")), Some(SquareFeedback::Capture));
    }

    #[test]
    fn test_check_marks_king() {
        let game = game("4k3/8/8/8/8/8/8/4RK2 b");

        let feedback = compute_feedback(&game, None);

        assert_eq!(feedback.get(at("e8")), Some(SquareFeedback::Check));
        assert_eq!(feedback.squares().len(), 1);
    }

    #[test]
    fn test_selected_king_in_check_shows_origin() {
        let game = game("4k3/8/8/8/8/8/8/4RK2 b");

        let feedback = compute_feedback(&game, Some(at("e8")));

        assert_eq!(feedback.get(at("e8")), Some(SquareFeedback::Origin));
        assert_eq!(feedback.get(at("e7")), None);
        assert_eq!(feedback.get(at("d8")), Some(SquareFeedback::Destination));
    }

    #[test]
    fn test_promotion_shown_once() {
        let source = MockFeedbackSource {
            moves: PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promotion(at("a7"), at("a8"), kind))
                .collect(),
            occupied: vec![at("a7")],
            checked_king: None,
        };

        let feedback = compute_feedback(&source, Some(at("a7")));

        assert_eq!(feedback.squares().len(), 2);
        assert_eq!(feedback.get(at("a8")), Some(SquareFeedback::Destination));
    }

    #[test]
    fn test_set_replaces_existing_entry() {
        let mut feedback = BoardFeedback::new();
        feedback.set(at("e4"), SquareFeedback::Destination);
        feedback.set(at("e4"), SquareFeedback::Capture);

        assert_eq!(feedback.squares(), &[(at("e4"), SquareFeedback::Capture)]);
    }
}
