use std::io::{self, BufRead, Write};

use crate::feedback::{BoardFeedback, SquareFeedback, compute_feedback};
use crate::game::{Game, GameStatus, ParseGameError};
use crate::moves::ParseMoveError;
use crate::position::{BOARD_SIZE, ParsePositionError, Position};
use crate::script::{MoveScript, ScriptError};

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

/// A command the user typed that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid square: {0}")]
    Square(#[from] ParsePositionError),
    #[error("Invalid move: {0}")]
    Move(#[from] ParseMoveError),
    #[error("Invalid position: {0}")]
    Load(#[from] ParseGameError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("Unknown command '{0}'")]
    Unknown(String),
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw the board, optionally with a message underneath
    Redraw(Option<String>),
    Quit,
}

const HELP: &str = "Commands: s <square> | m <move> | play <moves> | load <fen> | r (reset) | p (refresh) | q (quit)";

/// State of one interactive session: the game and the selected square.
#[derive(Debug, Clone, Default)]
pub struct Session {
    game: Game,
    selected: Option<Position>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[inline]
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Feedback for the current selection and check state.
    pub fn feedback(&self) -> BoardFeedback {
        compute_feedback(&self.game, self.selected)
    }

    /// Runs a single command line.
    pub fn execute(&mut self, input: &str) -> Result<Outcome, CommandError> {
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Outcome::Redraw(None));
        };

        match command {
            "s" => {
                let square = parts.next().ok_or(CommandError::Usage("s <square>"))?;
                self.selected = Some(square.parse()?);
                Ok(Outcome::Redraw(None))
            }
            "m" => {
                let (Some(token), None) = (parts.next(), parts.next()) else {
                    return Err(CommandError::Usage("m <move>"));
                };
                let mut script = MoveScript::new();
                script.push(token.parse()?);
                self.play(&mut script)
            }
            "play" => {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() {
                    return Err(CommandError::Usage("play <move> <move> ..."));
                }
                let mut script = MoveScript::parse(&rest.join(" "))?;
                self.play(&mut script)
            }
            "load" => {
                let rest: Vec<&str> = parts.collect();
                let game = match rest.as_slice() {
                    [] => return Err(CommandError::Usage("load <placement> <w|b> | load startpos")),
                    ["startpos"] => Game::initial(),
                    fields => fields.join(" ").parse()?,
                };
                self.game = game;
                self.selected = None;
                Ok(Outcome::Redraw(Some("✅ Position loaded".to_string())))
            }
            "r" => {
                *self = Self::new();
                Ok(Outcome::Redraw(Some("🔄 Reset to initial state".to_string())))
            }
            "p" => Ok(Outcome::Redraw(None)),
            "q" => Ok(Outcome::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn play(&mut self, script: &mut MoveScript) -> Result<Outcome, CommandError> {
        let before = self.game.status();
        // A script is committed only if every move in it is accepted.
        let mut next = self.game.clone();
        script.drain(&mut next)?;
        self.game = next;
        self.selected = None;

        let status = self.game.status();
        if status != before {
            log::info!("status changed to {status:?}");
        }
        Ok(Outcome::Redraw(status_message(status)))
    }
}

fn status_message(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::Ongoing => None,
        GameStatus::Check(color) => Some(format!("⚠ {color} is in check")),
        GameStatus::Checkmate(color) => Some(format!("🏁 Checkmate, {} wins", !color)),
        GameStatus::Stalemate(color) => Some(format!("🏁 Stalemate, {color} cannot move")),
    }
}

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen(w: &mut impl Write) -> Result<(), DisplayError> {
    write!(w, "\x1B[2J\x1B[H")?;
    Ok(())
}

/// Runs an interactive terminal session on stdin/stdout.
pub fn run_interactive_terminal() -> Result<(), DisplayError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(stdin.lock(), &mut stdout)
}

/// Drives a session from any line source to any writer.
pub fn run(input: impl BufRead, w: &mut impl Write) -> Result<(), DisplayError> {
    let mut session = Session::new();

    clear_screen(w)?;
    draw_interface(w, &session)?;

    let mut lines = input.lines();
    loop {
        write!(w, "> ")?;
        w.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match session.execute(&line?) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Redraw(message)) => {
                clear_screen(w)?;
                draw_interface(w, &session)?;
                if let Some(message) = message {
                    writeln!(w, "\n{message}")?;
                }
            }
            Err(e) => {
                log::debug!("command failed: {e}");
                writeln!(w, "{e}")?;
            }
        }
    }
    Ok(())
}

/// Draws the complete interface: help text, turn, and board.
fn draw_interface(w: &mut impl Write, session: &Session) -> Result<(), DisplayError> {
    writeln!(w, "♟️  Chess")?;
    writeln!(w)?;
    writeln!(w, "{HELP}")?;
    writeln!(w)?;
    render_board(w, session.game(), &session.feedback())?;
    writeln!(w, "{} to move | {}", session.game().team_turn(), session.game())?;
    Ok(())
}

/// Render the board with feedback highlights to any writer.
pub fn render_board(
    w: &mut impl Write,
    game: &Game,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for rank in (1..=BOARD_SIZE).rev() {
        write!(w, " {rank} ")?;
        for file in 1..=BOARD_SIZE {
            let Some(position) = Position::new(rank, file) else {
                continue;
            };
            let symbol = game
                .piece_at(position)
                .map_or('·', |piece| piece.fen_char());
            write!(w, "{}", format_square(symbol, feedback.get(position)))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Map a square's symbol and feedback variant to an ANSI-colored cell string.
fn format_square(symbol: char, feedback: Option<SquareFeedback>) -> String {
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {symbol} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {symbol} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {symbol} \x1b[0m"),
        Some(SquareFeedback::Check) => format!("\x1b[45m {symbol} \x1b[0m"),
        None => format!(" {symbol} "),
    }
}
