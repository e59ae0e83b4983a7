//! Rendering collaborators.
//!
//! The controller describes what to show through [`FrameView`] and
//! [`Color`]; sinks decide how. [`LedFrame`] maps a view onto the 5x5
//! matrix and [`TerminalSink`] draws that matrix in a terminal.

mod matrix;
mod terminal;

pub use matrix::{LedFrame, MATRIX_SIZE};
pub use terminal::{Palette, TerminalSink};

use crate::controller::TurnState;
use ledtoe_tictactoe::{Board, GamePhase, Player, Position};

/// Logical LED colors. RGB values belong to each sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, strum::Display)]
pub enum Color {
    /// Unlit.
    #[default]
    Off,
    /// Separator lines between squares.
    Grid,
    /// Highlight under the human's cursor.
    Cursor,
    /// Marks of player A.
    PlayerA,
    /// Marks of player B.
    PlayerB,
    /// Whole-matrix flash after a draw.
    Draw,
}

impl Color {
    /// The mark color of `player`.
    pub fn for_player(player: Player) -> Self {
        match player {
            Player::A => Self::PlayerA,
            Player::B => Self::PlayerB,
        }
    }
}

/// Snapshot of everything a sink needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView {
    /// Board contents.
    pub board: Board,
    /// Cursor square.
    pub cursor: Position,
    /// Whether the game is still running.
    pub phase: GamePhase,
    /// Whose move it is.
    pub turn: TurnState,
}

impl FrameView {
    /// Whether the cursor highlight is visible.
    ///
    /// Shown only while the human is choosing a square and only over an
    /// empty one.
    pub fn shows_cursor(&self) -> bool {
        self.phase.is_active() && self.turn == TurnState::HumanTurn && self.board.is_empty(self.cursor)
    }
}

/// Output device for game frames and flash animations.
///
/// Flashes block until finished.
pub trait RenderSink {
    /// Draws the board, grid and cursor.
    fn render_frame(&mut self, view: &FrameView);

    /// Blinks the whole matrix: `cycles` frames of `period_ms`, even frames lit.
    fn flash_fill(&mut self, color: Color, cycles: u8, period_ms: u64);

    /// Blinks one board square the same way, leaving the rest as last drawn.
    fn flash_cell(&mut self, position: Position, color: Color, cycles: u8, period_ms: u64);
}
