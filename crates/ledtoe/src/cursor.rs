//! Human selection cursor.

use ledtoe_tictactoe::{Board, Position};
use tracing::{debug, instrument};

/// The square the human is about to mark.
///
/// Starts at the center and wraps on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: Position,
}

impl Cursor {
    /// Creates a cursor at the center square.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves by a row/column delta, wrapping modulo 3 on each axis.
    #[instrument(skip(self), fields(from = %self.position))]
    pub fn shift(&mut self, d_row: i8, d_col: i8) {
        self.position = self.position.shifted(d_row, d_col);
        debug!(to = %self.position, "Cursor moved");
    }

    /// Steps forward in row-major order, wrapping, to the next empty square.
    ///
    /// The scan starts at the square after the current one and takes at most
    /// nine steps, so on a full board the cursor comes back to where it began.
    #[instrument(skip(self, board), fields(from = %self.position))]
    pub fn advance_to_empty(&mut self, board: &Board) {
        let mut candidate = self.position;
        for _ in 0..Position::ALL.len() {
            candidate = candidate.next();
            if board.is_empty(candidate) {
                break;
            }
        }
        self.position = candidate;
        debug!(to = %self.position, "Cursor advanced");
    }

    /// Returns to the center square.
    pub fn reset(&mut self) {
        self.position = Position::Center;
    }
}
