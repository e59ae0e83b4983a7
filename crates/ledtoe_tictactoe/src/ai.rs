//! Heuristic opponent: win now, else block now, else a random empty square.
//!
//! The opponent never looks further than one ply ahead.

use super::rules::check_win;
use super::{Board, Player, Position};
use rand::Rng;
use tracing::{debug, instrument};

/// Error returned when a strategy cannot produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AiError {
    /// The board has no empty square left.
    #[display("No empty square available for the AI")]
    NoEmptySquare,
}

/// Why a strategy picked its square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Reason {
    /// Completes a line for the mover.
    Win,
    /// Denies the opponent a completed line.
    Block,
    /// No tactical move; uniform random choice.
    Random,
}

/// A chosen square with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Square to occupy.
    pub position: Position,
    /// Rule that selected it.
    pub reason: Reason,
}

/// Move selection contract shared by every opponent.
pub trait MoveStrategy {
    /// Selects an empty square for `me` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NoEmptySquare`] when the board is full.
    fn select_move(&mut self, board: &Board, me: Player) -> Result<Choice, AiError>;
}

/// First empty square (row-major) where placing `player` completes a line.
#[instrument(skip(board))]
pub fn winning_square(board: &Board, player: Player) -> Option<Position> {
    board
        .empty_positions()
        .find(|pos| check_win(&board.with_mark(*pos, player), player))
}

/// One-ply heuristic opponent backed by a random source.
#[derive(Debug, Clone)]
pub struct HeuristicAi<R> {
    rng: R,
}

impl<R: Rng> HeuristicAi<R> {
    /// Creates an opponent drawing fallback moves from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform choice among empty squares.
    ///
    /// Counts the empty squares, draws an index, then walks the board in
    /// row-major order to the indexed square.
    fn random_square(&mut self, board: &Board) -> Option<Position> {
        let empty = board.empty_positions().count();
        if empty == 0 {
            return None;
        }
        let choice = self.rng.random_range(0..empty);
        board.empty_positions().nth(choice)
    }
}

impl<R: Rng> MoveStrategy for HeuristicAi<R> {
    #[instrument(skip(self, board), fields(board = %board.display()))]
    fn select_move(&mut self, board: &Board, me: Player) -> Result<Choice, AiError> {
        let choice = if let Some(position) = winning_square(board, me) {
            Choice { position, reason: Reason::Win }
        } else if let Some(position) = winning_square(board, me.opponent()) {
            Choice { position, reason: Reason::Block }
        } else {
            let position = self.random_square(board).ok_or(AiError::NoEmptySquare)?;
            Choice { position, reason: Reason::Random }
        };

        debug!(position = %choice.position, reason = %choice.reason, "AI chose position");
        Ok(choice)
    }
}
