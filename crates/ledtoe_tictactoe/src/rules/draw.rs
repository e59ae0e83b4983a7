//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Player, Square};
use super::win::check_win;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner.
#[instrument(skip(board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && !check_win(board, Player::A) && !check_win(board, Player::B)
}
