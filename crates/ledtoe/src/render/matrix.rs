//! 5x5 LED matrix layout.

use super::{Color, FrameView};
use ledtoe_tictactoe::{Position, Square};

/// Side length of the LED matrix.
pub const MATRIX_SIZE: usize = 5;

/// Matrix coordinates of the LED that shows a board square.
fn led_coords(position: Position) -> (usize, usize) {
    (position.row() * 2, position.col() * 2)
}

/// Colors of every LED for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedFrame {
    cells: [[Color; MATRIX_SIZE]; MATRIX_SIZE],
}

impl LedFrame {
    /// Every LED set to `color`.
    pub fn filled(color: Color) -> Self {
        Self {
            cells: [[color; MATRIX_SIZE]; MATRIX_SIZE],
        }
    }

    /// Lays out a view: grid lines on odd rows and columns, marks on the
    /// even/even LEDs, and the cursor over an empty square on the human's turn.
    pub fn compose(view: &FrameView) -> Self {
        let mut frame = Self::default();

        for row in 0..MATRIX_SIZE {
            for col in 0..MATRIX_SIZE {
                if row % 2 == 1 || col % 2 == 1 {
                    frame.cells[row][col] = Color::Grid;
                }
            }
        }

        for position in Position::ALL {
            if let Square::Occupied(player) = view.board.get(position) {
                frame.set_square(position, Color::for_player(player));
            }
        }

        if view.shows_cursor() {
            frame.set_square(view.cursor, Color::Cursor);
        }

        frame
    }

    /// Color at matrix `(row, col)`, or `None` outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Color of the LED showing a board square.
    pub fn square(&self, position: Position) -> Color {
        let (row, col) = led_coords(position);
        self.cells[row][col]
    }

    /// Sets the LED showing a board square.
    pub fn set_square(&mut self, position: Position, color: Color) {
        let (row, col) = led_coords(position);
        self.cells[row][col] = color;
    }

    /// Rows of the matrix, top first.
    pub fn rows(&self) -> &[[Color; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::TurnState;
    use ledtoe_tictactoe::{Board, GamePhase, Outcome, Player};

    fn view(board: Board, cursor: Position, turn: TurnState) -> FrameView {
        FrameView {
            board,
            cursor,
            phase: GamePhase::Active,
            turn,
        }
    }

    #[test]
    fn test_empty_board_layout() {
        let frame = LedFrame::compose(&view(Board::new(), Position::Center, TurnState::AiTurn));
        let expected_row = [Color::Off, Color::Grid, Color::Off, Color::Grid, Color::Off];
        for row in [0, 2, 4] {
            assert_eq!(frame.rows()[row], expected_row);
        }
        for row in [1, 3] {
            assert_eq!(frame.rows()[row], [Color::Grid; MATRIX_SIZE]);
        }
    }

    #[test]
    fn test_marks_land_on_even_cells() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Player::A).unwrap();
        board.place(Position::BottomRight, Player::B).unwrap();
        board.place(Position::MiddleRight, Player::A).unwrap();

        let frame = LedFrame::compose(&view(board, Position::Center, TurnState::AiTurn));
        assert_eq!(frame.get(0, 0), Some(Color::PlayerA));
        assert_eq!(frame.get(4, 4), Some(Color::PlayerB));
        assert_eq!(frame.get(2, 4), Some(Color::PlayerA));
        assert_eq!(frame.get(2, 2), Some(Color::Off));
        assert_eq!(frame.get(5, 0), None);
    }

    #[test]
    fn test_cursor_only_on_human_turn_over_empty() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Player::A).unwrap();

        let human = LedFrame::compose(&view(board, Position::Center, TurnState::HumanTurn));
        assert_eq!(human.square(Position::Center), Color::Cursor);

        let ai = LedFrame::compose(&view(board, Position::Center, TurnState::AiTurn));
        assert_eq!(ai.square(Position::Center), Color::Off);

        let occupied = LedFrame::compose(&view(board, Position::TopLeft, TurnState::HumanTurn));
        assert_eq!(occupied.square(Position::TopLeft), Color::PlayerA);
    }

    #[test]
    fn test_no_cursor_after_game_ends() {
        let mut finished = view(Board::new(), Position::Center, TurnState::HumanTurn);
        finished.phase = GamePhase::Finished(Outcome::Draw);
        let frame = LedFrame::compose(&finished);
        assert_eq!(frame.square(Position::Center), Color::Off);
    }
}
