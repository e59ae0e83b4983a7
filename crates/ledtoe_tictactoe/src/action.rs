//! Moves and the reasons a move can be refused.

use super::{Player, Position};

/// One mark placed on one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Whose mark.
    pub player: Player,
    /// Target square.
    pub position: Position,
}

impl Move {
    /// Pairs a player with a target square.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Whose mark.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Target square.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.player, self.position)
    }
}

/// A move that cannot be applied to the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Target square already holds a mark.
    #[display("{} is already taken", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// A winner or a draw has been declared.
    #[display("the game has ended")]
    GameOver,

    /// The mover is waiting for the other side.
    #[display("player {} moved out of turn", _0)]
    WrongTurn(#[error(not(source))] Player),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display() {
        let mv = Move::new(Player::B, Position::Center);
        assert_eq!(mv.to_string(), format!("B@{}", Position::Center));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoveError::WrongTurn(Player::A).to_string(),
            "player A moved out of turn"
        );
        assert_eq!(MoveError::GameOver.to_string(), "the game has ended");
    }
}
