//! Whether a game is running, and how it ended.

use super::Player;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// One player completed a line.
    Winner(Player),
    /// The board filled with no line completed.
    Draw,
}

impl Outcome {
    /// The winning player, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Self::Winner(player) => Some(*player),
            Self::Draw => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(player) => write!(f, "{player} wins"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

/// Game lifecycle: moves are accepted only while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Moves are accepted.
    #[default]
    Active,
    /// Over until the next reset.
    Finished(Outcome),
}

impl GamePhase {
    /// True while moves are accepted.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
