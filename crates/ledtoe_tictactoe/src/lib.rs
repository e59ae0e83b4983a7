//! Pure tic-tac-toe game logic for the LED board.
//!
//! - [`Board`], [`Square`], [`Player`] and [`Position`] model the 3x3 grid
//! - [`rules`] evaluates wins and draws over the 8 lines
//! - [`HeuristicAi`] picks the opponent's move behind [`MoveStrategy`]

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod ai;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use ai::{AiError, Choice, HeuristicAi, MoveStrategy, Reason, winning_square};
pub use phases::{GamePhase, Outcome};
pub use position::Position;
pub use types::{Board, Player, Square};
