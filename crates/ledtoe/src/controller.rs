//! Game controller: turn order, phases, and render requests.
//!
//! The controller owns all game state. Each call to
//! [`GameController::step`] either plays the AI's turn or drains one poll of
//! input events; pauses and animations block inside the call.

use crate::clock::{Delay, Millis};
use crate::config::{AnimationConfig, FirstPlayer, LedtoeConfig};
use crate::cursor::Cursor;
use crate::input::{InputEvent, InputSource};
use crate::render::{Color, FrameView, RenderSink};
use ledtoe_tictactoe::{
    Board, GamePhase, Move, MoveError, MoveStrategy, Outcome, Player, Position, rules,
};
use tracing::{debug, error, info, instrument, warn};

/// Mark placed by the AI opponent.
pub const AI_MARK: Player = Player::A;

/// Mark placed by the human.
pub const HUMAN_MARK: Player = Player::B;

/// Whose move the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TurnState {
    /// The AI moves on the next step.
    AiTurn,
    /// Waiting for the human to confirm a square.
    HumanTurn,
}

impl TurnState {
    /// The turn that opens a game for the configured first player.
    pub fn opening(first_player: FirstPlayer) -> Self {
        match first_player {
            FirstPlayer::Ai => Self::AiTurn,
            FirstPlayer::Human => Self::HumanTurn,
        }
    }

    /// The mark placed on this turn.
    pub fn mark(self) -> Player {
        match self {
            Self::AiTurn => AI_MARK,
            Self::HumanTurn => HUMAN_MARK,
        }
    }

    /// The other side's turn.
    pub fn other(self) -> Self {
        match self {
            Self::AiTurn => Self::HumanTurn,
            Self::HumanTurn => Self::AiTurn,
        }
    }
}

/// Single-owner game state machine.
#[derive(Debug)]
pub struct GameController<R, D, S> {
    sink: R,
    delay: D,
    ai: S,
    board: Board,
    cursor: Cursor,
    phase: GamePhase,
    turn: TurnState,
    first_player: FirstPlayer,
    ai_delay_ms: Millis,
    animation: AnimationConfig,
}

impl<R, D, S> GameController<R, D, S>
where
    R: RenderSink,
    D: Delay,
    S: MoveStrategy,
{
    /// Creates a controller in the opening state. Nothing is drawn until
    /// [`render`](Self::render) or the first step.
    #[instrument(skip(sink, delay, ai, config))]
    pub fn new(sink: R, delay: D, ai: S, config: &LedtoeConfig) -> Self {
        let game = config.game();
        let first_player = *game.first_player();
        info!(first_player = first_player.label(), "Creating game controller");
        Self {
            sink,
            delay,
            ai,
            board: Board::new(),
            cursor: Cursor::new(),
            phase: GamePhase::Active,
            turn: TurnState::opening(first_player),
            first_player,
            ai_delay_ms: *game.ai_delay_ms(),
            animation: *config.animation(),
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current cursor square.
    pub fn cursor(&self) -> Position {
        self.cursor.position()
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whose move it is.
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// The render sink.
    pub fn sink(&self) -> &R {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    /// The pacing source.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Snapshot for the render sink.
    pub fn view(&self) -> FrameView {
        FrameView {
            board: self.board,
            cursor: self.cursor.position(),
            phase: self.phase,
            turn: self.turn,
        }
    }

    /// Draws the current state.
    pub fn render(&mut self) {
        let view = self.view();
        self.sink.render_frame(&view);
    }

    /// Advances the game by one loop iteration.
    ///
    /// On the AI's turn the AI moves and `input` is not polled. Otherwise
    /// every event from one poll is handled in order.
    pub fn step<I: InputSource + ?Sized>(&mut self, now: Millis, input: &mut I) {
        if self.phase.is_active() && self.turn == TurnState::AiTurn {
            self.play_ai_turn();
            return;
        }

        for event in input.poll(now) {
            self.handle(event);
        }
    }

    /// Applies one input event.
    #[instrument(skip(self), fields(phase = ?self.phase, turn = %self.turn))]
    pub fn handle(&mut self, event: InputEvent) {
        match (self.phase, event) {
            (_, InputEvent::Reset) => self.reset(),
            (GamePhase::Finished(_), InputEvent::Confirm) => {
                debug!("Confirm after game over starts a new game");
                self.reset();
            }
            (GamePhase::Finished(_), _) => debug!("Game over, ignoring cursor input"),
            (GamePhase::Active, _) if self.turn != TurnState::HumanTurn => {
                debug!("Not the human's turn, ignoring input");
            }
            (GamePhase::Active, InputEvent::MoveCursor { d_row, d_col }) => {
                self.cursor.shift(d_row, d_col);
                self.render();
            }
            (GamePhase::Active, InputEvent::AdvanceCursor) => {
                self.cursor.advance_to_empty(&self.board);
                self.render();
            }
            (GamePhase::Active, InputEvent::Confirm) => self.confirm_human_move(),
        }
    }

    /// Plays the AI's move: pause, select, place, draw, evaluate.
    #[instrument(skip(self))]
    pub fn play_ai_turn(&mut self) {
        self.delay.delay_ms(self.ai_delay_ms);

        let choice = match self.ai.select_move(&self.board, AI_MARK) {
            Ok(choice) => choice,
            Err(e) => {
                error!(error = %e, board = %self.board.display(), "AI could not move");
                self.finish(Outcome::Draw);
                return;
            }
        };

        if let Err(e) = self.apply(Move::new(AI_MARK, choice.position)) {
            error!(error = %e, position = %choice.position, "AI chose an illegal square");
            self.finish(Outcome::Draw);
            return;
        }
        info!(position = %choice.position, reason = %choice.reason, "AI moved");
        self.conclude_turn();
    }

    /// Starts a new game: empty board, centered cursor, configured opener.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.cursor.reset();
        self.phase = GamePhase::Active;
        self.turn = TurnState::opening(self.first_player);
        info!(turn = %self.turn, "New game");
        self.render();
    }

    fn confirm_human_move(&mut self) {
        let position = self.cursor.position();
        if let Err(e) = self.apply(Move::new(HUMAN_MARK, position)) {
            debug!(error = %e, "Move rejected");
            return;
        }
        info!(%position, "Human moved");

        let flash = *self.animation.confirm();
        self.sink
            .flash_cell(position, Color::for_player(HUMAN_MARK), flash.cycles, flash.period_ms);
        self.conclude_turn();
    }

    /// Validates and places a move on the live board.
    fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        if !self.phase.is_active() {
            return Err(MoveError::GameOver);
        }
        if mv.player() != self.turn.mark() {
            return Err(MoveError::WrongTurn(mv.player()));
        }
        self.board.place(mv.position(), mv.player())?;
        debug!(%mv, board = %self.board.display(), "Move applied");
        Ok(())
    }

    /// Ends the game on a win or draw, otherwise passes the turn. Draws the
    /// placed mark exactly once either way.
    fn conclude_turn(&mut self) {
        match rules::evaluate(&self.board) {
            Some(outcome) => {
                self.render();
                self.finish(outcome);
            }
            None => {
                self.turn = self.turn.other();
                debug!(turn = %self.turn, "Turn passed");
                self.render();
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if rules::check_win(&self.board, Player::A) && rules::check_win(&self.board, Player::B) {
            warn!(board = %self.board.display(), "Both players hold a line");
        }
        info!(%outcome, "Game over");
        self.phase = GamePhase::Finished(outcome);

        let (color, flash) = match outcome {
            Outcome::Winner(player) => (Color::for_player(player), *self.animation.win()),
            Outcome::Draw => (Color::Draw, *self.animation.draw()),
        };
        self.sink.flash_fill(color, flash.cycles, flash.period_ms);
        self.render();
    }
}
