//! ledtoe - tic-tac-toe for a 5x5 LED matrix
//!
//! A human plays against a heuristic AI using either an analog joystick or
//! hand claps picked up by a microphone.
//!
//! # Architecture
//!
//! - **Input**: sensor readings become [`InputEvent`]s through a
//!   [`JoystickArbiter`] or a [`ClapArbiter`]
//! - **Controller**: [`GameController`] owns the board, cursor, turn and phase
//! - **Render**: [`RenderSink`] receives frames and flash animations;
//!   [`LedFrame`] lays them out on the matrix
//! - **Host**: [`TerminalSink`] and [`KeyboardSensors`] stand in for the
//!   board's hardware
//!
//! # Example
//!
//! ```no_run
//! use ledtoe::{ClapArbiter, ClapSettings, GameController, KeyboardSensors,
//!     LedtoeConfig, Palette, TerminalSink, ThreadDelay};
//! use ledtoe_tictactoe::HeuristicAi;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = LedtoeConfig::default();
//! let sink = TerminalSink::enter(Palette::default(), "")?;
//! let ai = HeuristicAi::new(rand::rng());
//! let mut game = GameController::new(sink, ThreadDelay, ai, &config);
//! let mut mic = ClapArbiter::new(KeyboardSensors::new(), ClapSettings::default());
//! game.render();
//! game.step(0, &mut mic);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod clock;
mod config;
mod controller;
mod cursor;
mod input;
mod render;
pub mod runner;
mod sim;

pub use cli::{Cli, Command};
pub use clock::{Clock, Delay, Millis, SystemClock, ThreadDelay};
pub use config::{
    AnimationConfig, ConfigError, FirstPlayer, Flash, GameConfig, JoystickConfig, LedtoeConfig,
    MicrophoneConfig,
};
pub use controller::{AI_MARK, GameController, HUMAN_MARK, TurnState};
pub use cursor::Cursor;
pub use input::{
    AxisBands, ClapArbiter, ClapClassifier, ClapSettings, EdgeDetector, Gesture, InputEvent,
    InputSource, JoystickArbiter, JoystickSensors, MicrophoneSensors, ThresholdState,
};
pub use render::{Color, FrameView, LedFrame, MATRIX_SIZE, Palette, RenderSink, TerminalSink};
pub use sim::KeyboardSensors;
