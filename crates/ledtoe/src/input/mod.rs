//! Input arbitration: raw sensor readings in, uniform game events out.
//!
//! Both modalities implement [`InputSource`], so the controller never
//! knows whether a joystick or a microphone is attached.

mod edge;
mod gesture;
mod joystick;
mod microphone;

pub use gesture::{ClapClassifier, ClapSettings, Gesture, ThresholdState};
pub use edge::EdgeDetector;
pub use joystick::{AxisBands, JoystickArbiter, JoystickSensors};
pub use microphone::{ClapArbiter, MicrophoneSensors};

use crate::clock::Millis;

/// A game-level input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InputEvent {
    /// Move the cursor by a row/column delta (each -1, 0 or 1), wrapping.
    #[display("MoveCursor({d_row}, {d_col})")]
    MoveCursor {
        /// Row delta.
        d_row: i8,
        /// Column delta.
        d_col: i8,
    },
    /// Move the cursor to the next empty square in row-major order.
    AdvanceCursor,
    /// Place the human's mark under the cursor.
    Confirm,
    /// Start a new game.
    Reset,
}

/// Source of input events, polled once per loop iteration.
pub trait InputSource {
    /// Reads the sensors and returns the events they produced, in order.
    fn poll(&mut self, now: Millis) -> Vec<InputEvent>;
}
