//! Microphone arbiter: clap gestures become cursor events.

use super::{ClapClassifier, ClapSettings, EdgeDetector, Gesture, InputEvent, InputSource};
use crate::clock::Millis;
use tracing::{debug, instrument};

/// Raw microphone hardware readings.
pub trait MicrophoneSensors {
    /// Current signal amplitude in volts.
    fn read_amplitude(&mut self) -> f32;

    /// Level of the reset button (true while held).
    fn reset_pressed(&mut self) -> bool;
}

/// Feeds microphone samples through a [`ClapClassifier`].
///
/// A single strike advances the cursor to the next empty square and a
/// multi-strike confirms the move.
#[derive(Debug)]
pub struct ClapArbiter<S> {
    sensors: S,
    classifier: ClapClassifier,
    reset: EdgeDetector,
}

impl<S: MicrophoneSensors> ClapArbiter<S> {
    /// Creates an arbiter over the given sensors.
    #[instrument(skip(sensors))]
    pub fn new(sensors: S, settings: ClapSettings) -> Self {
        Self {
            sensors,
            classifier: ClapClassifier::new(settings),
            reset: EdgeDetector::new(),
        }
    }
}

impl<S: MicrophoneSensors> InputSource for ClapArbiter<S> {
    fn poll(&mut self, now: Millis) -> Vec<InputEvent> {
        let mut events = Vec::new();

        let amplitude = self.sensors.read_amplitude();
        if let Some(gesture) = self.classifier.sample(now, amplitude) {
            events.push(match gesture {
                Gesture::SingleStrike => InputEvent::AdvanceCursor,
                Gesture::MultiStrike => InputEvent::Confirm,
            });
        }

        if self.reset.rising(self.sensors.reset_pressed()) {
            debug!("Reset button pressed");
            events.push(InputEvent::Reset);
        }

        events
    }
}
