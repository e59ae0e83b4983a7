//! Analog joystick arbiter.

use super::{EdgeDetector, InputEvent, InputSource};
use crate::clock::Millis;
use crate::config::JoystickConfig;
use tracing::{debug, instrument};

/// Raw joystick hardware readings.
pub trait JoystickSensors {
    /// Reads the X and Y axes (0-4095 on a 12-bit converter).
    fn read_axes(&mut self) -> (u16, u16);

    /// Level of the confirm button (true while held).
    fn confirm_pressed(&mut self) -> bool;

    /// Level of the reset button (true while held).
    fn reset_pressed(&mut self) -> bool;
}

/// Comparator bands mapping an axis reading to -1, 0 or +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBands {
    /// Readings below this map to -1.
    pub low: u16,
    /// Readings above this map to +1.
    pub high: u16,
}

impl AxisBands {
    /// Maps a reading to its band.
    pub fn classify(&self, value: u16) -> i8 {
        if value < self.low {
            -1
        } else if value > self.high {
            1
        } else {
            0
        }
    }
}

impl From<&JoystickConfig> for AxisBands {
    fn from(config: &JoystickConfig) -> Self {
        Self {
            low: *config.low_band(),
            high: *config.high_band(),
        }
    }
}

/// Turns joystick readings into cursor moves, confirms and resets.
///
/// The stick is mounted rotated on the board: the X axis drives rows
/// (low reading = up) and the Y axis drives columns (low reading = right).
#[derive(Debug)]
pub struct JoystickArbiter<S> {
    sensors: S,
    bands: AxisBands,
    debounce_ms: Millis,
    last_move: Option<Millis>,
    confirm: EdgeDetector,
    reset: EdgeDetector,
}

impl<S: JoystickSensors> JoystickArbiter<S> {
    /// Creates an arbiter over the given sensors.
    #[instrument(skip(sensors))]
    pub fn new(sensors: S, config: &JoystickConfig) -> Self {
        Self {
            sensors,
            bands: AxisBands::from(config),
            debounce_ms: *config.debounce_ms(),
            last_move: None,
            confirm: EdgeDetector::new(),
            reset: EdgeDetector::new(),
        }
    }

    fn debounced(&self, now: Millis) -> bool {
        match self.last_move {
            Some(last) => now.saturating_sub(last) >= self.debounce_ms,
            None => true,
        }
    }
}

impl<S: JoystickSensors> InputSource for JoystickArbiter<S> {
    fn poll(&mut self, now: Millis) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if self.reset.rising(self.sensors.reset_pressed()) {
            debug!("Reset button pressed");
            events.push(InputEvent::Reset);
        }

        let (x, y) = self.sensors.read_axes();
        let d_row = self.bands.classify(x);
        let d_col = -self.bands.classify(y);
        if (d_row != 0 || d_col != 0) && self.debounced(now) {
            debug!(x, y, d_row, d_col, "Joystick deflected");
            self.last_move = Some(now);
            events.push(InputEvent::MoveCursor { d_row, d_col });
        }

        if self.confirm.rising(self.sensors.confirm_pressed()) {
            debug!("Confirm button pressed");
            events.push(InputEvent::Confirm);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: (u16, u16) = (2048, 2048);

    #[derive(Debug, Default)]
    struct FakeStick {
        axes: (u16, u16),
        confirm: bool,
        reset: bool,
    }

    impl JoystickSensors for FakeStick {
        fn read_axes(&mut self) -> (u16, u16) {
            self.axes
        }
        fn confirm_pressed(&mut self) -> bool {
            self.confirm
        }
        fn reset_pressed(&mut self) -> bool {
            self.reset
        }
    }

    fn arbiter() -> JoystickArbiter<FakeStick> {
        let stick = FakeStick {
            axes: CENTER,
            ..FakeStick::default()
        };
        JoystickArbiter::new(stick, &JoystickConfig::default())
    }

    #[test]
    fn test_band_classification() {
        let bands = AxisBands { low: 1000, high: 3000 };
        assert_eq!(bands.classify(0), -1);
        assert_eq!(bands.classify(999), -1);
        assert_eq!(bands.classify(1000), 0);
        assert_eq!(bands.classify(3000), 0);
        assert_eq!(bands.classify(3001), 1);
        assert_eq!(bands.classify(4095), 1);
    }

    #[test]
    fn test_centered_stick_is_silent() {
        let mut arbiter = arbiter();
        assert!(arbiter.poll(0).is_empty());
    }

    #[test]
    fn test_axis_orientation() {
        let mut arbiter = arbiter();
        arbiter.sensors.axes = (0, 2048);
        assert_eq!(arbiter.poll(0), vec![InputEvent::MoveCursor { d_row: -1, d_col: 0 }]);

        arbiter.sensors.axes = (2048, 0);
        assert_eq!(arbiter.poll(1000), vec![InputEvent::MoveCursor { d_row: 0, d_col: 1 }]);

        arbiter.sensors.axes = (4095, 4095);
        assert_eq!(arbiter.poll(2000), vec![InputEvent::MoveCursor { d_row: 1, d_col: -1 }]);
    }

    #[test]
    fn test_debounce_limits_move_rate() {
        let mut arbiter = arbiter();
        arbiter.sensors.axes = (4095, 2048);

        let moves: Vec<Millis> = (0..=500)
            .step_by(10)
            .filter(|&t| !arbiter.poll(t).is_empty())
            .collect();
        assert_eq!(moves, vec![0, 200, 400]);
    }

    #[test]
    fn test_confirm_is_edge_triggered() {
        let mut arbiter = arbiter();
        arbiter.sensors.confirm = true;
        assert_eq!(arbiter.poll(0), vec![InputEvent::Confirm]);
        assert!(arbiter.poll(10).is_empty());
        assert!(arbiter.poll(20).is_empty());

        arbiter.sensors.confirm = false;
        assert!(arbiter.poll(30).is_empty());
        arbiter.sensors.confirm = true;
        assert_eq!(arbiter.poll(40), vec![InputEvent::Confirm]);
    }

    #[test]
    fn test_reset_is_edge_triggered_and_first() {
        let mut arbiter = arbiter();
        arbiter.sensors.reset = true;
        arbiter.sensors.confirm = true;
        arbiter.sensors.axes = (0, 2048);

        assert_eq!(
            arbiter.poll(0),
            vec![
                InputEvent::Reset,
                InputEvent::MoveCursor { d_row: -1, d_col: 0 },
                InputEvent::Confirm,
            ]
        );
        arbiter.sensors.axes = CENTER;
        assert!(arbiter.poll(10).is_empty());
    }
}
