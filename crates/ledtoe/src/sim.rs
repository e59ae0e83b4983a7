//! Keyboard-backed sensors for running on a workstation.
//!
//! Arrow keys deflect the joystick, Enter presses confirm, Space is a clap,
//! `r` presses reset and `q` (or Esc, or Ctrl-C) quits. Each key press is
//! visible to exactly one sensor read, like a short tap on the hardware.

use crate::input::{JoystickSensors, MicrophoneSensors};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Axis reading with the stick at rest.
pub(crate) const AXIS_CENTER: u16 = 2048;

/// Axis reading at full deflection toward the high end.
pub(crate) const AXIS_MAX: u16 = 4095;

/// Amplitude of a simulated clap.
pub(crate) const CLAP_AMPLITUDE: f32 = 3.0;

/// Background microphone level between claps.
pub(crate) const AMBIENT_AMPLITUDE: f32 = 0.2;

#[derive(Debug, Default)]
struct KeyState {
    axes: Option<(u16, u16)>,
    confirm: bool,
    reset: bool,
    clap: bool,
    quit: bool,
}

/// Shared handle to the simulated sensor bank.
///
/// Clones share state: the host loop keeps one handle to pump key events
/// while the arbiter reads through another.
#[derive(Debug, Clone, Default)]
pub struct KeyboardSensors {
    state: Rc<RefCell<KeyState>>,
}

impl KeyboardSensors {
    /// Creates a bank with every sensor at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains pending terminal events without blocking.
    pub fn pump(&self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.key(key);
            }
        }
        Ok(())
    }

    /// Applies one key event.
    #[instrument(skip(self))]
    pub fn key(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let mut state = self.state.borrow_mut();
        match key.code {
            KeyCode::Up => state.axes = Some((0, AXIS_CENTER)),
            KeyCode::Down => state.axes = Some((AXIS_MAX, AXIS_CENTER)),
            KeyCode::Left => state.axes = Some((AXIS_CENTER, AXIS_MAX)),
            KeyCode::Right => state.axes = Some((AXIS_CENTER, 0)),
            KeyCode::Enter => state.confirm = true,
            KeyCode::Char(' ') => state.clap = true,
            KeyCode::Char('r') => state.reset = true,
            KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                state.quit = true;
            }
            other => {
                debug!(?other, "Unmapped key");
                return;
            }
        }
        debug!(code = ?key.code, "Key pressed");
    }

    /// Whether the user asked to leave.
    pub fn quit_requested(&self) -> bool {
        let quit = self.state.borrow().quit;
        if quit {
            info!("Quit requested");
        }
        quit
    }
}

impl JoystickSensors for KeyboardSensors {
    fn read_axes(&mut self) -> (u16, u16) {
        self.state
            .borrow_mut()
            .axes
            .take()
            .unwrap_or((AXIS_CENTER, AXIS_CENTER))
    }

    fn confirm_pressed(&mut self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().confirm)
    }

    fn reset_pressed(&mut self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().reset)
    }
}

impl MicrophoneSensors for KeyboardSensors {
    fn read_amplitude(&mut self) -> f32 {
        if std::mem::take(&mut self.state.borrow_mut().clap) {
            CLAP_AMPLITUDE
        } else {
            AMBIENT_AMPLITUDE
        }
    }

    fn reset_pressed(&mut self) -> bool {
        std::mem::take(&mut self.state.borrow_mut().reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(sensors: &KeyboardSensors, code: KeyCode) {
        sensors.key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_arrow_is_read_once() {
        let mut sensors = KeyboardSensors::new();
        press(&sensors, KeyCode::Up);
        assert_eq!(sensors.read_axes(), (0, AXIS_CENTER));
        assert_eq!(sensors.read_axes(), (AXIS_CENTER, AXIS_CENTER));
    }

    #[test]
    fn test_clones_share_state() {
        let handle = KeyboardSensors::new();
        let mut reader = handle.clone();
        press(&handle, KeyCode::Enter);
        assert!(reader.confirm_pressed());
        assert!(!reader.confirm_pressed());
    }

    #[test]
    fn test_space_is_a_clap() {
        let mut sensors = KeyboardSensors::new();
        assert_eq!(sensors.read_amplitude(), AMBIENT_AMPLITUDE);
        press(&sensors, KeyCode::Char(' '));
        assert_eq!(sensors.read_amplitude(), CLAP_AMPLITUDE);
        assert_eq!(sensors.read_amplitude(), AMBIENT_AMPLITUDE);
    }

    #[test]
    fn test_quit_keys() {
        let sensors = KeyboardSensors::new();
        assert!(!sensors.quit_requested());
        sensors.key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(sensors.quit_requested());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut sensors = KeyboardSensors::new();
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        sensors.key(release);
        assert!(!sensors.confirm_pressed());
    }
}
