//! Released-to-pressed edge detection for buttons.

/// Reports a press once, on the transition from released to pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeDetector {
    last: bool,
}

impl EdgeDetector {
    /// Creates a detector that assumes the button starts released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the current level; true only on a rising edge.
    pub fn rising(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.last;
        self.last = pressed;
        edge
    }
}
