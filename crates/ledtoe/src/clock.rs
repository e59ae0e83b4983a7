//! Time sources and blocking pauses for the control loop.

use std::time::{Duration, Instant};
use tracing::trace;

/// Milliseconds since an arbitrary fixed origin.
pub type Millis = u64;

/// Monotonic millisecond clock.
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> Millis;
}

/// Blocking pause.
///
/// Pauses stall the whole loop; nothing else is serviced while one runs.
pub trait Delay {
    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: Millis);
}

/// Clock measuring time since it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Delay that sleeps the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay_ms(&mut self, ms: Millis) {
        trace!(ms, "Sleeping");
        std::thread::sleep(Duration::from_millis(ms));
    }
}
