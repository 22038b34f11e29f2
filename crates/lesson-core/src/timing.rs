//! Frame timing.

use instant::Instant;

/// Monotonic frame clock; each `delta_ms` call returns the elapsed
/// milliseconds since the previous call. Every per-frame constant in the
/// lessons is multiplied by this value.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    pub fn delta_ms(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f64() as f32 * 1000.0
    }
}
