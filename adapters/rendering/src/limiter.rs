//! Frame pacing for the render worker.

use std::time::{Duration, Instant};

use crate::FRAMES_PER_SECOND;

/// Caps how often frames are painted.
///
/// The first observed frame only primes the clock. Afterwards a frame is
/// permitted once at least one budget has elapsed since the last permitted one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLimiter {
    budget: Duration,
    previous: Option<Instant>,
}

impl FrameLimiter {
    /// Creates a limiter allowing `frames_per_second` frames each second.
    ///
    /// A rate of zero is treated as one frame per second.
    #[must_use]
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / frames_per_second.max(1),
            previous: None,
        }
    }

    /// Minimum spacing between permitted frames.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Reports whether a frame observed at `now` may be painted.
    pub fn permit(&mut self, now: Instant) -> bool {
        let Some(previous) = self.previous else {
            self.previous = Some(now);
            return false;
        };

        if now.saturating_duration_since(previous) < self.budget {
            return false;
        }
        self.previous = Some(now);
        true
    }

    /// Time left until the next frame may be painted, measured from `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.previous.map_or(Duration::ZERO, |previous| {
            self.budget
                .saturating_sub(now.saturating_duration_since(previous))
        })
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(FRAMES_PER_SECOND)
    }
}
