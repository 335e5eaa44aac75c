//! Bounded exponential back-off for the memory-full retry loop, and the
//! suspension point it sleeps on.

use std::time::Duration;

/// The suspension point a memory-full retry sleeps on. Abstracted so tests
/// can swap in [`NoopSleeper`] and run the retry ladder instantly.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps on the real wall clock, via `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdSleeper;

impl Sleeper for StdSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Does not sleep. For tests that exercise the retry ladder's frame count
/// and bytes without paying wall-clock cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep(&mut self, _duration: Duration) {}
}

/// Doubles the delay per attempt, capped at `max`, giving up after
/// `max_attempts`.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
    pub max_attempts: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(200),
            max_attempts: 20,
        }
    }
}

impl Backoff {
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.min(16)).unwrap_or(u32::MAX);
        self.initial.saturating_mul(factor).min(self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_until_the_cap() {
        let backoff = Backoff {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(10),
            max_attempts: 10,
        };
        assert_eq!(backoff.delay_for(0), Duration::from_millis(1));
        assert_eq!(backoff.delay_for(1), Duration::from_millis(2));
        assert_eq!(backoff.delay_for(2), Duration::from_millis(4));
        assert_eq!(backoff.delay_for(10), Duration::from_millis(10));
    }
}
