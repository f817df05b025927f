//! Time source abstraction.
//!
//! The limiter anchors its window to "now minus window length" on every
//! check, so the notion of "now" is injected rather than read directly.
//! Production code uses [`SystemClock`]; tests drive [`ManualClock`] to
//! exercise window sliding without real sleeps.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// A source of the current unix time in seconds.
pub trait Clock: Send + Sync {
    /// Current unix time, seconds since the epoch, with fractional precision.
    fn now(&self) -> f64;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
    }
}

/// A clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<f64>,
}

impl ManualClock {
    /// Create a manual clock starting at the given unix time.
    pub fn new(start: f64) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        let mut now = self.now.lock();
        *now += secs;
    }

    /// Set the clock to an absolute unix time.
    pub fn set(&self, at: f64) {
        let mut now = self.now.lock();
        *now = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_recent() {
        let now = SystemClock.now();
        // Well past 2020, well before year 3000.
        assert!(now > 1_577_836_800.0);
        assert!(now < 32_503_680_000.0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(1000.0);
        assert_eq!(clock.now(), 1000.0);

        clock.advance(2.5);
        assert_eq!(clock.now(), 1002.5);

        clock.set(500.0);
        assert_eq!(clock.now(), 500.0);
    }
}
