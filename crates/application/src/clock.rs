//! Time sources for the pipeline.

use std::cell::Cell;
use std::time::Duration;

/// Supplies the timestamp used for one frame.
///
/// Only differences between readings matter.
pub trait Clock {
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Wall-clock time since the Unix epoch.
///
/// No correction is made for clock steps; a reading earlier than the previous
/// one counts as no time having passed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        let micros = chrono::Utc::now().timestamp_micros();
        Duration::from_micros(u64::try_from(micros).unwrap_or(0))
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new(start: Duration) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(100));

        clock.advance(Duration::from_millis(33));
        assert_eq!(clock.now(), Duration::from_millis(133));

        clock.set(Duration::from_secs(5));
        assert_eq!((&clock).now(), Duration::from_secs(5));
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        let now = SystemClock.now();
        // 2020-01-01T00:00:00Z
        assert!(now > Duration::from_secs(1_577_836_800));
    }
}
