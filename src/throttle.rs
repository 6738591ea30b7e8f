use std::time::{Duration, Instant};

/// Default interval between two hover resolution passes
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(150);

/// Leading-edge rate limiter. The first call in a window runs, the rest of
/// the window is dropped rather than queued.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_call: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: None,
        }
    }

    /// Returns true if a call at `now` may run, and records it
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_call {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_call = Some(now);
        true
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(DEFAULT_THROTTLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_always_runs() {
        let mut throttle = Throttle::default();
        assert!(throttle.try_acquire(Instant::now()));
    }

    #[test]
    fn calls_inside_window_are_dropped() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start + Duration::from_millis(10)));
        assert!(!throttle.try_acquire(start + Duration::from_millis(99)));
        assert!(throttle.try_acquire(start + Duration::from_millis(100)));
    }

    #[test]
    fn dropped_calls_do_not_extend_window() {
        let mut throttle = Throttle::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(throttle.try_acquire(start));
        assert!(!throttle.try_acquire(start + Duration::from_millis(90)));
        // window is measured from the last call that ran
        assert!(throttle.try_acquire(start + Duration::from_millis(120)));
    }

}
