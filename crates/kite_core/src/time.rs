use std::time::{Duration, Instant};

/// Polled countdown for cooldowns and animation pacing.
///
/// A timer never fires on its own and never auto-resets: callers ask
/// [`Timer::is_ready`] each frame and call [`Timer::reset`] once they have
/// acted on it. Remaining time is always reported as a `Duration`.
#[derive(Debug, Clone)]
pub struct Timer {
    delay: Duration,
    start: Instant,
    time_left: Duration,
}

impl Timer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            start: Instant::now(),
            time_left: delay,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Remaining time as of the last readiness check, zero once ready.
    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    pub fn is_ready(&mut self) -> bool {
        self.is_ready_at(Instant::now())
    }

    pub fn is_ready_at(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.start);
        self.time_left = self.delay.saturating_sub(elapsed);
        elapsed >= self.delay
    }

    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.start = now;
        self.time_left = self.delay;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_immediately() {
        let mut timer = Timer::from_millis(1000);
        assert!(!timer.is_ready());
        assert!(timer.time_left() > Duration::from_millis(900));
    }

    #[test]
    fn ready_once_delay_elapsed() {
        let mut timer = Timer::from_millis(1000);
        let start = timer.start;
        assert!(!timer.is_ready_at(start + Duration::from_millis(999)));
        assert_eq!(timer.time_left(), Duration::from_millis(1));
        assert!(timer.is_ready_at(start + Duration::from_millis(1000)));
        assert_eq!(timer.time_left(), Duration::ZERO);
    }

    #[test]
    fn stays_ready_without_reset() {
        let mut timer = Timer::from_millis(10);
        let start = timer.start;
        assert!(timer.is_ready_at(start + Duration::from_millis(20)));
        assert!(timer.is_ready_at(start + Duration::from_millis(30)));
    }

    #[test]
    fn reset_restarts_countdown() {
        let mut timer = Timer::from_millis(1000);
        let start = timer.start;
        let later = start + Duration::from_millis(1500);
        assert!(timer.is_ready_at(later));

        timer.reset_at(later);
        assert_eq!(timer.time_left(), Duration::from_millis(1000));
        assert!(!timer.is_ready_at(later));
        assert!(!timer.is_ready_at(later + Duration::from_millis(500)));
        assert!(timer.is_ready_at(later + Duration::from_millis(1000)));
    }

    #[test]
    fn clock_before_start_counts_as_zero_elapsed() {
        let mut timer = Timer::from_millis(5);
        let before = timer.start.checked_sub(Duration::from_millis(1));
        if let Some(before) = before {
            assert!(!timer.is_ready_at(before));
            assert_eq!(timer.time_left(), Duration::from_millis(5));
        }
    }

    #[test]
    fn zero_delay_is_ready_immediately() {
        let mut timer = Timer::new(Duration::ZERO);
        assert!(timer.is_ready());
    }
}
