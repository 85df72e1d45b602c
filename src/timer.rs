use std::time::{Duration, Instant};

/// Default cadence of the live elapsed-time display
pub const TICK_RATE_MS: u64 = 100;

/// Tick schedule that exists only while an attempt (or arcade round) is live.
///
/// The owning state holds this by value, so leaving that state drops the
/// timer and with it every future deadline. Nothing outside can keep a
/// stale schedule alive.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveTimer {
    started_at: Instant,
    interval: Duration,
    next_tick: Instant,
    elapsed: Duration,
}

impl ActiveTimer {
    pub fn start(now: Instant, interval: Duration) -> Self {
        // poll divides by the interval
        let interval = interval.max(Duration::from_millis(1));
        Self {
            started_at: now,
            interval,
            next_tick: now + interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_tick
    }

    /// Elapsed time as of the last tick
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Elapsed time as of `now`, independent of tick cadence
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    /// Consume every tick that has come due by `now` and refresh the elapsed
    /// reading. Returns how many periods passed; zero means nothing was due.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_tick {
            return 0;
        }

        let interval_nanos = self.interval.as_nanos();
        let periods = now.duration_since(self.next_tick).as_nanos() / interval_nanos + 1;
        let skipped = u64::try_from(periods * interval_nanos).unwrap_or(u64::MAX);
        self.next_tick += Duration::from_nanos(skipped);

        self.elapsed = self.elapsed_at(now);
        u32::try_from(periods).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_start_schedules_first_tick() {
        let now = Instant::now();
        let timer = ActiveTimer::start(now, ms(TICK_RATE_MS));

        assert_eq!(timer.started_at(), now);
        assert_eq!(timer.next_deadline(), now + ms(100));
        assert_eq!(timer.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_poll_before_deadline_is_noop() {
        let now = Instant::now();
        let mut timer = ActiveTimer::start(now, ms(100));

        assert_eq!(timer.poll(now + ms(50)), 0);
        assert_eq!(timer.elapsed_secs(), 0.0);
        assert_eq!(timer.next_deadline(), now + ms(100));
    }

    #[test]
    fn test_poll_updates_elapsed() {
        let now = Instant::now();
        let mut timer = ActiveTimer::start(now, ms(100));

        assert_eq!(timer.poll(now + ms(100)), 1);
        assert!((timer.elapsed_secs() - 0.1).abs() < 1e-9);
        assert_eq!(timer.next_deadline(), now + ms(200));
    }

    #[test]
    fn test_poll_catches_up_missed_ticks() {
        let now = Instant::now();
        let mut timer = ActiveTimer::start(now, Duration::from_secs(1));

        assert_eq!(timer.poll(now + ms(3500)), 3);
        assert_eq!(timer.next_deadline(), now + ms(4000));
        assert!((timer.elapsed_secs() - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_poll_after_long_gap_counts_periods_at_once() {
        let now = Instant::now();
        let mut timer = ActiveTimer::start(now, ms(1));

        let later = now + Duration::from_secs(3600);
        assert_eq!(timer.poll(later), 3_600_000);
        assert_eq!(timer.next_deadline(), later + ms(1));
        assert_eq!(timer.poll(later), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let now = Instant::now();
        let mut timer = ActiveTimer::start(now, Duration::ZERO);

        assert_eq!(timer.interval(), ms(1));
        assert_eq!(timer.poll(now + ms(5)), 5);
    }

    #[test]
    fn test_elapsed_at_saturates() {
        let now = Instant::now();
        let timer = ActiveTimer::start(now + ms(10), ms(100));
        assert_eq!(timer.elapsed_at(now), Duration::ZERO);
    }
}
