//! # Animation Clock
//!
//! Wall-clock time since the scene started, fed to the shader once per frame.
//!
//! `web_time::Instant` is used so the same code reads `performance.now()` in the browser and
//! `std::time::Instant` on native targets. The value handed out is never smaller than the
//! previous one, even if the platform clock is adjusted backwards.

use web_time::Instant;

#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    start: Instant,
    elapsed: f32,
}

impl AnimationClock {
    /// Starts a clock at the current instant.
    pub fn start() -> Self {
        Self::start_at(Instant::now())
    }

    pub fn start_at(start: Instant) -> Self {
        Self {
            start,
            elapsed: 0.0,
        }
    }

    /// Advances the clock to now and returns the elapsed seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        self.elapsed = self.elapsed.max(elapsed);
        self.elapsed
    }

    /// Seconds reported by the last tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    #[test]
    fn starts_at_zero() {
        let clock = AnimationClock::start();
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn reports_seconds_since_start() {
        let start = Instant::now();
        let mut clock = AnimationClock::start_at(start);
        let elapsed = clock.tick_at(start + Duration::from_millis(1500));
        assert!((elapsed - 1.5).abs() < 1.0e-6);
    }

    #[test]
    fn never_runs_backwards() {
        let start = Instant::now();
        let mut clock = AnimationClock::start_at(start);
        clock.tick_at(start + Duration::from_secs(2));
        let later_tick = clock.tick_at(start + Duration::from_secs(1));
        assert_eq!(later_tick, 2.0);

        let mut earlier = AnimationClock::start_at(start + Duration::from_secs(10));
        assert_eq!(earlier.tick_at(start), 0.0);
    }

    #[test]
    fn successive_ticks_do_not_decrease() {
        let mut clock = AnimationClock::start();
        let mut previous = clock.tick();
        for _ in 0..100 {
            let now = clock.tick();
            assert!(now >= previous);
            previous = now;
        }
    }
}
