//! Day/night clock.
//!
//! Day and night last the same `day_duration` seconds. The clock only
//! counts time; the external driver decides how often to call
//! [`DayNightClock::advance`] and when to step the simulation.

use serde::Serialize;

use crate::mechanics::Phase;

/// Tracks elapsed time inside the current phase.
///
/// `0 <= elapsed < day_duration` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayNightClock {
    /// Seconds spent in the current phase, kept below `day_duration`.
    elapsed: f32,
    is_day: bool,
    /// Length of one phase in seconds.
    day_duration: f32,
}

impl DayNightClock {
    /// Create a clock at the start of a day.
    pub fn new(day_duration: f32) -> Self {
        Self::from_parts(0.0, true, day_duration)
    }

    /// Rebuild a clock from stored state.
    ///
    /// An elapsed time that is negative, not a number, or not below
    /// `day_duration` restarts the stored phase at 0.
    pub fn from_parts(elapsed: f32, is_day: bool, day_duration: f32) -> Self {
        Self {
            elapsed: within_phase(elapsed, day_duration),
            is_day,
            day_duration,
        }
    }

    /// Add `dt` seconds; returns true when the phase flipped.
    ///
    /// `dt` must be non-negative. Overshoot past the phase boundary is
    /// discarded rather than carried into the next phase.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.day_duration {
            self.elapsed = 0.0;
            self.is_day = !self.is_day;
            true
        } else {
            false
        }
    }

    pub fn is_day(&self) -> bool {
        self.is_day
    }

    pub fn phase(&self) -> Phase {
        Phase::from_is_day(self.is_day)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn day_duration(&self) -> f32 {
        self.day_duration
    }

    /// Change the phase length. If the current phase has already run
    /// longer, it restarts at 0 without flipping.
    pub fn set_day_duration(&mut self, day_duration: f32) {
        self.day_duration = day_duration;
        self.elapsed = within_phase(self.elapsed, day_duration);
    }

    /// Fraction of the current phase already elapsed, from 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.day_duration).clamp(0.0, 1.0)
    }
}

fn within_phase(elapsed: f32, day_duration: f32) -> f32 {
    if elapsed >= 0.0 && elapsed < day_duration {
        elapsed
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_day() {
        let clock = DayNightClock::new(10.0);
        assert!(clock.is_day());
        assert_eq!(clock.phase(), Phase::Day);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_exact_duration_flips() {
        let mut clock = DayNightClock::new(10.0);
        assert!(clock.advance(10.0));
        assert!(!clock.is_day());
        assert_eq!(clock.elapsed(), 0.0);

        assert!(clock.advance(12.5));
        assert!(clock.is_day());
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn test_short_advance_does_not_flip() {
        let mut clock = DayNightClock::new(10.0);
        assert!(!clock.advance(9.99));
        assert!(clock.is_day());
        assert!((clock.elapsed() - 9.99).abs() < 1e-5);

        assert!(clock.advance(1.0));
        assert!(!clock.is_day());
    }

    #[test]
    fn test_progress() {
        let mut clock = DayNightClock::new(8.0);
        clock.advance(2.0);
        assert!((clock.progress() - 0.25).abs() < 1e-6);

        clock.set_day_duration(4.0);
        assert!((clock.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_from_parts_keeps_elapsed_in_phase() {
        let clock = DayNightClock::from_parts(4.0, false, 10.0);
        assert_eq!(clock.elapsed(), 4.0);
        assert!(!clock.is_day());

        for elapsed in [10.0, 15.0, -1.0, f32::NAN, f32::INFINITY] {
            let clock = DayNightClock::from_parts(elapsed, false, 10.0);
            assert_eq!(clock.elapsed(), 0.0, "elapsed {elapsed}");
            assert!(!clock.is_day());
        }
    }

    #[test]
    fn test_shorter_duration_restarts_phase() {
        let mut clock = DayNightClock::new(10.0);
        clock.advance(6.0);

        clock.set_day_duration(5.0);

        assert!(clock.is_day());
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.advance(4.0));
        assert!(clock.advance(1.0));
    }
}
