//! Fixed time budgets that decay as the clock advances.
//!
//! A [`Deadline`] turns a millisecond budget into an absolute instant at
//! construction time. Every later read reports the seconds left until that
//! instant, so a chain of calls can share one overall budget:
//!
//! ```
//! use enginekit_core::{Deadline, ManualClock};
//!
//! let clock = ManualClock::new(0.0);
//! let deadline = Deadline::with_clock(5000.0, &clock);
//! assert_eq!(deadline.timeout_seconds(), 5.0);
//!
//! clock.set(6.0);
//! assert!(deadline.is_expired());
//! ```

use std::time::Duration;

use crate::clock::{Clock, MonotonicClock};

/// An immutable point in time, measured against a clock.
#[derive(Debug, Clone)]
pub struct Deadline<C: Clock = MonotonicClock> {
    clock: C,
    budget_ms: f64,
    deadline_instant: f64,
}

impl Deadline<MonotonicClock> {
    /// Start a deadline `budget_ms` milliseconds from now on a fresh monotonic clock.
    pub fn new(budget_ms: f64) -> Self {
        Self::with_clock(budget_ms, MonotonicClock::new())
    }
}

impl<C: Clock> Deadline<C> {
    /// Start a deadline `budget_ms` milliseconds after `clock.now()`.
    ///
    /// Negative and NaN budgets count as zero.
    pub fn with_clock(budget_ms: f64, clock: C) -> Self {
        let budget_ms = budget_ms.max(0.0);
        let deadline_instant = clock.now() + budget_ms / 1000.0;
        Self {
            clock,
            budget_ms,
            deadline_instant,
        }
    }

    /// Seconds until the deadline. Negative once it has passed.
    pub fn timeout_seconds(&self) -> f64 {
        self.deadline_instant - self.clock.now()
    }

    /// True once the remaining time is below zero.
    pub fn is_expired(&self) -> bool {
        self.timeout_seconds() < 0.0
    }

    /// Remaining time as a `Duration`, or `None` when expired.
    pub fn remaining(&self) -> Option<Duration> {
        let secs = self.timeout_seconds();
        if secs < 0.0 {
            return None;
        }
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// The budget this deadline was created with, in milliseconds.
    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    /// The absolute instant, in the clock's own seconds.
    pub fn deadline_instant(&self) -> f64 {
        self.deadline_instant
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::ManualClock;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_deadline_decays_with_clock() {
        let clock = ManualClock::new(0.0);

        // 5 seconds in the future
        let deadline = Deadline::with_clock(5000.0, &clock);
        assert!(approx(deadline.timeout_seconds(), 5.0));

        clock.set(0.5);
        assert!(approx(deadline.timeout_seconds(), 4.5));

        clock.set(5.0);
        assert!(approx(deadline.timeout_seconds(), 0.0));
        assert!(!deadline.is_expired());

        clock.set(6.0);
        assert!(deadline.timeout_seconds() < 0.0);
        assert!(approx(deadline.timeout_seconds(), -1.0));
        assert!(deadline.is_expired());
    }

    #[test]
    fn test_remaining_matches_budget_minus_elapsed() {
        let clock = ManualClock::new(100.0);
        for &(budget_ms, elapsed) in &[(0.0, 0.0), (250.0, 0.1), (1500.0, 1.5), (60_000.0, 12.25)] {
            clock.set(100.0);
            let deadline = Deadline::with_clock(budget_ms, &clock);
            clock.advance(elapsed);
            let expected = budget_ms / 1000.0 - elapsed;
            assert!(
                (deadline.timeout_seconds() - expected).abs() < 1e-6,
                "budget={} elapsed={}",
                budget_ms,
                elapsed
            );
        }
    }

    #[test]
    fn test_zero_budget_is_immediately_due() {
        let clock = ManualClock::new(42.0);
        let deadline = Deadline::with_clock(0.0, &clock);
        assert!(approx(deadline.timeout_seconds(), 0.0));
        assert_eq!(deadline.remaining(), Some(Duration::ZERO));

        clock.advance(0.001);
        assert!(deadline.is_expired());
        assert_eq!(deadline.remaining(), None);
    }

    #[test]
    fn test_repeated_reads_are_identical() {
        let clock = ManualClock::new(3.0);
        let deadline = Deadline::with_clock(1234.0, &clock);
        let first = deadline.timeout_seconds();
        for _ in 0..10 {
            assert_eq!(deadline.timeout_seconds(), first);
        }
    }

    #[test]
    fn test_deadline_instant_is_fixed() {
        let clock = ManualClock::new(10.0);
        let deadline = Deadline::with_clock(2000.0, &clock);
        assert!(approx(deadline.deadline_instant(), 12.0));
        clock.advance(100.0);
        assert!(approx(deadline.deadline_instant(), 12.0));
    }

    #[test]
    fn test_negative_and_nan_budgets_clamp_to_zero() {
        let clock = ManualClock::new(0.0);
        let negative = Deadline::with_clock(-500.0, &clock);
        assert_eq!(negative.budget_ms(), 0.0);
        assert!(approx(negative.timeout_seconds(), 0.0));

        let nan = Deadline::with_clock(f64::NAN, &clock);
        assert_eq!(nan.budget_ms(), 0.0);
        assert!(approx(nan.timeout_seconds(), 0.0));
    }

    #[test]
    fn test_huge_budgets() {
        let clock = ManualClock::new(0.0);
        let deadline = Deadline::with_clock(f64::INFINITY, &clock);
        assert!(deadline.timeout_seconds().is_infinite());
        assert_eq!(deadline.remaining(), Some(Duration::MAX));

        let year_ms = 365.0 * 24.0 * 3600.0 * 1000.0;
        let deadline = Deadline::with_clock(year_ms, &clock);
        assert_eq!(
            deadline.remaining(),
            Some(Duration::from_secs(365 * 24 * 3600))
        );
    }

    #[test]
    fn test_sequential_calls_share_one_budget() {
        let clock = ManualClock::new(0.0);
        let deadline = Deadline::with_clock(1000.0, &clock);

        let first = deadline.remaining().unwrap();
        clock.advance(0.7);
        let second = deadline.remaining().unwrap();

        assert_eq!(first, Duration::from_secs(1));
        assert!(second < first);
        assert!((first.as_secs_f64() - second.as_secs_f64() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_shared_read_only_across_threads() {
        let clock = Arc::new(ManualClock::new(0.0));
        let deadline = Arc::new(Deadline::with_clock(3000.0, Arc::clone(&clock)));
        clock.set(1.0);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let deadline = Arc::clone(&deadline);
                std::thread::spawn(move || deadline.timeout_seconds())
            })
            .collect();

        for handle in handles {
            assert!(approx(handle.join().unwrap(), 2.0));
        }
    }

    #[test]
    fn test_default_clock_counts_down() {
        let deadline = Deadline::new(60_000.0);
        let secs = deadline.timeout_seconds();
        assert!(secs <= 60.0);
        assert!(secs > 59.0);
        assert!(!deadline.is_expired());
    }
}
