//! Pluggable strategies for the simulated providers.
//!
//! Randomness, wall-clock time and artificial latency are injected so tests can
//! replace them with deterministic versions.

use chrono::{Local, NaiveDateTime};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

/// Source of uniformly distributed values in `[0, 1)`.
pub type RollFn = Arc<dyn Fn() -> f64 + Send + Sync>;

pub fn random_roll() -> RollFn {
    Arc::new(rand::random::<f64>)
}

/// A roll that always returns `value`.
pub fn fixed_roll(value: f64) -> RollFn {
    Arc::new(move || value)
}

/// Local wall-clock source.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Simulated network latency, drawn uniformly from `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Latency {
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn fixed(duration: Duration) -> Self {
        Self {
            min: duration,
            max: duration,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }

    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    /// 50-150 ms round trip.
    fn default() -> Self {
        Self::new(Duration::from_millis(50), Duration::from_millis(150))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn latency_normalizes_reversed_bounds() {
        let latency = Latency::new(Duration::from_millis(90), Duration::from_millis(10));
        assert_eq!(latency.min(), Duration::from_millis(10));
        assert_eq!(latency.max(), Duration::from_millis(90));
    }

    #[test]
    fn samples_stay_within_bounds() {
        let latency = Latency::default();
        for _ in 0..100 {
            let sample = latency.sample();
            assert!(sample >= latency.min() && sample <= latency.max());
        }
    }

    #[test]
    fn wide_bounds_do_not_wrap() {
        let latency = Latency::new(Duration::from_secs(u64::MAX / 4), Duration::from_secs(u64::MAX / 2));
        for _ in 0..20 {
            assert!(latency.sample() >= latency.min());
        }
    }

    #[test]
    fn fixed_strategies_are_deterministic() {
        let instant = NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
        assert_eq!(fixed_roll(0.25)(), 0.25);
    }
}
