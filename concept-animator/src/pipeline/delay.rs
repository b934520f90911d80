//! Injectable stage latency.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

use crate::config::StageDelayConfig;

/// Suspends the runner while a stage is "working".
#[async_trait]
pub trait StageDelay: Send + Sync {
    /// Waits for stage `stage_index` (0-based) to finish.
    async fn wait(&self, stage_index: usize);
}

/// Sleeps for a uniformly random duration in `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDelay {
    min: Duration,
    max: Duration,
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::from_config(&StageDelayConfig::default())
    }
}

impl RandomDelay {
    /// Creates a delay over `[min, max)`. Bounds are swapped if inverted.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Creates a delay from millisecond bounds in configuration.
    #[must_use]
    pub fn from_config(config: &StageDelayConfig) -> Self {
        Self::new(
            Duration::from_millis(config.min_ms),
            Duration::from_millis(config.max_ms),
        )
    }

    /// Draws one duration.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

#[async_trait]
impl StageDelay for RandomDelay {
    async fn wait(&self, _stage_index: usize) {
        let duration = self.sample();
        tokio::time::sleep(duration).await;
    }
}

/// Sleeps for the same duration at every stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedDelay(pub Duration);

#[async_trait]
impl StageDelay for FixedDelay {
    async fn wait(&self, _stage_index: usize) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_bounds() {
        let delay = RandomDelay::default();
        for _ in 0..200 {
            let d = delay.sample();
            assert!(d >= Duration::from_millis(2000));
            assert!(d < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let delay = RandomDelay::new(Duration::from_millis(5), Duration::from_millis(5));
        assert_eq!(delay.sample(), Duration::from_millis(5));
    }

    #[test]
    fn test_inverted_bounds_swapped() {
        let delay = RandomDelay::new(Duration::from_millis(10), Duration::from_millis(1));
        let d = delay.sample();
        assert!(d >= Duration::from_millis(1) && d < Duration::from_millis(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_delay_sleeps() {
        let delay = RandomDelay::new(Duration::from_millis(100), Duration::from_millis(200));
        let start = tokio::time::Instant::now();
        delay.wait(0).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(100));
        assert!(elapsed < Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_sleeps() {
        let start = tokio::time::Instant::now();
        FixedDelay(Duration::from_millis(250)).wait(3).await;
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
