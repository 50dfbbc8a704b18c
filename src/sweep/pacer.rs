//! Request pacing
//!
//! One delay is taken before every network call. The delay is uniform over
//! the configured range; its purpose is pacing the remote API, not
//! synchronization.

use crate::config::PacingConfig;
use rand::Rng;
use std::time::Duration;

/// Draws a uniform random delay before each request
#[derive(Debug, Clone)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// Creates a pacer over the configured delay range
    pub fn new(config: &PacingConfig) -> Self {
        Self {
            min: Duration::from_millis(config.min_delay_ms),
            max: Duration::from_millis(config.max_delay_ms),
        }
    }

    /// Returns the next delay, uniform in `[min, max]`
    pub fn next_delay(&self) -> Duration {
        if self.min >= self.max {
            return self.min;
        }

        let millis = rand::thread_rng().gen_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }

    /// Sleeps for one freshly drawn delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        tracing::trace!("Pacing delay: {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
