//! Fixed-delay rate limiting for article-detail fetches

use std::time::Duration;

/// Suspends the crawl for a fixed floor delay before each article-detail fetch
///
/// There is no backoff and no jitter. Listing requests are not limited.
#[derive(Debug, Clone, Copy)]
pub struct RateLimiter {
    delay: Duration,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Waits out the configured delay
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
