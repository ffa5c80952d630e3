//! Crawl statistics
//!
//! Counters accumulated by the walker and printed at the end of a run.

use serde::Serialize;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Categories returned by the category listing
    pub categories: u64,

    /// Sections returned across all category listings
    pub sections: u64,

    /// Article summaries returned across all section listings
    pub summaries: u64,

    /// Article-detail requests issued
    pub articles_requested: u64,

    /// Article-detail requests that yielded no article
    pub articles_missing: u64,

    /// Documents that could not be written
    pub write_failures: u64,

    /// Documents written
    pub saved: u64,

    /// Whether the crawl stopped because the article cap was reached
    pub cap_reached: bool,

    /// Wall-clock duration of the crawl in milliseconds
    pub elapsed_ms: u64,
}

impl CrawlStats {
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    }

    /// Percentage of requested articles that ended up on disk
    pub fn success_rate(&self) -> f64 {
        if self.articles_requested == 0 {
            0.0
        } else {
            (self.saved as f64 / self.articles_requested as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStats) {
    println!("=== Crawl Statistics ===\n");

    println!("Hierarchy:");
    println!("  Categories: {}", stats.categories);
    println!("  Sections: {}", stats.sections);
    println!("  Article summaries: {}", stats.summaries);
    println!();

    println!("Articles:");
    println!("  Requested: {}", stats.articles_requested);
    println!("  Missing: {}", stats.articles_missing);
    println!("  Write failures: {}", stats.write_failures);
    println!("  Saved: {}", stats.saved);
    if stats.cap_reached {
        println!("  (stopped at the configured article cap)");
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} articles saved) in {:.1}s",
        stats.success_rate(),
        stats.saved,
        stats.articles_requested,
        stats.elapsed_ms as f64 / 1000.0
    );
}
