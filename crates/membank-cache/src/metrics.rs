//! Cache statistics and reporting

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate cache counters. Persisted as the cache directory's metadata file
/// and rewritten on every structural change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of live entries
    pub total_entries: usize,
    /// Total serialized size of live entries
    pub total_size_bytes: u64,
    /// Total number of cache hits
    pub hit_count: u64,
    /// Total number of cache misses
    pub miss_count: u64,
    /// Total number of LRU evictions
    pub eviction_count: u64,
    /// When the last expiry sweep ran
    pub last_cleanup: Option<DateTime<Utc>>,
}

impl CacheStats {
    /// Hit rate as a fraction (0.0 to 1.0). Zero when no lookups happened yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }

    /// Miss rate as a fraction (0.0 to 1.0).
    pub fn miss_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.miss_count as f64 / total as f64
        }
    }
}

/// Detailed point-in-time view of cache contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheReport {
    /// Number of live entries
    pub total_entries: usize,
    /// Total serialized size of live entries
    pub total_size_bytes: u64,
    /// Configured size bound
    pub max_size_bytes: u64,
    /// Hit rate as a fraction (0.0 to 1.0)
    pub hit_rate: f64,
    /// Age in seconds of the oldest entry, if any
    pub oldest_entry_age_seconds: Option<i64>,
    /// Age in seconds of the newest entry, if any
    pub newest_entry_age_seconds: Option<i64>,
    /// Entry counts keyed by complexity level
    pub entries_by_level: BTreeMap<u8, usize>,
    /// Entry counts keyed by template type
    pub entries_by_type: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_with_no_lookups_is_zero() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);
    }

    #[test]
    fn hit_and_miss_rates_sum_to_one() {
        let stats = CacheStats {
            hit_count: 3,
            miss_count: 1,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert!((stats.hit_rate() + stats.miss_rate() - 1.0).abs() < f64::EPSILON);
    }
}
