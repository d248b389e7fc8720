//! Aggregated structural statistics for one program unit.

use serde::Serialize;
use std::collections::BTreeMap;

/// Function and basic block counts plus the instruction-count histogram
///
/// **Public** - produced by the collector, consumed read-only by the reporter
///
/// Only grows: counters are never decremented and buckets are never
/// removed. `max_bucket_value` always equals the largest histogram value
/// (zero for an empty histogram).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    function_count: u64,
    basic_block_count: u64,
    histogram: BTreeMap<usize, u64>,
    max_bucket_value: u64,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build statistics from a ready-made histogram
    ///
    /// **Public** - lets the reporter be driven without a traversal
    ///
    /// Zero-valued buckets are dropped; the block count and the maximum
    /// bucket value are derived from the remaining buckets.
    pub fn from_histogram(function_count: u64, histogram: BTreeMap<usize, u64>) -> Self {
        let histogram: BTreeMap<usize, u64> =
            histogram.into_iter().filter(|&(_, occurrences)| occurrences > 0).collect();

        Self {
            function_count,
            basic_block_count: histogram.values().sum(),
            max_bucket_value: histogram.values().copied().max().unwrap_or(0),
            histogram,
        }
    }

    pub(crate) fn record_function(&mut self) {
        self.function_count += 1;
    }

    /// Count one basic block holding `instruction_count` instructions
    pub(crate) fn record_block(&mut self, instruction_count: usize) {
        self.basic_block_count += 1;

        let bucket = self.histogram.entry(instruction_count).or_insert(0);
        *bucket += 1;

        if *bucket > self.max_bucket_value {
            self.max_bucket_value = *bucket;
        }
    }

    pub fn function_count(&self) -> u64 {
        self.function_count
    }

    pub fn basic_block_count(&self) -> u64 {
        self.basic_block_count
    }

    /// Instruction count → number of blocks, ascending by instruction count
    pub fn histogram(&self) -> &BTreeMap<usize, u64> {
        &self.histogram
    }

    /// Iterate buckets in ascending instruction-count order
    pub fn buckets(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.histogram.iter().map(|(&count, &occurrences)| (count, occurrences))
    }

    pub fn max_bucket_value(&self) -> u64 {
        self.max_bucket_value
    }

    /// Upper bound of the chart's vertical axis
    ///
    /// One above the tallest bucket so the chart always has headroom,
    /// `1` for an empty histogram.
    pub fn y_range_upper(&self) -> u64 {
        self.max_bucket_value.saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Functions: {} | Blocks: {} | Buckets: {} | Tallest bucket: {}",
            self.function_count,
            self.basic_block_count,
            self.histogram.len(),
            self.max_bucket_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_block_tracks_running_max() {
        let mut stats = Statistics::new();
        stats.record_block(3);
        assert_eq!(stats.max_bucket_value(), 1);

        stats.record_block(7);
        assert_eq!(stats.max_bucket_value(), 1);

        stats.record_block(3);
        assert_eq!(stats.max_bucket_value(), 2);
        assert_eq!(stats.basic_block_count(), 3);
        assert_eq!(stats.histogram().get(&3), Some(&2));
    }

    #[test]
    fn test_from_histogram_derives_counts() {
        let histogram = BTreeMap::from([(1, 4), (2, 0), (9, 6)]);
        let stats = Statistics::from_histogram(2, histogram);

        assert_eq!(stats.function_count(), 2);
        assert_eq!(stats.basic_block_count(), 10);
        assert_eq!(stats.max_bucket_value(), 6);
        assert!(!stats.histogram().contains_key(&2));
    }

    #[test]
    fn test_empty_y_range() {
        let stats = Statistics::new();
        assert!(stats.is_empty());
        assert_eq!(stats.y_range_upper(), 1);
    }
}
