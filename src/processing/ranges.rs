use serde::Serialize;

use crate::processing::statistics::{mean, sample_std_dev};

/// Bucket edges over the pick axis. Seven edges give six intervals.
pub const RANGE_EDGES: [u32; 7] = [1, 5, 15, 32, 64, 100, 224];

/// Labels for the intervals between consecutive `RANGE_EDGES`.
pub const RANGE_LABELS: [&str; 6] = ["Top 1", "2-5", "6-15", "16-32", "33-64", "65-224"];

/// Index of the bucket holding `pick`.
///
/// Intervals are `(lo, hi]` except the first, which also takes its lower
/// edge. A pick on a shared edge belongs to the lower interval. Labels are
/// attached to intervals by position, so `[1, 5]` carries "Top 1" and
/// `(5, 15]` carries "2-5". Picks outside the edges have no bucket.
pub fn bucket_index(pick: u32) -> Option<usize> {
    if pick == RANGE_EDGES[0] {
        return Some(0);
    }
    RANGE_EDGES
        .windows(2)
        .position(|w| pick > w[0] && pick <= w[1])
}

pub fn bucket_label(pick: u32) -> Option<&'static str> {
    bucket_index(pick).map(|i| RANGE_LABELS[i])
}

/// Aggregate over the picks falling in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSummary {
    pub label: &'static str,
    /// Mean of the per-pick means.
    pub mean: f64,
    /// Sample standard deviation of the per-pick means.
    pub std_dev: f64,
    /// Number of distinct picks, not records.
    pub count: usize,
}

/// Summarize per-pick means by bucket.
///
/// Every bucket is listed once any pick exists; buckets without picks get a
/// zero count and NaN statistics. No picks at all gives an empty table.
pub fn summarize(pick_means: &[(u32, f64)]) -> Vec<RangeSummary> {
    if pick_means.is_empty() {
        return Vec::new();
    }

    let mut per_bucket: Vec<Vec<f64>> = vec![Vec::new(); RANGE_LABELS.len()];
    let mut unbucketed = 0usize;
    for &(pick, value) in pick_means {
        match bucket_index(pick) {
            Some(i) => per_bucket[i].push(value),
            None => unbucketed += 1,
        }
    }
    if unbucketed > 0 {
        tracing::warn!(
            "{unbucketed} picks fall outside {}..={} and are left out of the range summary",
            RANGE_EDGES[0],
            RANGE_EDGES[RANGE_EDGES.len() - 1]
        );
    }

    RANGE_LABELS
        .iter()
        .zip(per_bucket)
        .map(|(&label, values)| RangeSummary {
            label,
            mean: mean(&values),
            std_dev: sample_std_dev(&values),
            count: values.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn edges_partition_the_pick_axis() {
        let last = RANGE_EDGES[RANGE_EDGES.len() - 1];
        for pick in 1..=last {
            assert!(bucket_index(pick).is_some(), "pick {pick} has no bucket");
        }
        assert_eq!(bucket_index(0), None);
        assert_eq!(bucket_index(last + 1), None);
        assert_eq!(RANGE_LABELS.len(), RANGE_EDGES.len() - 1);
    }

    #[test]
    fn boundary_picks_belong_to_lower_bucket() {
        assert_eq!(bucket_label(1), Some("Top 1"));
        assert_eq!(bucket_label(5), Some("Top 1"));
        assert_eq!(bucket_label(6), Some("2-5"));
        assert_eq!(bucket_label(15), Some("2-5"));
        assert_eq!(bucket_label(16), Some("6-15"));
        assert_eq!(bucket_label(32), Some("6-15"));
        assert_eq!(bucket_label(64), Some("16-32"));
        assert_eq!(bucket_label(65), Some("33-64"));
        assert_eq!(bucket_label(100), Some("33-64"));
        assert_eq!(bucket_label(101), Some("65-224"));
        assert_eq!(bucket_label(224), Some("65-224"));
    }

    #[test]
    fn summary_over_pick_means() {
        let means = [(1, 40.0), (3, 30.0), (5, 20.0), (10, 10.0), (250, 1.0)];
        let summary = summarize(&means);

        assert_eq!(summary.len(), 6);
        assert_eq!(summary[0].label, "Top 1");
        assert_eq!(summary[0].count, 3);
        assert_relative_eq!(summary[0].mean, 30.0);
        assert_relative_eq!(summary[0].std_dev, 10.0);

        assert_eq!(summary[1].label, "2-5");
        assert_eq!(summary[1].count, 1);
        assert_relative_eq!(summary[1].mean, 10.0);
        assert!(summary[1].std_dev.is_nan());

        assert_eq!(summary[5].count, 0);
        assert!(summary[5].mean.is_nan());

        let total: usize = summary.iter().map(|r| r.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn no_picks_no_rows() {
        assert!(summarize(&[]).is_empty());
    }
}
