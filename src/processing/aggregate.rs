use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::cleaner::Record;
use crate::processing::ranges::{self, RangeSummary};
use crate::processing::statistics::{self, round2, SeriesStats};

/// Everything derived for one draft position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerPickStat {
    pub pick: u32,
    /// Records in the group.
    pub count: usize,
    /// Records left after outlier filtering.
    pub filtered_count: usize,
    /// Arithmetic mean, rounded to 2 decimals ("Expected_DrAV").
    pub mean: f64,
    /// Unrounded median.
    pub median: f64,
    /// Sample standard deviation, unrounded; NaN for a single record.
    pub std_dev: f64,
    /// Mean after 1.5 x IQR outlier removal, unrounded.
    pub filtered_mean: f64,
    /// Sum over count. Always equal to the unrounded mean: no weights are
    /// applied. Kept as its own column for readers of the report.
    pub weighted_mean: f64,
    pub range: Option<&'static str>,
    /// Trendline value at this pick, filled in once the curve is fitted.
    pub trendline: Option<f64>,
}

/// Per-pick statistics in ascending pick order plus the range summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregates {
    pub picks: Vec<PerPickStat>,
    pub ranges: Vec<RangeSummary>,
}

impl Aggregates {
    /// `(pick, mean)` pairs as fed to the trend fit and the chart.
    pub fn pick_means(&self) -> Vec<(u32, f64)> {
        self.picks.iter().map(|p| (p.pick, p.mean)).collect()
    }

    pub fn record_count(&self) -> usize {
        self.picks.iter().map(|p| p.count).sum()
    }
}

/// Partition records by exact pick, ascending.
pub fn group_by_pick(records: &[Record]) -> BTreeMap<u32, Vec<f64>> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for r in records {
        groups.entry(r.pick).or_default().push(r.drav);
    }
    groups
}

fn per_pick(pick: u32, values: &[f64]) -> Option<PerPickStat> {
    let stats = SeriesStats::compute(values)?;
    let filtered = statistics::remove_outliers(values);
    if filtered.is_empty() {
        tracing::warn!("Pick {pick}: no records left after outlier filtering");
    }

    Some(PerPickStat {
        pick,
        count: stats.count,
        filtered_count: filtered.len(),
        mean: round2(stats.mean),
        median: stats.median,
        std_dev: stats.std_dev,
        filtered_mean: statistics::mean(&filtered),
        weighted_mean: values.iter().sum::<f64>() / values.len() as f64,
        range: ranges::bucket_label(pick),
        trendline: None,
    })
}

/// Reduce cleaned records to per-pick statistics and the range summary.
pub fn aggregate(records: &[Record]) -> Aggregates {
    let picks: Vec<PerPickStat> = group_by_pick(records)
        .iter()
        .filter_map(|(&pick, values)| per_pick(pick, values))
        .collect();
    let ranges = ranges::summarize(
        &picks.iter().map(|p| (p.pick, p.mean)).collect::<Vec<_>>(),
    );

    tracing::info!(
        "Aggregated {} records into {} picks and {} ranges",
        records.len(),
        picks.len(),
        ranges.len()
    );
    Aggregates { picks, ranges }
}
