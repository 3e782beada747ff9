//! Descriptive statistics over small samples of DrAV values.
//!
//! NaN marks an undefined result (empty sample, or a spread over fewer than
//! two values) and is carried through to the report as a blank cell.

/// Groups smaller than this skip outlier filtering. With three or fewer
/// values the interpolated fences always enclose every member anyway.
pub const MIN_QUARTILE_SAMPLES: usize = 4;

/// Fence width in interquartile ranges.
pub const IQR_FENCE: f64 = 1.5;

/// Descriptive statistics for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1); NaN below two values.
    pub std_dev: f64,
}

impl SeriesStats {
    /// Compute statistics from values. Returns `None` for an empty sample.
    pub fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(SeriesStats {
            count: values.len(),
            mean: mean(values),
            median: median(values),
            std_dev: sample_std_dev(values),
        })
    }
}

fn sort_values(vals: &mut [f64]) {
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sort_values(&mut sorted);
    quantile_sorted(&sorted, 0.5)
}

/// Bessel-corrected standard deviation.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Quantile of already sorted values, interpolating linearly between the
/// closest ranks: position `q * (n - 1)`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Inclusive bounds outside which a value counts as an outlier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    pub fn compute(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sort_values(&mut sorted);
        let q1 = quantile_sorted(&sorted, 0.25);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        Self {
            q1,
            q3,
            lower: q1 - IQR_FENCE * iqr,
            upper: q3 + IQR_FENCE * iqr,
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }
}

/// Drop values outside the 1.5 x IQR fences, keeping input order.
/// Groups below `MIN_QUARTILE_SAMPLES` are returned whole.
pub fn remove_outliers(values: &[f64]) -> Vec<f64> {
    if values.len() < MIN_QUARTILE_SAMPLES {
        return values.to_vec();
    }
    let fences = IqrFences::compute(values);
    values.iter().copied().filter(|&v| fences.contains(v)).collect()
}

/// Round to two decimals, ties to even.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_value_group() {
        let stats = SeriesStats::compute(&[10.0, 20.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_relative_eq!(stats.mean, 15.0);
        assert_relative_eq!(stats.median, 15.0);
        assert_relative_eq!(round2(stats.std_dev), 7.07);
    }

    #[test]
    fn singleton_has_no_spread() {
        let stats = SeriesStats::compute(&[5.0]).unwrap();
        assert_relative_eq!(stats.mean, 5.0);
        assert_relative_eq!(stats.median, 5.0);
        assert!(stats.std_dev.is_nan());
        assert!(SeriesStats::compute(&[]).is_none());
    }

    #[test]
    fn linear_quartiles() {
        let fences = IqrFences::compute(&[100.0, 1.0, 3.0, 2.0]);
        assert_relative_eq!(fences.q1, 1.75);
        assert_relative_eq!(fences.q3, 27.25);
        assert_relative_eq!(fences.lower, -36.5);
        assert_relative_eq!(fences.upper, 65.5);
        assert!(!fences.contains(100.0));
    }

    #[test]
    fn outlier_removed() {
        let kept = remove_outliers(&[1.0, 2.0, 3.0, 100.0]);
        assert_eq!(kept, vec![1.0, 2.0, 3.0]);
        assert_relative_eq!(mean(&kept), 2.0);
    }

    #[test]
    fn small_groups_pass_through() {
        assert_eq!(remove_outliers(&[]), Vec::<f64>::new());
        assert_eq!(remove_outliers(&[7.0]), vec![7.0]);
        assert_eq!(remove_outliers(&[0.0, 1000.0]), vec![0.0, 1000.0]);
        assert_eq!(remove_outliers(&[0.0, 0.0, 1000.0]), vec![0.0, 0.0, 1000.0]);
    }

    #[test]
    fn fences_are_inclusive() {
        assert_eq!(remove_outliers(&[4.0; 6]), vec![4.0; 6]);
    }

    #[test]
    fn median_odd_and_even() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn rounding_ties_to_even() {
        assert_eq!(round2(26.5), 26.5);
        assert_eq!(round2(7.0710678), 7.07);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(-3.14159), -3.14);
        assert!(round2(f64::NAN).is_nan());
    }
}
