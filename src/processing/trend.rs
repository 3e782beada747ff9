use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::error::FitError;

/// Degree of the expected-value trendline.
pub const TREND_DEGREE: usize = 3;

/// Number of points sampled along the curve for plotting.
pub const TREND_SAMPLES: usize = 500;

/// Least-squares polynomial over (pick, value) pairs.
///
/// The fit runs on x mapped from `[x_min, x_max]` onto `[-1, 1]`, which keeps
/// the Vandermonde matrix well conditioned for picks in the hundreds.
/// Callers always pass raw picks; the mapping stays internal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendCurve {
    /// Coefficients in the mapped domain, constant term first.
    coeffs: Vec<f64>,
    x_min: f64,
    x_max: f64,
}

impl TrendCurve {
    /// Fit a polynomial of `degree` to the points.
    pub fn fit(x: &[f64], y: &[f64], degree: usize) -> Result<Self, FitError> {
        let distinct = count_distinct(x);
        if x.len() != y.len() || distinct < degree + 1 {
            return Err(FitError::InsufficientPoints {
                degree,
                expected: degree + 1,
                actual: distinct,
            });
        }

        let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let curve = Self { coeffs: Vec::new(), x_min, x_max };

        let design = DMatrix::from_fn(x.len(), degree + 1, |row, col| {
            curve.map_domain(x[row]).powi(col as i32)
        });
        let rhs = DVector::from_column_slice(y);

        let svd = design.svd(true, true);
        let solution = svd
            .solve(&rhs, 1e-12)
            .map_err(|e| FitError::Solve(e.to_string()))?;
        if solution.iter().any(|c| !c.is_finite()) {
            return Err(FitError::Solve("non-finite coefficient".to_string()));
        }

        Ok(Self { coeffs: solution.iter().copied().collect(), ..curve })
    }

    fn map_domain(&self, x: f64) -> f64 {
        let half_span = (self.x_max - self.x_min) / 2.0;
        let mid = (self.x_max + self.x_min) / 2.0;
        (x - mid) / half_span
    }

    /// Value of the curve at raw pick `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let u = self.map_domain(x);
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * u + c)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.x_min, self.x_max)
    }

    /// `n` evenly spaced `[x, y]` points from the smallest to the largest
    /// fitted x, both ends included.
    pub fn sample(&self, n: usize) -> Vec<[f64; 2]> {
        match n {
            0 => Vec::new(),
            1 => vec![[self.x_min, self.evaluate(self.x_min)]],
            _ => {
                let step = (self.x_max - self.x_min) / (n - 1) as f64;
                (0..n)
                    .map(|i| {
                        let x = if i == n - 1 { self.x_max } else { self.x_min + step * i as f64 };
                        [x, self.evaluate(x)]
                    })
                    .collect()
            }
        }
    }
}

fn count_distinct(x: &[f64]) -> usize {
    let mut sorted: Vec<f64> = x.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted.dedup();
    sorted.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_cubic() {
        let cubic = |x: f64| 0.001 * x.powi(3) - 0.3 * x.powi(2) + 2.0 * x + 50.0;
        let x: Vec<f64> = (1..=224).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|&v| cubic(v)).collect();

        let curve = TrendCurve::fit(&x, &y, TREND_DEGREE).unwrap();
        assert_eq!(curve.degree(), 3);
        for &px in &[1.0, 37.0, 120.5, 224.0] {
            assert_relative_eq!(curve.evaluate(px), cubic(px), epsilon = 1e-6);
        }
    }

    #[test]
    fn least_squares_line_through_noise() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 4.0];
        let curve = TrendCurve::fit(&x, &y, 1).unwrap();
        // Ordinary least squares: slope 0.8, intercept 0.5.
        assert_relative_eq!(curve.evaluate(0.0), 0.5, epsilon = 1e-9);
        assert_relative_eq!(curve.evaluate(10.0), 8.5, epsilon = 1e-9);
    }

    #[test]
    fn too_few_distinct_picks() {
        let err = TrendCurve::fit(&[1.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0], 3).unwrap_err();
        assert_eq!(
            err,
            FitError::InsufficientPoints { degree: 3, expected: 4, actual: 3 }
        );
        assert!(TrendCurve::fit(&[], &[], 3).is_err());
    }

    #[test]
    fn exactly_degree_plus_one_interpolates() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 4.0, 7.0, 1.0];
        let curve = TrendCurve::fit(&x, &y, 3).unwrap();
        for (xi, yi) in x.iter().zip(y) {
            assert_relative_eq!(curve.evaluate(*xi), yi, epsilon = 1e-9);
        }
    }

    #[test]
    fn sample_spans_domain() {
        let x = [1.0, 5.0, 9.0, 20.0, 32.0];
        let y = [40.0, 30.0, 25.0, 20.0, 18.0];
        let curve = TrendCurve::fit(&x, &y, 3).unwrap();

        let points = curve.sample(TREND_SAMPLES);
        assert_eq!(points.len(), 500);
        assert_eq!(points[0][0], 1.0);
        assert_eq!(points[499][0], 32.0);
        assert!(points.windows(2).all(|w| w[0][0] < w[1][0]));
        assert_relative_eq!(points[0][1], curve.evaluate(1.0));
        assert_eq!(curve.domain(), (1.0, 32.0));
    }
}
