//! Monotone forecast calibration.
//!
//! # Methods
//! - Isotonic regression via pool-adjacent-violators (PAV)
//! - Quantile-conditional calibration (binned empirical quantiles under an
//!   isotonic map)
//!
//! Both calibrators fit once, hold an immutable set of knots, and predict
//! by interpolation clipped to the fitted range.

use std::cmp::Ordering;

use crate::error::{PronosticoError, Result};
use crate::functional::check_alpha;
use crate::stats::{empirical_quantile, mean, quantile_bins, DEFAULT_N_BINS};
use crate::traits::Calibrator;

/// Isotonic regression calibrator.
///
/// Fits the least-squares monotone function through `(x, y)` pairs using
/// the Pool Adjacent Violators algorithm. The weight-averaged merges are
/// the exact solution, not an approximation: PAV produces the unique
/// monotone minimizer of squared error.
///
/// Prediction interpolates linearly between the fitted knots and clips to
/// the boundary knot values outside the fitted range.
///
/// # Reference
///
/// - Barlow, R. E., et al. (1972). Statistical Inference under Order
///   Restrictions.
/// - Zadrozny, B., & Elkan, C. (2002). Transforming classifier scores into
///   accurate multiclass probability estimates.
///
/// # Examples
///
/// ```
/// use pronostico::calibration::IsotonicRegression;
///
/// let mut iso = IsotonicRegression::new();
/// iso.fit(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
/// assert_eq!(iso.predict(&[1.0, 2.0, 3.0, 4.0]), vec![1.0, 2.5, 2.5, 4.0]);
/// ```
#[derive(Debug, Clone)]
pub struct IsotonicRegression {
    knots_x: Vec<f64>,
    knots_y: Vec<f64>,
    increasing: bool,
}

impl Default for IsotonicRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl IsotonicRegression {
    /// Create a non-decreasing isotonic calibrator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            knots_x: Vec::new(),
            knots_y: Vec::new(),
            increasing: true,
        }
    }

    /// Sets the fit direction; `false` fits a non-increasing function.
    #[must_use]
    pub fn with_increasing(mut self, increasing: bool) -> Self {
        self.increasing = increasing;
        self
    }

    /// Whether this calibrator fits a non-decreasing function.
    #[must_use]
    pub fn increasing(&self) -> bool {
        self.increasing
    }

    /// The fitted knots as `(x, y)` slices. `x` is strictly increasing and
    /// `y` is monotone in the fitted direction; both are empty before
    /// `fit` succeeds on non-empty input.
    #[must_use]
    pub fn knots(&self) -> (&[f64], &[f64]) {
        (&self.knots_x, &self.knots_y)
    }

    /// Fit the monotone map from `x` to `y`.
    ///
    /// Equal x-values are aggregated by their mean y (with weight equal to
    /// their multiplicity) before pooling, so ties never produce separate
    /// knots. Inputs of length 0 or 1 are legal and yield a knot set of
    /// size <= 1, i.e. an identity or constant predictor.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `x` and `y` differ in length.
    pub fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        if x.len() != y.len() {
            return Err(PronosticoError::length_mismatch("x", x.len(), y.len()));
        }

        let sign = if self.increasing { 1.0 } else { -1.0 };

        let mut pairs: Vec<(f64, f64)> = x
            .iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| (xi, sign * yi))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        // Aggregate duplicate x-values by unweighted mean before PAV runs.
        let mut xs: Vec<f64> = Vec::new();
        let mut sums: Vec<f64> = Vec::new();
        let mut counts: Vec<f64> = Vec::new();
        for (xi, yi) in pairs {
            if xs.last() == Some(&xi) {
                let last = sums.len() - 1;
                sums[last] += yi;
                counts[last] += 1.0;
            } else {
                xs.push(xi);
                sums.push(yi);
                counts.push(1.0);
            }
        }

        // PAV: merge adjacent blocks while they violate monotonicity.
        // (value, weight, number of unique x-values spanned)
        let mut blocks: Vec<(f64, f64, usize)> = Vec::with_capacity(xs.len());
        for (&sum, &count) in sums.iter().zip(counts.iter()) {
            blocks.push((sum / count, count, 1));

            while blocks.len() >= 2 {
                let last = blocks[blocks.len() - 1];
                let prev = blocks[blocks.len() - 2];
                if prev.0 > last.0 {
                    blocks.pop();
                    blocks.pop();
                    let weight = prev.1 + last.1;
                    let value = (prev.0 * prev.1 + last.0 * last.1) / weight;
                    blocks.push((value, weight, prev.2 + last.2));
                } else {
                    break;
                }
            }
        }

        // Expand pooled blocks back to one value per unique x.
        let mut fitted: Vec<f64> = Vec::with_capacity(xs.len());
        for (value, _, span) in blocks {
            for _ in 0..span {
                fitted.push(sign * value);
            }
        }

        self.knots_x = xs;
        self.knots_y = fitted;
        Ok(())
    }

    /// Calibrated value for a single raw forecast.
    ///
    /// Interpolates linearly between knots; values outside the fitted
    /// range get the boundary knot's value. An unfitted calibrator is the
    /// identity. NaN passes through as NaN.
    #[must_use]
    pub fn predict_one(&self, x: f64) -> f64 {
        if self.knots_x.is_empty() {
            return x;
        }
        if x.is_nan() {
            return f64::NAN;
        }

        let idx = self.knots_x.partition_point(|&t| t <= x);
        if idx == 0 {
            return self.knots_y[0];
        }
        if idx >= self.knots_x.len() {
            return self.knots_y[self.knots_y.len() - 1];
        }

        let (x0, x1) = (self.knots_x[idx - 1], self.knots_x[idx]);
        let (y0, y1) = (self.knots_y[idx - 1], self.knots_y[idx]);
        let t = (x - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    /// Calibrated values for a batch of raw forecasts.
    #[must_use]
    pub fn predict(&self, x_new: &[f64]) -> Vec<f64> {
        x_new.iter().map(|&x| self.predict_one(x)).collect()
    }
}

impl Calibrator for IsotonicRegression {
    fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        IsotonicRegression::fit(self, x, y)
    }

    fn predict(&self, x: &[f64]) -> Vec<f64> {
        IsotonicRegression::predict(self, x)
    }
}

/// Quantile-conditional calibrator.
///
/// Recalibrates quantile forecasts in the forecast's own scale: raw
/// quantile predictions are quantile-binned, each populated bin
/// contributes one knot (bin centroid, empirical alpha-quantile of the
/// outcomes in the bin), and an increasing isotonic fit through those
/// knots gives the final monotone calibration map. Pooling by bin before
/// the isotonic fit keeps the map from chasing per-observation noise.
///
/// # Examples
///
/// ```
/// use pronostico::calibration::QuantileCalibrator;
///
/// let q_pred: Vec<f64> = (0..200).map(|i| f64::from(i) / 20.0).collect();
/// let y: Vec<f64> = q_pred.iter().map(|q| q * 2.0).collect();
///
/// let mut cal = QuantileCalibrator::new(0.5).unwrap().with_n_bins(10);
/// cal.fit(&q_pred, &y).unwrap();
/// let calibrated = cal.predict(&[5.0]);
/// assert!((calibrated[0] - 10.0).abs() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct QuantileCalibrator {
    alpha: f64,
    n_bins: usize,
    base: IsotonicRegression,
}

impl QuantileCalibrator {
    /// Create a calibrator for quantile level `alpha`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        Ok(Self {
            alpha,
            n_bins: DEFAULT_N_BINS,
            base: IsotonicRegression::new(),
        })
    }

    /// Sets the number of quantile bins (default 20).
    #[must_use]
    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }

    /// The quantile level this calibrator targets.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The configured bin count.
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// The fitted knots of the underlying isotonic map.
    #[must_use]
    pub fn knots(&self) -> (&[f64], &[f64]) {
        self.base.knots()
    }

    /// Fit the calibration map from raw quantile forecasts to outcomes.
    ///
    /// Empty bins contribute no knot.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `q_pred` and `y` differ in length.
    pub fn fit(&mut self, q_pred: &[f64], y: &[f64]) -> Result<()> {
        if q_pred.len() != y.len() {
            return Err(PronosticoError::length_mismatch(
                "q_pred",
                q_pred.len(),
                y.len(),
            ));
        }

        let bins = quantile_bins(q_pred, self.n_bins);
        let mut pred_by_bin: Vec<Vec<f64>> = vec![Vec::new(); bins.n_bins()];
        let mut y_by_bin: Vec<Vec<f64>> = vec![Vec::new(); bins.n_bins()];
        for (i, &b) in bins.bin_ids.iter().enumerate() {
            pred_by_bin[b].push(q_pred[i]);
            y_by_bin[b].push(y[i]);
        }

        let mut knots_x: Vec<f64> = Vec::new();
        let mut knots_y: Vec<f64> = Vec::new();
        for (pred, outcomes) in pred_by_bin.iter().zip(y_by_bin.iter()) {
            if pred.is_empty() {
                continue;
            }
            knots_x.push(mean(pred));
            knots_y.push(empirical_quantile(outcomes, self.alpha));
        }

        self.base.fit(&knots_x, &knots_y)
    }

    /// Calibrated values for new raw quantile forecasts.
    #[must_use]
    pub fn predict(&self, q_pred_new: &[f64]) -> Vec<f64> {
        self.base.predict(q_pred_new)
    }

    /// Calibrated value for a single raw quantile forecast.
    #[must_use]
    pub fn predict_one(&self, q_pred: f64) -> f64 {
        self.base.predict_one(q_pred)
    }
}

impl Calibrator for QuantileCalibrator {
    fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        QuantileCalibrator::fit(self, x, y)
    }

    fn predict(&self, x: &[f64]) -> Vec<f64> {
        QuantileCalibrator::predict(self, x)
    }
}

#[cfg(test)]
#[path = "calibration_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "calibration_proptests.rs"]
mod proptests;
