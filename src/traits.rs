//! Core traits for forecast calibrators.
//!
//! These traits define the API contracts shared by all calibration maps.

use crate::error::Result;

/// Trait for one-dimensional forecast calibrators.
///
/// Calibrators learn a map from raw forecasts to recalibrated forecasts
/// from paired training data, then apply it to new forecasts. Fitting is
/// the only mutating operation; prediction never changes the fitted map.
///
/// # Examples
///
/// ```
/// use pronostico::prelude::*;
///
/// let yhat = [0.1, 0.4, 0.3, 0.8];
/// let y = [0.0, 1.0, 0.0, 1.0];
///
/// let mut cal = IsotonicRegression::new();
/// cal.fit(&yhat, &y).unwrap();
/// let recal = cal.predict(&yhat);
/// assert_eq!(recal.len(), 4);
/// ```
pub trait Calibrator {
    /// Fits the calibration map from raw forecasts `x` to targets `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (length mismatch, invalid
    /// hyperparameters).
    fn fit(&mut self, x: &[f64], y: &[f64]) -> Result<()>;

    /// Applies the fitted map to new raw forecasts.
    fn predict(&self, x: &[f64]) -> Vec<f64>;
}
