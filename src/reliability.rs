//! Reliability diagnostics: predicted vs. empirically observed values.
//!
//! Each function bins a forecast array by its own quantile edges and
//! reports, per populated bin, the mean prediction against the matching
//! empirical target. These are inspection tools for reliability diagrams
//! and calibration surfaces; nothing here corrects the forecasts.

use serde::{Deserialize, Serialize};

use crate::error::{PronosticoError, Result};
use crate::functional::{check_alpha, Functional};
use crate::stats::{empirical_quantile, quantile_bins};

/// Default bin count along the prediction axis of a 2-D surface.
pub const DEFAULT_N_BINS_PRED: usize = 10;

/// Default bin count along the covariate axis of a 2-D surface.
pub const DEFAULT_N_BINS_Z: usize = 6;

/// One row of a mean or probability reliability diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityBin {
    /// Bin index in the quantile partition of the predictions.
    pub bin: usize,
    /// Mean prediction inside the bin.
    pub pred_mean: f64,
    /// Empirical target inside the bin: mean outcome, or event rate for
    /// probability forecasts.
    pub empirical: f64,
    /// Number of observations in the bin.
    pub count: usize,
}

/// One row of a quantile reliability diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileReliabilityBin {
    /// Bin index in the quantile partition of the predictions.
    pub bin: usize,
    /// Mean quantile prediction inside the bin.
    pub pred_mean: f64,
    /// Empirical alpha-quantile of the outcomes inside the bin.
    pub empirical: f64,
    /// Quantile level being diagnosed.
    pub alpha: f64,
    /// Number of observations in the bin.
    pub count: usize,
}

/// One populated cell of a 2-D reliability surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCell {
    /// Bin index along the prediction axis.
    pub bin_pred: usize,
    /// Bin index along the covariate axis.
    pub bin_z: usize,
    /// Mean prediction inside the cell.
    pub pred_mean: f64,
    /// Mean covariate value inside the cell.
    pub z_mid: f64,
    /// Empirical target inside the cell.
    pub empirical: f64,
    /// Number of observations in the cell.
    pub count: usize,
}

/// Reliability diagram for mean forecasts: per populated bin, the mean
/// prediction against the mean outcome.
///
/// # Examples
///
/// ```
/// use pronostico::reliability::reliability_mean;
///
/// let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let yhat = [1.1, 2.2, 2.9, 4.3, 4.8, 6.1];
/// let rows = reliability_mean(&y, &yhat, 3);
/// assert!(!rows.is_empty());
/// let total: usize = rows.iter().map(|r| r.count).sum();
/// assert_eq!(total, 6);
/// ```
///
/// # Panics
///
/// Panics if `y` and `yhat` have different lengths.
#[must_use]
pub fn reliability_mean(y: &[f64], yhat: &[f64], n_bins: usize) -> Vec<ReliabilityBin> {
    binned_means(y, yhat, n_bins)
}

/// Reliability diagram for event-probability forecasts: per populated
/// bin, the mean predicted probability against the empirical event rate.
///
/// `y_binary` must be 0/1-valued for the rate interpretation to hold;
/// this is not enforced.
///
/// # Panics
///
/// Panics if `y_binary` and `p_pred` have different lengths.
#[must_use]
pub fn reliability_proba(y_binary: &[f64], p_pred: &[f64], n_bins: usize) -> Vec<ReliabilityBin> {
    binned_means(y_binary, p_pred, n_bins)
}

fn binned_means(y: &[f64], pred: &[f64], n_bins: usize) -> Vec<ReliabilityBin> {
    assert_eq!(y.len(), pred.len(), "Sequences must have same length");

    let bins = quantile_bins(pred, n_bins);
    let nb = bins.n_bins();
    let mut sum_pred = vec![0.0; nb];
    let mut sum_y = vec![0.0; nb];
    let mut counts = vec![0usize; nb];
    for (i, &b) in bins.bin_ids.iter().enumerate() {
        sum_pred[b] += pred[i];
        sum_y[b] += y[i];
        counts[b] += 1;
    }

    (0..nb)
        .filter(|&b| counts[b] > 0)
        .map(|b| ReliabilityBin {
            bin: b,
            pred_mean: sum_pred[b] / counts[b] as f64,
            empirical: sum_y[b] / counts[b] as f64,
            count: counts[b],
        })
        .collect()
}

/// Reliability diagram for quantile forecasts at level `alpha`: per
/// populated bin, the mean quantile prediction against the empirical
/// alpha-quantile of the outcomes.
///
/// # Errors
///
/// Returns `InvalidHyperparameter` unless `0 < alpha < 1`.
///
/// # Panics
///
/// Panics if `y` and `qhat` have different lengths.
pub fn reliability_quantile(
    y: &[f64],
    qhat: &[f64],
    alpha: f64,
    n_bins: usize,
) -> Result<Vec<QuantileReliabilityBin>> {
    assert_eq!(y.len(), qhat.len(), "Sequences must have same length");
    check_alpha(alpha)?;

    let bins = quantile_bins(qhat, n_bins);
    let nb = bins.n_bins();
    let mut sum_pred = vec![0.0; nb];
    let mut y_by_bin: Vec<Vec<f64>> = vec![Vec::new(); nb];
    for (i, &b) in bins.bin_ids.iter().enumerate() {
        sum_pred[b] += qhat[i];
        y_by_bin[b].push(y[i]);
    }

    Ok((0..nb)
        .filter(|&b| !y_by_bin[b].is_empty())
        .map(|b| QuantileReliabilityBin {
            bin: b,
            pred_mean: sum_pred[b] / y_by_bin[b].len() as f64,
            empirical: empirical_quantile(&y_by_bin[b], alpha),
            alpha,
            count: y_by_bin[b].len(),
        })
        .collect())
}

/// 2-D reliability surface: quantile-bins the predictions and a covariate
/// `z` independently, then reports the empirical target per populated
/// cell of the cross-partition.
///
/// The empirical target is the mean outcome for `Mean` and `Probability`
/// functionals and the empirical alpha-quantile for `Quantile(alpha)`.
/// Cells are ordered by `(bin_pred, bin_z)`.
///
/// # Errors
///
/// Returns `UnsupportedFunctional` for `Median` and
/// `InvalidHyperparameter` for a quantile level outside (0, 1).
///
/// # Panics
///
/// Panics if `y`, `pred`, and `z` do not all have the same length.
pub fn reliability_surface_2d(
    y: &[f64],
    pred: &[f64],
    z: &[f64],
    functional: Functional,
    n_bins_pred: usize,
    n_bins_z: usize,
) -> Result<Vec<SurfaceCell>> {
    assert_eq!(y.len(), pred.len(), "Sequences must have same length");
    assert_eq!(y.len(), z.len(), "Sequences must have same length");

    match functional {
        Functional::Mean | Functional::Probability => {}
        Functional::Quantile(alpha) => check_alpha(alpha)?,
        Functional::Median => {
            return Err(PronosticoError::UnsupportedFunctional {
                functional: functional.to_string(),
                supported: "mean, probability, quantile".to_string(),
            })
        }
    }

    let pred_bins = quantile_bins(pred, n_bins_pred);
    let z_bins = quantile_bins(z, n_bins_z);
    let (np, nz) = (pred_bins.n_bins(), z_bins.n_bins());

    let mut sum_pred = vec![0.0; np * nz];
    let mut sum_z = vec![0.0; np * nz];
    let mut y_by_cell: Vec<Vec<f64>> = vec![Vec::new(); np * nz];
    for i in 0..y.len() {
        let cell = pred_bins.bin_ids[i] * nz + z_bins.bin_ids[i];
        sum_pred[cell] += pred[i];
        sum_z[cell] += z[i];
        y_by_cell[cell].push(y[i]);
    }

    let mut rows = Vec::new();
    for bp in 0..np {
        for bz in 0..nz {
            let cell = bp * nz + bz;
            let members = &y_by_cell[cell];
            if members.is_empty() {
                continue;
            }
            let empirical = match functional {
                Functional::Quantile(alpha) => empirical_quantile(members, alpha),
                _ => members.iter().sum::<f64>() / members.len() as f64,
            };
            rows.push(SurfaceCell {
                bin_pred: bp,
                bin_z: bz,
                pred_mean: sum_pred[cell] / members.len() as f64,
                z_mid: sum_z[cell] / members.len() as f64,
                empirical,
                count: members.len(),
            });
        }
    }
    Ok(rows)
}
