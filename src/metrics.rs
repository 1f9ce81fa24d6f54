//! Scoring rules for forecast evaluation.
//!
//! Each [`Functional`](crate::functional::Functional) has a consistent
//! scoring rule: squared error for means, absolute error for medians,
//! pinball loss for quantiles. [`score`] averages the elementwise loss
//! over a sample; [`reference_forecast`] produces the best constant
//! forecast, whose score is the uncertainty component of the
//! decomposition.

use crate::error::{PronosticoError, Result};
use crate::functional::{check_alpha, Functional};
use crate::stats::{empirical_quantile, mean};

/// Squared error between an outcome and a mean forecast.
#[must_use]
pub fn squared_error(y: f64, mu: f64) -> f64 {
    (y - mu).powi(2)
}

/// Absolute error between an outcome and a median forecast.
#[must_use]
pub fn absolute_error(y: f64, m: f64) -> f64 {
    (y - m).abs()
}

/// Pinball (quantile) loss at level `alpha`.
///
/// Penalizes under-prediction by `alpha` and over-prediction by
/// `1 - alpha` per unit of error, so the alpha-quantile is the unique
/// minimizer in expectation.
///
/// # Examples
///
/// ```
/// use pronostico::metrics::pinball_loss;
///
/// assert_eq!(pinball_loss(3.0, 1.0, 0.9), 1.8); // under-predicted
/// assert_eq!(pinball_loss(1.0, 3.0, 0.9), 0.2); // over-predicted
/// ```
#[must_use]
pub fn pinball_loss(y: f64, q: f64, alpha: f64) -> f64 {
    let e = y - q;
    if e >= 0.0 {
        alpha * e
    } else {
        (alpha - 1.0) * e
    }
}

/// Mean scoring-rule loss of `pred` against `y` under `functional`.
///
/// # Errors
///
/// Returns `UnsupportedFunctional` for `Probability` (probabilities are
/// diagnostic-only here) and `InvalidHyperparameter` for a quantile level
/// outside (0, 1).
///
/// # Panics
///
/// Panics if `y` and `pred` have different lengths.
pub fn score(y: &[f64], pred: &[f64], functional: Functional) -> Result<f64> {
    assert_eq!(y.len(), pred.len(), "Sequences must have same length");

    let n = y.len() as f64;
    let total = match functional {
        Functional::Mean => y
            .iter()
            .zip(pred.iter())
            .map(|(&yi, &pi)| squared_error(yi, pi))
            .sum::<f64>(),
        Functional::Median => y
            .iter()
            .zip(pred.iter())
            .map(|(&yi, &pi)| absolute_error(yi, pi))
            .sum::<f64>(),
        Functional::Quantile(alpha) => {
            check_alpha(alpha)?;
            y.iter()
                .zip(pred.iter())
                .map(|(&yi, &pi)| pinball_loss(yi, pi, alpha))
                .sum::<f64>()
        }
        Functional::Probability => {
            return Err(PronosticoError::UnsupportedFunctional {
                functional: functional.to_string(),
                supported: "mean, median, quantile".to_string(),
            })
        }
    };
    Ok(total / n)
}

/// The best constant forecast for `y` under `functional`: the mean,
/// median, or empirical alpha-quantile of the outcomes.
///
/// # Errors
///
/// Same conditions as [`score`].
pub fn reference_forecast(y: &[f64], functional: Functional) -> Result<f64> {
    match functional {
        Functional::Mean => Ok(mean(y)),
        Functional::Median => Ok(empirical_quantile(y, 0.5)),
        Functional::Quantile(alpha) => {
            check_alpha(alpha)?;
            Ok(empirical_quantile(y, alpha))
        }
        Functional::Probability => Err(PronosticoError::UnsupportedFunctional {
            functional: functional.to_string(),
            supported: "mean, median, quantile".to_string(),
        }),
    }
}
