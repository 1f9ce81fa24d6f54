//! Scoring-rule loss decomposition: UNC − DSC + MCB, and the skill
//! score R* derived from it.
//!
//! The decomposition evaluates a forecast at three operating points: the
//! best constant forecast (uncertainty), the raw forecast, and the
//! recalibrated forecast. Miscalibration is the loss recoverable by
//! recalibration; discrimination is the loss beaten relative to the
//! naive constant. Both are clamped at zero, so the reconstruction
//! identity `score = UNC − DSC + MCB` holds exactly only while neither
//! clamp is active; the record carries the residual as a diagnostic.

use serde::{Deserialize, Serialize};

use crate::calibration::{IsotonicRegression, QuantileCalibrator};
use crate::error::{PronosticoError, Result};
use crate::functional::Functional;
use crate::metrics::{reference_forecast, score};

/// Result of a score decomposition.
///
/// Invariants: `unc`, `dsc`, and `mcb` are each clamped at zero by
/// construction; `reconstruction_error` bounds how far the clamps moved
/// the identity `score = unc - dsc + mcb` away from exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Functional the forecast targets (alpha rides inside `Quantile`).
    pub functional: Functional,
    /// Mean scoring-rule loss of the raw forecast.
    pub score: f64,
    /// Uncertainty: loss of the best constant forecast.
    pub unc: f64,
    /// Discrimination: loss beaten relative to the constant reference.
    pub dsc: f64,
    /// Miscalibration: loss recoverable by recalibration.
    pub mcb: f64,
    /// Mean scoring-rule loss of the recalibrated forecast.
    pub score_calibrated: f64,
    /// `|score - (unc - dsc + mcb)|`; near zero unless a clamp was active.
    pub reconstruction_error: f64,
}

impl Decomposition {
    /// Skill score R* for this decomposition. See [`rstar`].
    #[must_use]
    pub fn rstar(&self) -> f64 {
        rstar(self)
    }
}

/// Skill score R*: `(DSC - MCB) / UNC`.
///
/// Positive only when discrimination exceeds miscalibration; unbounded
/// and unclamped. Returns 0.0 when `UNC` is non-positive or non-finite,
/// guarding the degenerate constant-outcome case.
///
/// # Examples
///
/// ```
/// use pronostico::prelude::*;
///
/// let y = [1.0, 2.0, 3.0, 4.0];
/// let dec = decompose(&y, &y, Functional::Mean, 20).unwrap();
/// // A perfect forecast has maximal skill: DSC = UNC, MCB = 0.
/// assert!((dec.rstar() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn rstar(decomp: &Decomposition) -> f64 {
    if !decomp.unc.is_finite() || decomp.unc <= 0.0 {
        return 0.0;
    }
    (decomp.dsc - decomp.mcb) / decomp.unc
}

/// Decomposes the mean scoring-rule loss of `yhat` against `y` into
/// uncertainty, discrimination, and miscalibration.
///
/// Mean and median forecasts are recalibrated with an increasing
/// isotonic fit of `yhat -> y`; quantile forecasts with a
/// [`QuantileCalibrator`] using `n_bins` quantile bins (the bin count is
/// ignored for the other functionals;
/// [`DEFAULT_N_BINS`](crate::stats::DEFAULT_N_BINS) is the conventional
/// choice).
///
/// # Errors
///
/// Returns `UnsupportedFunctional` for `Probability`,
/// `InvalidHyperparameter` for a quantile level outside (0, 1), and
/// `DimensionMismatch` if the sequences differ in length.
///
/// # Examples
///
/// ```
/// use pronostico::prelude::*;
///
/// let y = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let yhat = [1.2, 1.9, 3.3, 3.8, 5.1, 6.2];
/// let dec = decompose(&y, &yhat, Functional::Mean, 20).unwrap();
/// assert!(dec.unc >= 0.0 && dec.dsc >= 0.0 && dec.mcb >= 0.0);
/// ```
pub fn decompose(
    y: &[f64],
    yhat: &[f64],
    functional: Functional,
    n_bins: usize,
) -> Result<Decomposition> {
    if y.len() != yhat.len() {
        return Err(PronosticoError::length_mismatch("y", y.len(), yhat.len()));
    }

    let ref_stat = reference_forecast(y, functional)?;
    let ref_pred = vec![ref_stat; y.len()];
    let unc = score(y, &ref_pred, functional)?;

    let yhat_cal = match functional {
        Functional::Mean | Functional::Median => {
            let mut cal = IsotonicRegression::new();
            cal.fit(yhat, y)?;
            cal.predict(yhat)
        }
        Functional::Quantile(alpha) => {
            let mut cal = QuantileCalibrator::new(alpha)?.with_n_bins(n_bins);
            cal.fit(yhat, y)?;
            cal.predict(yhat)
        }
        Functional::Probability => {
            return Err(PronosticoError::UnsupportedFunctional {
                functional: functional.to_string(),
                supported: "mean, median, quantile".to_string(),
            })
        }
    };

    let score_raw = score(y, yhat, functional)?;
    let score_cal = score(y, &yhat_cal, functional)?;

    let mcb = (score_raw - score_cal).max(0.0);
    let dsc = (unc - score_cal).max(0.0);
    let reconstructed = unc - dsc + mcb;

    Ok(Decomposition {
        functional,
        score: score_raw,
        unc,
        dsc,
        mcb,
        score_calibrated: score_cal,
        reconstruction_error: (score_raw - reconstructed).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::DEFAULT_N_BINS;
    use crate::synthetic::make_synthetic_hetero;

    #[test]
    fn test_components_non_negative_mean() {
        let data = make_synthetic_hetero(2000, 7);
        let dec =
            decompose(&data.y, &data.mean_pred, Functional::Mean, DEFAULT_N_BINS).expect("decompose");
        assert!(dec.unc >= 0.0);
        assert!(dec.dsc >= 0.0);
        assert!(dec.mcb >= 0.0);
    }

    #[test]
    fn test_components_non_negative_quantile() {
        let data = make_synthetic_hetero(2000, 7);
        let dec = decompose(
            &data.y,
            &data.q90_pred,
            Functional::Quantile(0.9),
            DEFAULT_N_BINS,
        )
        .expect("decompose");
        assert!(dec.unc >= 0.0);
        assert!(dec.dsc >= 0.0);
        assert!(dec.mcb >= 0.0);
        assert_eq!(dec.functional, Functional::Quantile(0.9));
    }

    #[test]
    fn test_reconstruction_identity_without_clamping() {
        // For the mean functional the isotonic fit minimizes in-sample
        // squared error over monotone maps, which include both the raw
        // forecast and the constant reference, so score_cal <= score_raw
        // and score_cal <= UNC: neither clamp activates and the identity
        // is exact up to rounding.
        let data = make_synthetic_hetero(3000, 11);
        let dec = decompose(&data.y, &data.mean_pred, Functional::Mean, DEFAULT_N_BINS)
            .expect("decompose");
        assert!(dec.score_calibrated <= dec.score + 1e-12);
        assert!(dec.score_calibrated <= dec.unc + 1e-12);
        assert!(
            dec.reconstruction_error < 1e-9,
            "identity violated: {}",
            dec.reconstruction_error
        );
    }

    #[test]
    fn test_reconstruction_identity_when_clamps_inactive() {
        // Whatever the functional, the identity must be exact whenever
        // neither max(0, .) clamp fired.
        let data = make_synthetic_hetero(2000, 3);
        let cases = [
            (Functional::Median, &data.q50_pred),
            (Functional::Quantile(0.1), &data.q10_pred),
            (Functional::Quantile(0.9), &data.q90_pred),
        ];
        for (functional, pred) in cases {
            let dec = decompose(&data.y, pred, functional, DEFAULT_N_BINS).expect("decompose");
            let clamp_free =
                dec.score_calibrated <= dec.score && dec.score_calibrated <= dec.unc;
            if clamp_free {
                assert!(
                    dec.reconstruction_error < 1e-9,
                    "identity violated for {functional}: {}",
                    dec.reconstruction_error
                );
            }
        }
    }

    #[test]
    fn test_decompose_perfect_forecast() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let dec = decompose(&y, &y, Functional::Mean, DEFAULT_N_BINS).expect("decompose");
        assert!(dec.score < 1e-12);
        assert!(dec.mcb < 1e-12);
        // All the uncertainty is resolved by a perfect forecast.
        assert!((dec.dsc - dec.unc).abs() < 1e-12);
    }

    #[test]
    fn test_decompose_constant_forecast_has_no_discrimination() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let yhat = [3.0; 5];
        let dec = decompose(&y, &yhat, Functional::Mean, DEFAULT_N_BINS).expect("decompose");
        // Forecasting the sample mean: raw score equals UNC, and the
        // isotonic fit collapses to that same constant.
        assert!((dec.score - dec.unc).abs() < 1e-12);
        assert!(dec.dsc < 1e-12);
        assert!(dec.mcb < 1e-12);
    }

    #[test]
    fn test_decompose_biased_forecast_is_miscalibrated() {
        let y: Vec<f64> = (0..200).map(f64::from).collect();
        let yhat: Vec<f64> = y.iter().map(|v| v + 10.0).collect();
        let dec = decompose(&y, &yhat, Functional::Mean, DEFAULT_N_BINS).expect("decompose");
        // The shift is fully recoverable by calibration.
        assert!(dec.mcb > 50.0);
        assert!(dec.score_calibrated < dec.score);
    }

    #[test]
    fn test_decompose_rejects_probability() {
        let y = [0.0, 1.0];
        let p = [0.2, 0.8];
        assert!(decompose(&y, &p, Functional::Probability, DEFAULT_N_BINS).is_err());
    }

    #[test]
    fn test_decompose_rejects_bad_alpha() {
        let y = [0.0, 1.0];
        assert!(decompose(&y, &y, Functional::Quantile(0.0), DEFAULT_N_BINS).is_err());
        assert!(decompose(&y, &y, Functional::Quantile(1.5), DEFAULT_N_BINS).is_err());
    }

    #[test]
    fn test_decompose_rejects_length_mismatch() {
        assert!(decompose(&[1.0, 2.0], &[1.0], Functional::Mean, DEFAULT_N_BINS).is_err());
    }

    #[test]
    fn test_rstar_degenerate_guard() {
        let dec = Decomposition {
            functional: Functional::Mean,
            score: 0.0,
            unc: 0.0,
            dsc: 5.0,
            mcb: 1.0,
            score_calibrated: 0.0,
            reconstruction_error: 0.0,
        };
        assert_eq!(rstar(&dec), 0.0);
    }

    #[test]
    fn test_rstar_value() {
        let dec = Decomposition {
            functional: Functional::Mean,
            score: 0.0,
            unc: 2.0,
            dsc: 3.0,
            mcb: 1.0,
            score_calibrated: 0.0,
            reconstruction_error: 0.0,
        };
        assert_eq!(rstar(&dec), 1.0);
        assert_eq!(dec.rstar(), 1.0);
    }

    #[test]
    fn test_rstar_negative_when_miscalibration_dominates() {
        let dec = Decomposition {
            functional: Functional::Median,
            score: 0.0,
            unc: 4.0,
            dsc: 1.0,
            mcb: 3.0,
            score_calibrated: 0.0,
            reconstruction_error: 0.0,
        };
        assert_eq!(rstar(&dec), -0.5);
    }

    #[test]
    fn test_decomposition_serializes() {
        let y = [1.0, 2.0, 3.0, 4.0];
        let dec = decompose(&y, &y, Functional::Quantile(0.5), DEFAULT_N_BINS).expect("decompose");
        let json = serde_json::to_string(&dec).expect("serialize");
        assert!(json.contains("\"unc\""));
        assert!(json.contains("\"quantile\""));
    }

    #[test]
    fn test_held_out_calibration_improves_on_average() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        // In-sample recalibration is not guaranteed to help on new data,
        // but across bootstrap resamples of the same generator it must
        // help in expectation: fit on an in-bag resample, score on the
        // out-of-bag observations.
        let data = make_synthetic_hetero(4000, 7);
        let n = data.len();

        let mut improvements = Vec::new();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut in_bag = vec![false; n];
            let mut train_x = Vec::with_capacity(n);
            let mut train_y = Vec::with_capacity(n);
            for _ in 0..n {
                let i = rng.gen_range(0..n);
                in_bag[i] = true;
                train_x.push(data.mean_pred[i]);
                train_y.push(data.y[i]);
            }
            let oob: Vec<usize> = (0..n).filter(|&i| !in_bag[i]).collect();
            let oob_x: Vec<f64> = oob.iter().map(|&i| data.mean_pred[i]).collect();
            let oob_y: Vec<f64> = oob.iter().map(|&i| data.y[i]).collect();

            let mut cal = IsotonicRegression::new();
            cal.fit(&train_x, &train_y).expect("fit");
            let cal_pred = cal.predict(&oob_x);

            let raw = score(&oob_y, &oob_x, Functional::Mean).expect("raw score");
            let recal = score(&oob_y, &cal_pred, Functional::Mean).expect("cal score");
            improvements.push(raw - recal);
        }
        let avg: f64 = improvements.iter().sum::<f64>() / improvements.len() as f64;
        assert!(
            avg > 0.0,
            "expected average out-of-bag improvement, got {avg} from {improvements:?}"
        );
    }
}
