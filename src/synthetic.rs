//! Synthetic forecast data for stress testing.
//!
//! Generates a heteroscedastic regression sample with deliberately
//! miscalibrated forecasts: the mean forecast carries a sign-dependent
//! bias and the predictive scale is 20% too sharp, so every diagnostic
//! in the crate has something to find. The noise is Gaussian with a 10%
//! Student-t(3) contamination for realistic tails.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal, StudentT};

/// A generated sample of outcomes, forecasts, and a covariate.
///
/// `event` holds 0/1 indicators of `y > 0` as floats, ready for
/// [`reliability_proba`](crate::reliability::reliability_proba);
/// `p_pred` is a slightly miscalibrated forecast of that event.
#[derive(Debug, Clone)]
pub struct SyntheticHetero {
    /// Observed outcomes.
    pub y: Vec<f64>,
    /// Biased mean forecasts.
    pub mean_pred: Vec<f64>,
    /// Over-sharp 0.1-quantile forecasts.
    pub q10_pred: Vec<f64>,
    /// Median forecasts (equal to the mean forecast).
    pub q50_pred: Vec<f64>,
    /// Over-sharp 0.9-quantile forecasts.
    pub q90_pred: Vec<f64>,
    /// 0/1 indicator of `y > 0`.
    pub event: Vec<f64>,
    /// Miscalibrated event-probability forecasts.
    pub p_pred: Vec<f64>,
    /// Independent standard normal covariate.
    pub z_cov: Vec<f64>,
}

impl SyntheticHetero {
    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the sample is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Generates `n` observations of the heteroscedastic benchmark.
///
/// The data-generating process: x ~ U(-2, 2);
/// mu = 1.5 sin(x) + 0.5 x; sigma = 0.5 + 0.75 [x > 0] + 0.3 x^2;
/// y = mu + sigma * eps with eps ~ N(0, 1) contaminated 10% by t(3).
/// Forecasts: mean_pred = mu + 0.3 [x < 0] - 0.2 [x >= 0];
/// quantile forecasts use 0.8 sigma and +/- 1.1 standard units;
/// p_pred = 0.9 sigmoid(mu / (sigma + 1e-6)) + 0.05.
///
/// Deterministic for a given `seed`.
///
/// # Examples
///
/// ```
/// use pronostico::synthetic::make_synthetic_hetero;
///
/// let data = make_synthetic_hetero(100, 7);
/// assert_eq!(data.len(), 100);
/// assert!(data.event.iter().all(|&e| e == 0.0 || e == 1.0));
/// ```
#[must_use]
pub fn make_synthetic_hetero(n: usize, seed: u64) -> SyntheticHetero {
    let mut rng = StdRng::seed_from_u64(seed);
    let student_t = StudentT::new(3.0).expect("degrees of freedom are positive");

    let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-2.0..2.0)).collect();
    let z_cov: Vec<f64> = (0..n).map(|_| StandardNormal.sample(&mut rng)).collect();
    let eps: Vec<f64> = (0..n)
        .map(|_| {
            if rng.gen_bool(0.1) {
                student_t.sample(&mut rng)
            } else {
                StandardNormal.sample(&mut rng)
            }
        })
        .collect();

    let mut out = SyntheticHetero {
        y: Vec::with_capacity(n),
        mean_pred: Vec::with_capacity(n),
        q10_pred: Vec::with_capacity(n),
        q50_pred: Vec::with_capacity(n),
        q90_pred: Vec::with_capacity(n),
        event: Vec::with_capacity(n),
        p_pred: Vec::with_capacity(n),
        z_cov,
    };

    for i in 0..n {
        let xi = x[i];
        let mu = 1.5 * xi.sin() + 0.5 * xi;
        let sigma = 0.5 + if xi > 0.0 { 0.75 } else { 0.0 } + 0.3 * xi * xi;
        let yi = mu + sigma * eps[i];

        let mean_pred = mu + if xi < 0.0 { 0.3 } else { -0.2 };
        let scale_pred = 0.8 * sigma;

        out.y.push(yi);
        out.mean_pred.push(mean_pred);
        out.q10_pred.push(mean_pred - 1.1 * scale_pred);
        out.q50_pred.push(mean_pred);
        out.q90_pred.push(mean_pred + 1.1 * scale_pred);
        out.event.push(if yi > 0.0 { 1.0 } else { 0.0 });
        out.p_pred.push(0.9 * sigmoid(mu / (sigma + 1e-6)) + 0.05);
    }
    out
}

fn sigmoid(v: f64) -> f64 {
    1.0 / (1.0 + (-v).exp())
}
