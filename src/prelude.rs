//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use pronostico::prelude::*;
//! ```

pub use crate::calibration::{IsotonicRegression, QuantileCalibrator};
pub use crate::decomposition::{decompose, rstar, Decomposition};
pub use crate::error::{PronosticoError, Result};
pub use crate::functional::Functional;
pub use crate::metrics::{pinball_loss, reference_forecast, score};
pub use crate::reliability::{
    reliability_mean, reliability_proba, reliability_quantile, reliability_surface_2d,
    QuantileReliabilityBin, ReliabilityBin, SurfaceCell, DEFAULT_N_BINS_PRED, DEFAULT_N_BINS_Z,
};
pub use crate::stats::{empirical_quantile, quantile_bins, BinAssignment, DEFAULT_N_BINS};
pub use crate::synthetic::{make_synthetic_hetero, SyntheticHetero};
pub use crate::traits::Calibrator;
