//! Pronostico: forecast verification and calibration in pure Rust.
//!
//! Pronostico evaluates probabilistic forecasts (point means, medians,
//! quantiles, event probabilities) for calibration quality and decomposes
//! their scoring-rule loss into interpretable components: uncertainty
//! (UNC), discrimination (DSC), and miscalibration (MCB), plus the skill
//! score R* derived from them.
//!
//! # Quick Start
//!
//! ```
//! use pronostico::prelude::*;
//!
//! // Outcomes and a biased forecast of their mean.
//! let y: Vec<f64> = (0..100).map(f64::from).collect();
//! let yhat: Vec<f64> = y.iter().map(|v| v + 5.0).collect();
//!
//! let dec = decompose(&y, &yhat, Functional::Mean, DEFAULT_N_BINS).unwrap();
//! assert!(dec.mcb > 0.0); // the bias is recoverable by recalibration
//! assert!(dec.rstar() > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`functional`]: The forecast target tag (mean, median, quantile, probability)
//! - [`stats`]: Empirical quantiles and quantile-edge binning
//! - [`metrics`]: Scoring rules (squared error, absolute error, pinball loss)
//! - [`calibration`]: Isotonic (PAV) and quantile-conditional calibrators
//! - [`reliability`]: Reliability diagrams and 2-D reliability surfaces
//! - [`decomposition`]: UNC/DSC/MCB decomposition and the R* skill score
//! - [`synthetic`]: Seeded heteroscedastic data for stress testing
//! - [`error`]: Error types and the crate [`Result`](error::Result) alias
//!
//! The core is purely functional over borrowed slices: no I/O, no shared
//! mutable state, deterministic given its inputs. CSV handling, argument
//! parsing, and plotting are left to consumers of these records.

pub mod calibration;
pub mod decomposition;
pub mod error;
pub mod functional;
pub mod metrics;
pub mod prelude;
pub mod reliability;
pub mod stats;
pub mod synthetic;
pub mod traits;
