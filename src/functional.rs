//! Forecast functional tags.
//!
//! A [`Functional`] identifies what a forecast targets and therefore which
//! scoring rule and reference statistic apply to it. Quantile forecasts
//! carry their level alpha inside the variant, so an invalid
//! functional/alpha combination is unrepresentable once validated.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PronosticoError, Result};

/// The statistical functional a forecast targets.
///
/// Determines the scoring rule (squared error, absolute error, pinball
/// loss) and the reference statistic used in score decomposition.
///
/// # Examples
///
/// ```
/// use pronostico::functional::Functional;
///
/// let f = Functional::Quantile(0.9);
/// assert_eq!(f.alpha(), Some(0.9));
/// assert_eq!(Functional::Mean.alpha(), None);
/// assert_eq!(format!("{}", Functional::Median), "median");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Functional {
    /// Conditional mean forecast, scored by squared error.
    Mean,
    /// Conditional median forecast, scored by absolute error.
    Median,
    /// Conditional quantile forecast at level alpha, scored by pinball loss.
    Quantile(f64),
    /// Event probability forecast; diagnostic (reliability) use only.
    Probability,
}

impl Functional {
    /// Returns the quantile level for `Quantile`, `None` otherwise.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        match self {
            Functional::Quantile(alpha) => Some(*alpha),
            _ => None,
        }
    }

    /// Lowercase tag name, without the alpha.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Functional::Mean => "mean",
            Functional::Median => "median",
            Functional::Quantile(_) => "quantile",
            Functional::Probability => "probability",
        }
    }
}

impl fmt::Display for Functional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Functional::Quantile(alpha) => write!(f, "quantile({alpha})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Validates a quantile level, rejecting values outside the open (0, 1).
pub(crate) fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(PronosticoError::invalid_alpha(alpha))
    }
}
