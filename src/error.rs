//! Error types for Pronostico operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Pronostico operations.
///
/// Covers the failure modes of the calibration and decomposition core:
/// unsupported functionals, hyperparameters outside their valid range,
/// and mismatched input lengths.
///
/// # Examples
///
/// ```
/// use pronostico::error::PronosticoError;
///
/// let err = PronosticoError::InvalidHyperparameter {
///     param: "alpha".to_string(),
///     value: "1.5".to_string(),
///     constraint: "0 < alpha < 1".to_string(),
/// };
/// assert!(err.to_string().contains("alpha"));
/// ```
#[derive(Debug)]
pub enum PronosticoError {
    /// The requested functional is outside the supported set for the
    /// operation (e.g. `probability` in a score decomposition).
    UnsupportedFunctional {
        /// Functional tag as supplied by the caller
        functional: String,
        /// What the operation supports instead
        supported: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Paired input sequences have different lengths.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for PronosticoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PronosticoError::UnsupportedFunctional {
                functional,
                supported,
            } => {
                write!(
                    f,
                    "Unsupported functional: {functional}, expected one of {supported}"
                )
            }
            PronosticoError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            PronosticoError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            PronosticoError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PronosticoError {}

impl From<&str> for PronosticoError {
    fn from(msg: &str) -> Self {
        PronosticoError::Other(msg.to_string())
    }
}

impl From<String> for PronosticoError {
    fn from(msg: String) -> Self {
        PronosticoError::Other(msg)
    }
}

impl PronosticoError {
    /// Create a dimension mismatch error for paired sequences.
    #[must_use]
    pub fn length_mismatch(context: &str, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            expected: format!("{context} of length {expected}"),
            actual: format!("{actual}"),
        }
    }

    /// Create an invalid-alpha error for quantile levels outside (0, 1).
    #[must_use]
    pub fn invalid_alpha(alpha: f64) -> Self {
        Self::InvalidHyperparameter {
            param: "alpha".to_string(),
            value: format!("{alpha}"),
            constraint: "0 < alpha < 1".to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PronosticoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_functional_display() {
        let err = PronosticoError::UnsupportedFunctional {
            functional: "probability".to_string(),
            supported: "mean, median, quantile".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("probability"));
        assert!(msg.contains("mean, median, quantile"));
    }

    #[test]
    fn test_invalid_alpha_display() {
        let err = PronosticoError::invalid_alpha(1.5);
        assert!(err.to_string().contains("alpha = 1.5"));
        assert!(err.to_string().contains("0 < alpha < 1"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = PronosticoError::length_mismatch("y", 10, 7);
        assert!(err.to_string().contains("y of length 10"));
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_from_str_and_string() {
        let a: PronosticoError = "boom".into();
        let b: PronosticoError = String::from("boom").into();
        assert_eq!(a.to_string(), "boom");
        assert_eq!(b.to_string(), "boom");
    }
}
