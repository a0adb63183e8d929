//! Error types for calibration operations.
//!
//! Every error is raised before an iterative loop starts. Once the Dykstra
//! loop is running nothing fails: numerical non-convergence is reported
//! through [`crate::result::TerminationReason`] instead.

use thiserror::Error;

/// Errors that can occur while preparing or running a calibration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// Input matrix cannot be calibrated.
    ///
    /// Raised for all-zero distance matrices (the kernel scale would divide
    /// by zero), non-finite entries and negative distances.
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// Description of why the input is degenerate
        reason: String,
    },

    /// Invalid calibration configuration.
    ///
    /// This error occurs when a calibrator is configured with invalid
    /// parameters (e.g. non-positive `mu`, empty box, zero iteration budget).
    #[error("Invalid calibration configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Dimension mismatch between matrices.
    ///
    /// This error occurs for non-square or empty inputs and for refiner
    /// inputs whose shapes disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },
}

impl CalibrationError {
    /// Create a DegenerateInput error with a custom reason.
    pub fn degenerate_input<S: Into<String>>(reason: S) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for calibration operations.
pub type Result<T> = std::result::Result<T, CalibrationError>;
