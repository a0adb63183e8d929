//! Results of a calibration run.
//!
//! Calibration loops never fail once started: they always return their best
//! iterate within the iteration budget. Whether that iterate met the
//! convergence test is recorded here so callers that need a stricter
//! guarantee can inspect it.

use crate::types::{DMatrix, Scalar};
use std::time::Duration;

/// Why a calibration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Relative change `||Y - X||_∞ / ||Y||_∞` fell below the tolerance
    Converged,
    /// The pre-projection iterate was the zero matrix, so the relative
    /// change is undefined; the loop is treated as converged
    ZeroIterate,
    /// Iteration budget exhausted before the convergence test passed
    MaxIterations,
}

impl TerminationReason {
    /// True for the reasons that count as convergence.
    pub fn is_converged(self) -> bool {
        matches!(self, Self::Converged | Self::ZeroIterate)
    }
}

/// Outcome of a Dykstra calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationResult<T>
where
    T: Scalar,
{
    /// Calibrated matrix; exactly symmetric and exactly inside the box/diagonal constraints
    pub matrix: DMatrix<T>,

    /// Number of PSD projections performed
    pub iterations: usize,

    /// Relative infinity-norm change measured on the last iteration
    pub residual: T,

    /// Reason the loop stopped
    pub termination_reason: TerminationReason,

    /// True if the convergence test passed
    pub converged: bool,

    /// Wall-clock time spent in the loop
    pub duration: Duration,
}

impl<T> CalibrationResult<T>
where
    T: Scalar,
{
    /// Creates a new calibration result.
    pub fn new(
        matrix: DMatrix<T>,
        iterations: usize,
        residual: T,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        Self {
            matrix,
            iterations,
            residual,
            termination_reason,
            converged: termination_reason.is_converged(),
            duration,
        }
    }

    /// Consume the result and keep only the matrix.
    pub fn into_matrix(self) -> DMatrix<T> {
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converged_flag_follows_reason() {
        let m = DMatrix::<f64>::identity(2, 2);
        let result = CalibrationResult::new(
            m.clone(),
            3,
            1e-9,
            Duration::ZERO,
            TerminationReason::Converged,
        );
        assert!(result.converged);
        assert_eq!(result.iterations, 3);

        let result = CalibrationResult::new(
            m.clone(),
            100,
            0.2,
            Duration::ZERO,
            TerminationReason::MaxIterations,
        );
        assert!(!result.converged);
        assert_eq!(result.into_matrix(), m);

        assert!(TerminationReason::ZeroIterate.is_converged());
    }
}
