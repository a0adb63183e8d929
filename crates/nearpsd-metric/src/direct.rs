//! Nearest PSD matrix under box and diagonal constraints.
//!
//! The direct calibrator runs the Dykstra loop on the matrix itself. With
//! the default parameters it returns the nearest correlation-like matrix:
//! positive semi-definite, unit diagonal, entries in `[0, 1]`.

use log::debug;
use nearpsd_core::{
    config::CalibrationConfig,
    error::Result,
    numerical::{is_symmetric, symmetrized, validate_finite, validate_square},
    result::CalibrationResult,
    types::{DMatrix, Scalar},
};
use nearpsd_projection::DykstraCalibrationLoop;

/// Nearest PSD matrix to `a` with entries in `[low, high]` and diagonal
/// fixed to `diagonal`.
///
/// Uses the default convergence tolerance (`1e-6` for `f64`) and eigenvalue
/// threshold (`1e-5`). See [`nearpsd_with_config`] for full control and the
/// convergence diagnostics.
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use nearpsd_metric::nearpsd;
///
/// let a = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
/// let x = nearpsd(&a, 100, 0.0, 1.0, 1.0)?;
/// assert!((x[(0, 1)] - 1.0).abs() < 1e-12);
/// # Ok::<(), nearpsd_core::CalibrationError>(())
/// ```
pub fn nearpsd<T: Scalar>(
    a: &DMatrix<T>,
    max_iterations: usize,
    low: T,
    high: T,
    diagonal: T,
) -> Result<DMatrix<T>> {
    let config = CalibrationConfig::new()
        .with_bounds(low, high)
        .with_diagonal(diagonal)
        .with_max_iterations(max_iterations);
    nearpsd_with_config(a, &config).map(CalibrationResult::into_matrix)
}

/// Calibrate `a` with an explicit configuration and return the full result.
///
/// The configuration and the input are validated before the loop starts.
/// An input that is not approximately symmetric is replaced by
/// `(A + Aᵗ) / 2`.
pub fn nearpsd_with_config<T: Scalar>(
    a: &DMatrix<T>,
    config: &CalibrationConfig<T>,
) -> Result<CalibrationResult<T>> {
    config.validate()?;
    let n = validate_square(a)?;
    validate_finite(a)?;

    let result = if is_symmetric(a, T::SYMMETRY_RTOL, T::SYMMETRY_ATOL) {
        DykstraCalibrationLoop::new(config.clone()).calibrate(a)
    } else {
        debug!("nearpsd: input of order {n} is not symmetric, averaging with its transpose");
        DykstraCalibrationLoop::new(config.clone()).calibrate(&symmetrized(a))
    };
    debug!(
        "nearpsd: {} iterations, {:?}",
        result.iterations, result.termination_reason
    );
    Ok(result)
}
