//! Kernel-space calibration of distance matrices.
//!
//! A distance matrix `D` is mapped to the Laplace kernel
//! `K = exp(gamma * D)` with `gamma = -mu / max(D)`, so every kernel entry
//! lies in `[exp(-mu), 1]`. The Dykstra loop makes `K` positive
//! semi-definite under those bounds with a unit diagonal, and the result is
//! mapped back with `ln(K) / gamma`.

use log::{debug, info};
use nearpsd_core::{
    config::KernelConfig,
    error::Result,
    numerical::{fill_diagonal, symmetrize, validate_distance_matrix},
    result::TerminationReason,
    types::{DMatrix, Scalar},
};
use nearpsd_projection::DykstraCalibrationLoop;
use num_traits::Float;

/// Calibrated distances together with the diagnostics of the Dykstra run.
#[derive(Debug, Clone)]
pub struct KernelProjection<T: Scalar> {
    /// Symmetric distance matrix with zero diagonal whose kernel is PSD
    pub distances: DMatrix<T>,
    /// Dykstra iterations performed
    pub iterations: usize,
    /// Final relative residual of the Dykstra loop
    pub residual: T,
    /// Why the Dykstra loop stopped
    pub termination_reason: TerminationReason,
}

impl<T: Scalar> KernelProjection<T> {
    /// Whether the Dykstra loop met its tolerance before the budget ran out.
    pub fn converged(&self) -> bool {
        self.termination_reason.is_converged()
    }
}

/// Calibrate a distance matrix so that its Laplace kernel is PSD.
///
/// # Arguments
///
/// * `d` - Pairwise distance matrix: square, finite, nonnegative, not all zero
/// * `mu` - Kernel sharpness; the largest distance maps to `exp(-mu)`
/// * `max_iterations` - Dykstra iteration budget
/// * `convergence_tolerance` - Relative residual at which the loop stops
/// * `eigenvalue_tolerance` - Eigenvalues at or below this are discarded
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use nearpsd_metric::project_to_kernel;
///
/// let d = DMatrix::<f64>::from_row_slice(3, 3, &[
///     0.0, 1.0, 5.0,
///     1.0, 0.0, 1.0,
///     5.0, 1.0, 0.0,
/// ]);
/// let calibrated = project_to_kernel(&d, 1.0, 100, 1e-6, 1e-5)?;
/// assert_eq!(calibrated, calibrated.transpose());
/// assert_eq!(calibrated[(1, 1)], 0.0);
/// # Ok::<(), nearpsd_core::CalibrationError>(())
/// ```
pub fn project_to_kernel<T: Scalar>(
    d: &DMatrix<T>,
    mu: T,
    max_iterations: usize,
    convergence_tolerance: T,
    eigenvalue_tolerance: T,
) -> Result<DMatrix<T>> {
    let config = KernelConfig::new()
        .with_mu(mu)
        .with_max_iterations(max_iterations)
        .with_convergence_tolerance(convergence_tolerance)
        .with_eigenvalue_tolerance(eigenvalue_tolerance);
    project_to_kernel_with_config(d, &config).map(|projection| projection.distances)
}

/// Calibrate a distance matrix and return the Dykstra diagnostics as well.
pub fn project_to_kernel_with_config<T: Scalar>(
    d: &DMatrix<T>,
    config: &KernelConfig<T>,
) -> Result<KernelProjection<T>> {
    config.validate()?;
    let max_distance = validate_distance_matrix(d)?;

    let gamma = -config.mu / max_distance;
    let mut kernel = d.map(|x| <T as Float>::exp(gamma * x));
    symmetrize(&mut kernel);
    debug!(
        "kernel calibration: n = {}, gamma = {:e}, floor = {:e}",
        d.nrows(),
        Scalar::to_f64(gamma),
        Scalar::to_f64(config.kernel_floor())
    );

    let result = DykstraCalibrationLoop::new(config.calibration_config()).calibrate(&kernel);
    info!(
        "kernel calibration finished after {} iterations ({:?})",
        result.iterations, result.termination_reason
    );

    // Entries are clipped to [exp(-mu), 1], so the logarithm is finite.
    let mut distances = result.matrix.map(|y| <T as Float>::ln(y) / gamma);
    fill_diagonal(&mut distances, T::zero());
    symmetrize(&mut distances);

    Ok(KernelProjection {
        distances,
        iterations: result.iterations,
        residual: result.residual,
        termination_reason: result.termination_reason,
    })
}
