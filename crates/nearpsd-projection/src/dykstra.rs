//! Dykstra alternating projections between the PSD cone and a constraint set.
//!
//! Plain alternating projection only finds *some* point near both sets.
//! Dykstra's variant carries a correction term `U` that records how far the
//! PSD projection moved the previous point; subtracting it before the next
//! projection makes the iterates converge to the nearest point of the
//! intersection.
//!
//! # Algorithm
//!
//! ```text
//! Y ← (Y₀ + Y₀ᵗ) / 2,  U ← 0
//! loop
//!     T ← Y − U
//!     X ← P_psd(T)
//!     U ← X − T
//!     stop if ‖Y − X‖_∞ / ‖Y‖_∞ ≤ tol  or  iterations ≥ max_iterations
//!     Y ← P_box(X)
//! return P_box(X)
//! ```
//!
//! The convergence test compares the PSD-projected `X` with the
//! pre-projection `Y`, not with the previous constrained iterate.

use std::time::Instant;

use log::debug;
use nearpsd_core::{
    config::CalibrationConfig,
    numerical::{infinity_norm, infinity_norm_of_difference, symmetrize},
    result::{CalibrationResult, TerminationReason},
    types::{DMatrix, Scalar},
};

use crate::{
    constraints::{BoxDiagonalProjector, ConstraintProjector},
    psd_cone::EigenPSDProjector,
};

/// Buffers of one Dykstra run, allocated once and reused every iteration.
#[derive(Debug, Clone)]
pub struct DykstraWorkspace<T: Scalar> {
    /// Current pre-projection iterate `Y`
    y: DMatrix<T>,
    /// Correction term `U`
    u: DMatrix<T>,
    /// Shifted point `T = Y - U`
    t: DMatrix<T>,
    /// PSD projection `X`
    x: DMatrix<T>,
}

impl<T: Scalar> DykstraWorkspace<T> {
    /// Create a workspace for `n × n` matrices.
    pub fn new(n: usize) -> Self {
        Self {
            y: DMatrix::zeros(n, n),
            u: DMatrix::zeros(n, n),
            t: DMatrix::zeros(n, n),
            x: DMatrix::zeros(n, n),
        }
    }

    /// Load a new starting point: `Y = (Y₀ + Y₀ᵗ) / 2` and `U = 0`.
    fn reset(&mut self, y0: &DMatrix<T>) {
        let n = y0.nrows();
        if self.y.shape() != (n, n) {
            *self = Self::new(n);
        }
        self.y.copy_from(y0);
        symmetrize(&mut self.y);
        self.u.fill(T::zero());
    }

    /// Order of the matrices held by this workspace.
    pub fn size(&self) -> usize {
        self.y.nrows()
    }
}

/// Dykstra calibration loop alternating [`EigenPSDProjector`] with a
/// constraint projection.
///
/// # Example
///
/// ```
/// use nalgebra::DMatrix;
/// use nearpsd_core::config::CalibrationConfig;
/// use nearpsd_projection::DykstraCalibrationLoop;
///
/// let a = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
/// let result = DykstraCalibrationLoop::new(CalibrationConfig::default()).calibrate(&a);
///
/// assert!(result.converged);
/// assert_eq!(result.matrix[(0, 0)], 1.0);
/// assert!((result.matrix[(0, 1)] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DykstraCalibrationLoop<T: Scalar> {
    config: CalibrationConfig<T>,
    psd: EigenPSDProjector<T>,
}

impl<T: Scalar> DykstraCalibrationLoop<T> {
    /// Create a loop for the given configuration.
    ///
    /// The configuration is not validated here; the loop accepts any
    /// values and treats `max_iterations == 0` like `1`.
    pub fn new(config: CalibrationConfig<T>) -> Self {
        let psd = EigenPSDProjector::new(config.eigenvalue_tolerance);
        Self { config, psd }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CalibrationConfig<T> {
        &self.config
    }

    /// Calibrate against the box/diagonal constraints of the configuration.
    pub fn calibrate(&self, y0: &DMatrix<T>) -> CalibrationResult<T> {
        let constraint = BoxDiagonalProjector::from_config(&self.config);
        self.calibrate_with(y0, &constraint)
    }

    /// Calibrate against a caller-supplied constraint projection.
    pub fn calibrate_with<C>(&self, y0: &DMatrix<T>, constraint: &C) -> CalibrationResult<T>
    where
        C: ConstraintProjector<T> + ?Sized,
    {
        let mut workspace = DykstraWorkspace::new(y0.nrows());
        self.calibrate_in(y0, constraint, &mut workspace)
    }

    /// Calibrate using an existing workspace.
    ///
    /// `y0` must be square. It is symmetrized before the first projection.
    pub fn calibrate_in<C>(
        &self,
        y0: &DMatrix<T>,
        constraint: &C,
        workspace: &mut DykstraWorkspace<T>,
    ) -> CalibrationResult<T>
    where
        C: ConstraintProjector<T> + ?Sized,
    {
        debug_assert_eq!(y0.nrows(), y0.ncols(), "Dykstra input must be square");

        let start = Instant::now();
        let max_iterations = self.config.max_iterations.max(1);
        let tol = self.config.convergence_tolerance;

        workspace.reset(y0);
        let DykstraWorkspace { y, u, t, x } = workspace;

        let mut iterations = 0;
        let mut residual;
        let termination_reason = loop {
            t.copy_from(&*y);
            *t -= &*u;

            let kept = self.psd.project_into(&*t, &mut *x);

            u.copy_from(&*x);
            *u -= &*t;

            iterations += 1;

            let y_norm = infinity_norm(&*y);
            if y_norm == T::zero() {
                residual = T::zero();
                break TerminationReason::ZeroIterate;
            }
            residual = infinity_norm_of_difference(&*y, &*x) / y_norm;

            debug!(
                "dykstra iteration {}: residual = {:e}, kept eigenpairs = {}",
                iterations,
                Scalar::to_f64(residual),
                kept
            );

            if residual <= tol {
                break TerminationReason::Converged;
            }
            if iterations >= max_iterations {
                break TerminationReason::MaxIterations;
            }

            y.copy_from(&*x);
            constraint.project_in_place(&mut *y);
        };

        let mut matrix = (*x).clone();
        constraint.project_in_place(&mut matrix);

        debug!(
            "dykstra stopped after {} iterations ({:?}), residual = {:e}",
            iterations,
            termination_reason,
            Scalar::to_f64(residual)
        );

        CalibrationResult::new(
            matrix,
            iterations,
            residual,
            start.elapsed(),
            termination_reason,
        )
    }
}

/// Shorthand for `DykstraCalibrationLoop::new(config.clone()).calibrate(y0)`.
pub fn calibrate<T: Scalar>(y0: &DMatrix<T>, config: &CalibrationConfig<T>) -> CalibrationResult<T> {
    DykstraCalibrationLoop::new(config.clone()).calibrate(y0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn init() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    #[test]
    fn test_indefinite_two_by_two() {
        init();
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
        let result = calibrate(&a, &CalibrationConfig::default());

        assert!(result.converged);
        assert!(result.iterations <= 2);
        assert_relative_eq!(result.matrix, DMatrix::from_element(2, 2, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_single_iteration_budget() {
        init();
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);

        for max_iterations in [0, 1] {
            let config = CalibrationConfig::default().with_max_iterations(max_iterations);
            let result = calibrate(&a, &config);

            assert_eq!(result.iterations, 1);
            assert_eq!(result.termination_reason, TerminationReason::MaxIterations);
            // PSD projection is 1.25 everywhere; the clip brings it back to the box.
            assert_eq!(result.matrix, DMatrix::from_element(2, 2, 1.0));
        }
    }

    #[test]
    fn test_feasible_psd_input_is_fixed_point() {
        init();
        let a = DMatrix::from_row_slice(3, 3, &[
            1.0, 0.5, 0.2,
            0.5, 1.0, 0.3,
            0.2, 0.3, 1.0,
        ]);
        let result = calibrate(&a, &CalibrationConfig::default());

        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination_reason, TerminationReason::Converged);
        assert_relative_eq!(result.matrix, a, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_iterate_is_converged() {
        init();
        let zero = DMatrix::<f64>::zeros(3, 3);
        let result = calibrate(&zero, &CalibrationConfig::default());

        assert_eq!(result.termination_reason, TerminationReason::ZeroIterate);
        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        // Final constraint re-application still fixes the diagonal.
        assert_eq!(result.matrix, DMatrix::identity(3, 3));
    }

    #[test]
    fn test_empty_input_is_zero_iterate() {
        let empty = DMatrix::<f64>::zeros(0, 0);
        let result = calibrate(&empty, &CalibrationConfig::default());

        assert_eq!(result.termination_reason, TerminationReason::ZeroIterate);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.matrix.shape(), (0, 0));
    }

    #[test]
    fn test_non_symmetric_input_is_symmetrized() {
        init();
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.2, 0.6, 1.0]);
        let b = DMatrix::from_row_slice(2, 2, &[1.0, 0.4, 0.4, 1.0]);

        let ra = calibrate(&a, &CalibrationConfig::default());
        let rb = calibrate(&b, &CalibrationConfig::default());
        assert_relative_eq!(ra.matrix, rb.matrix, epsilon = 1e-12);
        assert_eq!(ra.matrix, ra.matrix.transpose());
    }

    #[test]
    fn test_custom_constraint_projector() {
        struct DiagonalOnly;

        impl ConstraintProjector<f64> for DiagonalOnly {
            fn project_in_place(&self, mat: &mut DMatrix<f64>) {
                mat.fill_diagonal(1.0);
            }

            fn is_satisfied(&self, mat: &DMatrix<f64>, tol: f64) -> bool {
                mat.diagonal().iter().all(|&x| (x - 1.0).abs() <= tol)
            }
        }

        init();
        let a = DMatrix::from_row_slice(3, 3, &[
            1.0, 0.9, -0.9,
            0.9, 1.0, 0.9,
            -0.9, 0.9, 1.0,
        ]);
        let config = CalibrationConfig::default().with_max_iterations(500);
        let result = DykstraCalibrationLoop::new(config).calibrate_with(&a, &DiagonalOnly);

        assert!(DiagonalOnly.is_satisfied(&result.matrix, 0.0));
        assert!(EigenPSDProjector::is_psd(&result.matrix, 1e-3));
        // Negative off-diagonal survives: only the diagonal is constrained.
        assert!(result.matrix[(0, 2)] < 0.0);
    }

    #[test]
    fn test_workspace_is_reused_across_runs() {
        let loop_ = DykstraCalibrationLoop::new(CalibrationConfig::<f64>::default());
        let constraint = BoxDiagonalProjector::from_config(loop_.config());
        let mut workspace = DykstraWorkspace::new(2);

        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
        let first = loop_.calibrate_in(&a, &constraint, &mut workspace);
        let second = loop_.calibrate_in(&a, &constraint, &mut workspace);
        assert_eq!(first.matrix, second.matrix);
        assert_eq!(first.iterations, second.iterations);

        let b = DMatrix::<f64>::identity(3, 3);
        let third = loop_.calibrate_in(&b, &constraint, &mut workspace);
        assert_eq!(workspace.size(), 3);
        assert_relative_eq!(third.matrix, b, epsilon = 1e-12);
    }
}
