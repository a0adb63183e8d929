//! Property tests for the PSD projection and the Dykstra loop.

use nalgebra::DMatrix;
use nearpsd_core::{
    config::CalibrationConfig,
    numerical::min_eigenvalue,
    test_utils::random_symmetric,
};
use nearpsd_projection::{
    calibrate, BoxDiagonalProjector, ConstraintProjector, EigenPSDProjector,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn symmetric_from_seed(n: usize, seed: u64) -> DMatrix<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_symmetric(n, &mut rng)
}

proptest! {
    #[test]
    fn test_psd_projection_has_no_negative_eigenvalues(n in 1usize..8, seed in any::<u64>()) {
        let tol = 1e-5;
        let mat = symmetric_from_seed(n, seed);
        let projected = EigenPSDProjector::new(tol).project(&mat);

        prop_assert_eq!(&projected, &projected.transpose());
        prop_assert!(min_eigenvalue(&projected) >= -tol);
    }

    #[test]
    fn test_psd_projection_is_idempotent(n in 1usize..8, seed in any::<u64>()) {
        let projector = EigenPSDProjector::new(1e-8);
        let once = projector.project(&symmetric_from_seed(n, seed));
        let twice = projector.project(&once);

        let scale = once.amax().max(1.0);
        prop_assert!((&once - &twice).amax() <= 1e-6 * scale);
    }

    #[test]
    fn test_calibration_output_satisfies_box_and_diagonal(
        n in 1usize..7,
        seed in any::<u64>(),
        max_iterations in 0usize..20,
    ) {
        let config = CalibrationConfig::default().with_max_iterations(max_iterations);
        let result = calibrate(&symmetric_from_seed(n, seed), &config);

        let constraint = BoxDiagonalProjector::from_config(&config);
        prop_assert!(constraint.is_satisfied(&result.matrix, 0.0));
        prop_assert_eq!(&result.matrix, &result.matrix.transpose());
        prop_assert!(result.iterations >= 1);
        prop_assert!(result.iterations <= max_iterations.max(1));
    }
}

#[test]
fn test_converged_calibration_is_nearly_psd() {
    // A PSD starting point scaled into the box is feasible, so the loop must
    // converge and stay on the cone.
    let mut rng = StdRng::seed_from_u64(11);
    let n = 6;
    let mut mat = nearpsd_core::test_utils::random_psd(n, &mut rng);
    let d = mat.diagonal().map(|x: f64| 1.0 / x.sqrt());
    for i in 0..n {
        for j in 0..n {
            mat[(i, j)] *= d[i] * d[j];
        }
    }
    // Correlation matrix with off-diagonals in [-1, 1]; shift into [0, 1].
    let shifted = mat.map(|x| 0.5 * (x + 1.0));

    let config = CalibrationConfig::default().with_max_iterations(1000);
    let result = calibrate(&shifted, &config);

    assert!(result.converged, "stopped with {:?}", result.termination_reason);
    assert!(min_eigenvalue(&result.matrix) >= -1e-4);
}
