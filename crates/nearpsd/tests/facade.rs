//! Integration tests for the facade crate.
//!
//! These tests only use the prelude, as a downstream user would.

use approx::assert_relative_eq;
use nearpsd::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_prelude_covers_the_workflow() {
    let config = CalibrationConfig::<f64>::new().with_max_iterations(200);
    assert!(config.validate().is_ok());

    let a = DMatrix::from_row_slice(3, 3, &[
        1.0, 0.9, 0.1,
        0.9, 1.0, 0.9,
        0.1, 0.9, 1.0,
    ]);
    let result = DykstraCalibrationLoop::new(config.clone()).calibrate(&a);
    let direct = nearpsd_with_config(&a, &config).unwrap();
    assert_relative_eq!(result.matrix, direct.matrix, epsilon = 1e-12);
    assert!(BoxDiagonalProjector::from_config(&config).is_satisfied(&direct.matrix, 0.0));
    assert!(min_eigenvalue(&direct.matrix) >= -1e-3);
}

#[test]
fn test_pipeline_with_reference_refiner() {
    let d = DMatrix::from_row_slice(4, 4, &[
        0.0, 1.0, 2.0, 6.0,
        1.0, 0.0, 1.0, 2.0,
        2.0, 1.0, 0.0, 1.0,
        6.0, 2.0, 1.0, 0.0,
    ]);
    let outcome = hlwb_algorithm_with(&d, &PipelineConfig::default(), &HlwbRefiner::new()).unwrap();

    assert!(outcome.warm_start.iterations <= 10);
    assert_eq!(outcome.distances, outcome.distances.transpose());
    assert!(max_triangle_violation(&outcome.distances) < max_triangle_violation(&d));
}

#[test]
fn test_version() {
    assert!(!nearpsd::VERSION.is_empty());
}
