//! Metric-nearness pipeline.
//!
//! The pipeline chains three stages:
//!
//! 1. a short kernel calibration of `D` that serves as a warm start,
//! 2. the refiner's heuristic improvement of that warm start,
//! 3. the refiner's HLWB projection anchored at the original `D`,
//!
//! and post-processes the result to be exactly symmetric with a zero
//! diagonal.

use std::time::{Duration, Instant};

use log::{info, log_enabled, Level};
use nearpsd_core::{
    config::PipelineConfig,
    error::{CalibrationError, Result},
    numerical::{fill_diagonal, symmetrize},
    types::{constants, DMatrix, Scalar},
};

use crate::{
    diagnostics::triangle_violations,
    hlwb::HlwbRefiner,
    kernel::{project_to_kernel_with_config, KernelProjection},
    refiner::MetricRefiner,
};

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome<T: Scalar> {
    /// Refined distance matrix: symmetric with a zero diagonal
    pub distances: DMatrix<T>,
    /// The kernel calibration used as warm start
    pub warm_start: KernelProjection<T>,
    /// Wall-clock time of the whole run
    pub duration: Duration,
}

/// Solve the metric-nearness problem for `d` with the reference refiner.
///
/// Uses a 10-iteration kernel warm start with `mu = 1`, a single heuristic
/// sweep and `n_projection` HLWB sweeps.
pub fn hlwb_algorithm<T: Scalar>(d: &DMatrix<T>, n_projection: usize) -> Result<DMatrix<T>> {
    let config = PipelineConfig::default().with_n_projection(n_projection);
    hlwb_algorithm_with(d, &config, &HlwbRefiner::new()).map(|outcome| outcome.distances)
}

/// Run the pipeline with an explicit configuration and refiner.
pub fn hlwb_algorithm_with<T, R>(
    d: &DMatrix<T>,
    config: &PipelineConfig<T>,
    refiner: &R,
) -> Result<PipelineOutcome<T>>
where
    T: Scalar,
    R: MetricRefiner<T> + ?Sized,
{
    let start = Instant::now();
    config.validate()?;

    let warm_start = project_to_kernel_with_config(d, &config.kernel)?;
    info!(
        "pipeline: kernel warm start took {} iterations, refining with {}",
        warm_start.iterations,
        refiner.name()
    );

    let improved = refiner.heuristic_improve(&warm_start.distances, d, config.n_improve)?;
    check_refiner_output(&improved, d)?;

    let mut distances = refiner.hlwb_projection(&improved, d, config.n_projection)?;
    check_refiner_output(&distances, d)?;

    symmetrize(&mut distances);
    fill_diagonal(&mut distances, T::zero());

    if log_enabled!(Level::Info) {
        info!(
            "pipeline: finished in {:?}, {} triangle violations remain",
            start.elapsed(),
            triangle_violations(&distances, constants::triangle_tolerance())
        );
    }

    Ok(PipelineOutcome {
        distances,
        warm_start,
        duration: start.elapsed(),
    })
}

fn check_refiner_output<T: Scalar>(output: &DMatrix<T>, d: &DMatrix<T>) -> Result<()> {
    if output.shape() != d.shape() {
        return Err(CalibrationError::dimension_mismatch(
            format!("{}x{} refiner output", d.nrows(), d.ncols()),
            format!("{}x{}", output.nrows(), output.ncols()),
        ));
    }
    Ok(())
}
