//! Metric refinement seam of the pipeline.
//!
//! The pipeline only needs two operations from a refiner: a cheap
//! improvement pass that pulls a warm start towards the triangle
//! inequalities, and an alternating projection that enforces them. Keeping
//! them behind a trait lets the calibration stages be exercised with stub
//! refiners and lets callers plug in faster implementations.

use nearpsd_core::{
    error::Result,
    types::{DMatrix, Scalar},
};
use std::fmt::Debug;

/// Refines a warm-started distance matrix towards a metric.
///
/// Both operations take the warm start and the original dissimilarities,
/// leave the inputs untouched and return a new matrix of the same shape.
/// Implementations report shape problems as
/// [`CalibrationError::DimensionMismatch`](nearpsd_core::CalibrationError::DimensionMismatch).
pub trait MetricRefiner<T: Scalar>: Debug {
    /// Returns the name of the refiner.
    fn name(&self) -> &str;

    /// Run `n_improve` heuristic sweeps starting from `kernel_projected`.
    fn heuristic_improve(
        &self,
        kernel_projected: &DMatrix<T>,
        original: &DMatrix<T>,
        n_improve: usize,
    ) -> Result<DMatrix<T>>;

    /// Run `n_projection` projection sweeps anchored at `original`.
    fn hlwb_projection(
        &self,
        warm_start: &DMatrix<T>,
        original: &DMatrix<T>,
        n_projection: usize,
    ) -> Result<DMatrix<T>>;
}
