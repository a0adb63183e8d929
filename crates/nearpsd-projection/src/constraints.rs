//! Constraint projectors applied between PSD projections.
//!
//! The Dykstra loop alternates the PSD projection with a caller-supplied
//! projection onto a second convex set. The reference set is the box
//! `[low, high]` intersected with a fixed diagonal.

use nearpsd_core::{
    config::CalibrationConfig,
    numerical::{clip, fill_diagonal},
    types::{DMatrix, Scalar},
};
use num_traits::Float;

/// Projection onto the second convex set of an alternating-projection loop.
///
/// Implementations must preserve symmetry: a symmetric input must produce a
/// symmetric output.
pub trait ConstraintProjector<T: Scalar> {
    /// Project `mat` onto the constraint set in place.
    fn project_in_place(&self, mat: &mut DMatrix<T>);

    /// Check whether `mat` satisfies the constraints up to `tol`.
    fn is_satisfied(&self, mat: &DMatrix<T>, tol: T) -> bool;
}

/// Fixed diagonal followed by an entrywise clip to `[low, high]`.
///
/// The clip runs after the diagonal fill, so a diagonal value outside the box
/// ends up clipped as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxDiagonalProjector<T> {
    low: T,
    high: T,
    diagonal: T,
}

impl<T: Scalar> BoxDiagonalProjector<T> {
    /// Create a projector for the box `[low, high]` and diagonal `diagonal`.
    pub fn new(low: T, high: T, diagonal: T) -> Self {
        Self {
            low,
            high,
            diagonal,
        }
    }

    /// Take the box and diagonal from a calibration configuration.
    pub fn from_config(config: &CalibrationConfig<T>) -> Self {
        Self::new(config.low, config.high, config.diagonal)
    }

    /// Lower bound.
    pub fn low(&self) -> T {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> T {
        self.high
    }

    /// Value written on the diagonal before clipping.
    pub fn diagonal(&self) -> T {
        self.diagonal
    }
}

impl<T: Scalar> ConstraintProjector<T> for BoxDiagonalProjector<T> {
    fn project_in_place(&self, mat: &mut DMatrix<T>) {
        fill_diagonal(mat, self.diagonal);
        clip(mat, self.low, self.high);
    }

    fn is_satisfied(&self, mat: &DMatrix<T>, tol: T) -> bool {
        let expected_diag = <T as Float>::min(<T as Float>::max(self.diagonal, self.low), self.high);
        let in_box = mat
            .iter()
            .all(|&x| x >= self.low - tol && x <= self.high + tol);
        let diag_ok = mat
            .diagonal()
            .iter()
            .all(|&x| Float::abs(x - expected_diag) <= tol);
        in_box && diag_ok
    }
}
