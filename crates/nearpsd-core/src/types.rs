//! Type definitions and aliases for PSD calibration.
//!
//! This module provides the scalar trait shared by every crate of the
//! workspace, the matrix aliases and the numerical constants used as
//! calibration defaults.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in calibration (f32 or f64).
///
/// This trait combines all the necessary numeric traits required by the
/// eigensolver and the projection loops.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default relative tolerance for the Dykstra convergence test.
    const DEFAULT_CONVERGENCE_TOLERANCE: Self;

    /// Default threshold below which eigenvalues are discarded.
    const DEFAULT_EIGENVALUE_TOLERANCE: Self;

    /// Relative tolerance used when deciding whether a matrix is symmetric.
    const SYMMETRY_RTOL: Self;

    /// Absolute tolerance used when deciding whether a matrix is symmetric.
    const SYMMETRY_ATOL: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    /// Looser than f64's 1e-6: the f32 eigensolver's rounding (~1e-7 relative) stalls a 1e-6 residual test.
    const DEFAULT_CONVERGENCE_TOLERANCE: Self = 1e-4;
    /// Looser than f64's 1e-5 so eigenvalues that are zero up to f32 rounding are still dropped.
    const DEFAULT_EIGENVALUE_TOLERANCE: Self = 1e-4;
    const SYMMETRY_RTOL: Self = 1e-5;
    const SYMMETRY_ATOL: Self = 1e-6;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_CONVERGENCE_TOLERANCE: Self = 1e-6;
    const DEFAULT_EIGENVALUE_TOLERANCE: Self = 1e-5;
    const SYMMETRY_RTOL: Self = 1e-5;
    const SYMMETRY_ATOL: Self = 1e-8;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get default Dykstra convergence tolerance.
    pub fn convergence_tolerance<T: Scalar>() -> T {
        T::DEFAULT_CONVERGENCE_TOLERANCE
    }

    /// Get default eigenvalue retention threshold.
    pub fn eigenvalue_tolerance<T: Scalar>() -> T {
        T::DEFAULT_EIGENVALUE_TOLERANCE
    }

    /// Tolerance below which triangle-inequality excesses are ignored.
    pub fn triangle_tolerance<T: Scalar>() -> T {
        <T as Scalar>::from_f64(1e-10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert!(f32::DEFAULT_CONVERGENCE_TOLERANCE > 0.0);
        assert!(f32::DEFAULT_EIGENVALUE_TOLERANCE > 0.0);
        assert!(f32::SYMMETRY_ATOL > 0.0);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert_eq!(f64::DEFAULT_CONVERGENCE_TOLERANCE, 1e-6);
        assert_eq!(f64::DEFAULT_EIGENVALUE_TOLERANCE, 1e-5);
    }

    #[test]
    fn test_scalar_conversions() {
        let val_f64 = 3.14159;
        let val_f32 = <f32 as Scalar>::from_f64(val_f64);
        assert_relative_eq!(val_f32 as f64, val_f64, epsilon = 1e-6);

        let back_f64 = Scalar::to_f64(val_f32);
        assert_relative_eq!(back_f64, val_f32 as f64);
        assert!(<f32 as Scalar>::try_from_f64(1.0).is_some());
    }

    #[test]
    fn test_constants() {
        assert!(constants::epsilon::<f64>() < constants::triangle_tolerance::<f64>());
        assert!(constants::triangle_tolerance::<f64>() < constants::convergence_tolerance::<f64>());
        assert!(constants::convergence_tolerance::<f64>() < constants::eigenvalue_tolerance::<f64>());
    }
}
