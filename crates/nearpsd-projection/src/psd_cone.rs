//! Projection onto the positive semi-definite cone.
//!
//! The Frobenius-nearest PSD matrix to a symmetric matrix is obtained by
//! keeping only the non-negative part of its spectrum.

use num_traits::Float;

use nearpsd_core::{
    numerical::{is_symmetric, symmetrize},
    types::{DMatrix, Scalar},
};

/// Eigenvalue-thresholding projector onto the PSD cone S^n_+.
///
/// # Mathematical Definition
///
/// For a symmetric `T = V diag(λ) Vᵗ` the projection is
/// ```text
/// X = Σ_{λ_k > tol} λ_k v_k v_kᵗ
/// ```
///
/// Eigenpairs with `λ_k <= tol` are treated as noise and dropped, not merely
/// clamped. When no eigenvalue survives the result is the zero matrix.
///
/// The input must be symmetric; callers symmetrize with `(A + Aᵗ) / 2` first.
#[derive(Debug, Clone, Copy)]
pub struct EigenPSDProjector<T> {
    eigenvalue_tolerance: T,
}

impl<T: Scalar> Default for EigenPSDProjector<T> {
    fn default() -> Self {
        Self::new(T::DEFAULT_EIGENVALUE_TOLERANCE)
    }
}

impl<T: Scalar> EigenPSDProjector<T> {
    /// Create a projector that discards eigenvalues `<= eigenvalue_tolerance`.
    pub fn new(eigenvalue_tolerance: T) -> Self {
        Self {
            eigenvalue_tolerance,
        }
    }

    /// Get the eigenvalue retention threshold.
    pub fn eigenvalue_tolerance(&self) -> T {
        self.eigenvalue_tolerance
    }

    /// Project a symmetric matrix onto the PSD cone.
    pub fn project(&self, mat: &DMatrix<T>) -> DMatrix<T> {
        let n = mat.nrows();
        let mut out = DMatrix::zeros(n, n);
        self.project_into(mat, &mut out);
        out
    }

    /// Project into a caller-owned buffer and return the number of
    /// eigenpairs kept.
    ///
    /// `out` is resized if its shape differs from `mat`; otherwise it is
    /// overwritten without reallocation.
    pub fn project_into(&self, mat: &DMatrix<T>, out: &mut DMatrix<T>) -> usize {
        let n = mat.nrows();
        if out.shape() == (n, n) {
            out.fill(T::zero());
        } else {
            *out = DMatrix::zeros(n, n);
        }
        if n == 0 {
            return 0;
        }

        let eigen = mat.clone().symmetric_eigen();
        let mut kept = 0;
        for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
            if lambda > self.eigenvalue_tolerance {
                let v = eigen.eigenvectors.column(k);
                out.ger(lambda, &v, &v, T::one());
                kept += 1;
            }
        }

        // Rank-one updates accumulate rounding differently above and below the diagonal.
        symmetrize(out);
        kept
    }

    /// Check if a matrix is symmetric and has no eigenvalue below `-tol`.
    pub fn is_psd(mat: &DMatrix<T>, tol: T) -> bool {
        if !is_symmetric(mat, T::zero(), tol) {
            return false;
        }
        if mat.shape() == (0, 0) {
            return true;
        }
        let eigenvalues = mat.clone().symmetric_eigenvalues();
        eigenvalues.iter().all(|&lambda| lambda >= -tol)
    }

    /// Frobenius distance from `mat` to its projection.
    pub fn distance_to_cone(&self, mat: &DMatrix<T>) -> T {
        let projected = self.project(mat);
        let diff: DMatrix<T> = mat - projected;
        Float::sqrt(diff.iter().fold(T::zero(), |acc, &x| acc + x * x))
    }
}

/// Shorthand for `EigenPSDProjector::new(tol).project(mat)`.
pub fn project_psd<T: Scalar>(mat: &DMatrix<T>, eigenvalue_tolerance: T) -> DMatrix<T> {
    EigenPSDProjector::new(eigenvalue_tolerance).project(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nearpsd_core::numerical::min_eigenvalue;

    fn create_test_projector() -> EigenPSDProjector<f64> {
        EigenPSDProjector::new(1e-5)
    }

    #[test]
    fn test_projection_of_indefinite_matrix() {
        let projector = create_test_projector();

        // Eigenvalues {2.5, -0.5} with eigenvectors (1, 1)/√2 and (1, -1)/√2
        let mat = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
        let projected = projector.project(&mat);

        for i in 0..2 {
            for j in 0..2 {
                assert_relative_eq!(projected[(i, j)], 1.25, epsilon = 1e-12);
            }
        }
        assert!(EigenPSDProjector::is_psd(&projected, 1e-10));
    }

    #[test]
    fn test_projection_drops_small_eigenvalues() {
        let projector = EigenPSDProjector::new(0.5);
        let mat = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![2.0, 0.4, -1.0]));

        let mut out = DMatrix::zeros(3, 3);
        let kept = projector.project_into(&mat, &mut out);

        assert_eq!(kept, 1);
        assert_relative_eq!(out[(0, 0)], 2.0, epsilon = 1e-12);
        assert_relative_eq!(out[(1, 1)], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[(2, 2)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_definite_projects_to_zero() {
        let projector = create_test_projector();
        let mat = DMatrix::from_row_slice(3, 3, &[
            -1.0, 0.2, 0.0,
            0.2, -2.0, 0.1,
            0.0, 0.1, -0.5,
        ]);

        let projected = projector.project(&mat);
        assert!(projected.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_projection_resizes_buffer() {
        let projector = create_test_projector();
        let mat = DMatrix::<f64>::identity(3, 3);

        let mut out = DMatrix::zeros(1, 1);
        let kept = projector.project_into(&mat, &mut out);
        assert_eq!(kept, 3);
        assert_eq!(out.shape(), (3, 3));
        assert_relative_eq!(out, mat, epsilon = 1e-12);
    }

    #[test]
    fn test_projection_is_symmetric_and_psd() {
        let projector = create_test_projector();
        let mat = DMatrix::from_row_slice(3, 3, &[
            1.0, 0.5, 0.3,
            0.5, -1.0, 0.2,
            0.3, 0.2, 0.5,
        ]);

        let projected = projector.project(&mat);
        assert_eq!(projected, projected.transpose());
        assert!(min_eigenvalue(&projected) >= -1e-5);
        assert!(projector.distance_to_cone(&mat) > 0.0);
        assert!(projector.distance_to_cone(&projected) < 1e-10);
    }

    #[test]
    fn test_empty_matrix_projects_to_empty() {
        let projector = create_test_projector();
        let empty = DMatrix::<f64>::zeros(0, 0);

        let mut out = DMatrix::zeros(2, 2);
        assert_eq!(projector.project_into(&empty, &mut out), 0);
        assert_eq!(out.shape(), (0, 0));
        assert_eq!(projector.project(&empty).shape(), (0, 0));
    }

    #[test]
    fn test_is_psd_rejects_asymmetric() {
        let mat = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.0, 1.0]);
        assert!(!EigenPSDProjector::is_psd(&mat, 1e-10));
    }
}
