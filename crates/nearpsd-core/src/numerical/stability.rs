//! Matrix helpers shared by the projection loops.
//!
//! These helpers operate in place wherever a loop calls them once per
//! iteration, so the working buffers can be reused.

use crate::types::{DMatrix, Scalar};
use num_traits::Float;

/// Replace `m` by `(m + mᵗ) / 2` in place.
///
/// Both mirrored entries receive the same value, so the result is exactly
/// symmetric.
pub fn symmetrize<T: Scalar>(m: &mut DMatrix<T>) {
    let n = m.nrows().min(m.ncols());
    let half = <T as Scalar>::from_f64(0.5);
    for j in 0..n {
        for i in (j + 1)..n {
            let avg = (m[(i, j)] + m[(j, i)]) * half;
            m[(i, j)] = avg;
            m[(j, i)] = avg;
        }
    }
}

/// Return `(m + mᵗ) / 2` as a new matrix.
pub fn symmetrized<T: Scalar>(m: &DMatrix<T>) -> DMatrix<T> {
    let mut out = m.clone();
    symmetrize(&mut out);
    out
}

/// Check symmetry the way `allclose(A, Aᵗ)` does.
///
/// `allclose` compares `A` against `Aᵗ` entrywise with
/// `|a - b| <= atol + rtol * |b|`, so each mirrored pair is tested once with
/// `a_ji` and once with `a_ij` as the reference.
pub fn is_symmetric<T: Scalar>(m: &DMatrix<T>, rtol: T, atol: T) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let n = m.nrows();
    for j in 0..n {
        for i in (j + 1)..n {
            let a = m[(i, j)];
            let b = m[(j, i)];
            let diff = Float::abs(a - b);
            if diff > atol + rtol * Float::abs(b) || diff > atol + rtol * Float::abs(a) {
                return false;
            }
        }
    }
    true
}

/// Induced infinity norm: maximum absolute row sum.
pub fn infinity_norm<T: Scalar>(m: &DMatrix<T>) -> T {
    m.row_iter()
        .map(|row| row.iter().fold(T::zero(), |acc, &x| acc + Float::abs(x)))
        .fold(T::zero(), |acc, s| <T as Float>::max(acc, s))
}

/// Infinity norm of `a - b` without materialising the difference.
pub fn infinity_norm_of_difference<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> T {
    debug_assert_eq!(a.shape(), b.shape());
    let mut best = T::zero();
    for i in 0..a.nrows() {
        let mut row_sum = T::zero();
        for j in 0..a.ncols() {
            row_sum += Float::abs(a[(i, j)] - b[(i, j)]);
        }
        best = <T as Float>::max(best, row_sum);
    }
    best
}

/// Set every diagonal entry to `value`.
pub fn fill_diagonal<T: Scalar>(m: &mut DMatrix<T>, value: T) {
    m.fill_diagonal(value);
}

/// Clip every entry to `[low, high]`.
pub fn clip<T: Scalar>(m: &mut DMatrix<T>, low: T, high: T) {
    for x in m.iter_mut() {
        *x = <T as Float>::min(<T as Float>::max(*x, low), high);
    }
}

/// Check if a matrix is finite (no NaN or Inf values).
pub fn is_finite_matrix<T: Scalar>(m: &DMatrix<T>) -> bool {
    m.iter().all(|&x| Float::is_finite(x))
}

/// Smallest eigenvalue of a symmetric matrix (zero for an empty matrix).
pub fn min_eigenvalue<T: Scalar>(m: &DMatrix<T>) -> T {
    if m.is_empty() {
        return T::zero();
    }
    m.clone()
        .symmetric_eigenvalues()
        .iter()
        .fold(<T as Float>::infinity(), |acc, &x| <T as Float>::min(acc, x))
}

/// Largest entry of a matrix (negative infinity for an empty matrix).
pub fn max_entry<T: Scalar>(m: &DMatrix<T>) -> T {
    m.iter()
        .fold(<T as Float>::neg_infinity(), |acc, &x| <T as Float>::max(acc, x))
}
