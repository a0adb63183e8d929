//! Progress measures for metric refinement.
//!
//! These are read-only and do not influence any iterate. With the
//! `parallel` feature the triangle scans are split across rows with rayon;
//! the counts are identical to the sequential scan.

use nearpsd_core::types::{DMatrix, Scalar};
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Normalised squared error `‖X − D‖_F² / ‖D‖_F²`.
///
/// Returns zero when both matrices are zero and infinity when only `D` is.
pub fn nmse<T: Scalar>(d: &DMatrix<T>, x: &DMatrix<T>) -> T {
    debug_assert_eq!(d.shape(), x.shape());
    let mut squared_error = T::zero();
    let mut norm_d = T::zero();
    for (&dv, &xv) in d.iter().zip(x.iter()) {
        let diff = dv - xv;
        squared_error += diff * diff;
        norm_d += dv * dv;
    }
    if norm_d == T::zero() {
        return if squared_error == T::zero() {
            T::zero()
        } else {
            <T as Float>::infinity()
        };
    }
    squared_error / norm_d
}

/// Number of triangle-inequality violations.
///
/// Counts the triples with `i < j`, `k ∉ {i, j}` and
/// `X[i,j] − eps > X[i,k] + X[j,k]`. Each unordered edge is tested against
/// every third vertex, so one bad edge in an `n`-point matrix can
/// contribute up to `n − 2` violations.
pub fn triangle_violations<T: Scalar>(x: &DMatrix<T>, eps: T) -> usize {
    let n = x.nrows();

    #[cfg(feature = "parallel")]
    {
        (0..n)
            .into_par_iter()
            .map(|i| row_violations(x, i, eps))
            .sum()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(|i| row_violations(x, i, eps)).sum()
    }
}

/// Largest excess `X[i,j] − X[i,k] − X[j,k]` over all triples, or zero
/// when every triangle inequality holds.
pub fn max_triangle_violation<T: Scalar>(x: &DMatrix<T>) -> T {
    let n = x.nrows();

    #[cfg(feature = "parallel")]
    {
        (0..n)
            .into_par_iter()
            .map(|i| row_max_excess(x, i))
            .reduce(T::zero, |a, b| <T as Float>::max(a, b))
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..n)
            .map(|i| row_max_excess(x, i))
            .fold(T::zero(), |a, b| <T as Float>::max(a, b))
    }
}

fn row_violations<T: Scalar>(x: &DMatrix<T>, i: usize, eps: T) -> usize {
    let n = x.nrows();
    let mut count = 0;
    for j in (i + 1)..n {
        let edge = x[(i, j)];
        for k in 0..n {
            if k == i || k == j {
                continue;
            }
            if edge - eps > x[(j, k)] + x[(i, k)] {
                count += 1;
            }
        }
    }
    count
}

fn row_max_excess<T: Scalar>(x: &DMatrix<T>, i: usize) -> T {
    let n = x.nrows();
    let mut worst = T::zero();
    for j in (i + 1)..n {
        for k in 0..n {
            if k != i && k != j {
                worst = <T as Float>::max(worst, x[(i, j)] - x[(i, k)] - x[(j, k)]);
            }
        }
    }
    worst
}
