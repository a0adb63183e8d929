//! Shared matrix generators for tests and benchmarks.

use crate::types::DMatrix;
use rand::prelude::*;
use rand_distr::{Normal, StandardNormal};

/// Random symmetric matrix with standard normal entries.
pub fn random_symmetric<R: Rng + ?Sized>(n: usize, rng: &mut R) -> DMatrix<f64> {
    let mut mat = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let val: f64 = rng.sample(StandardNormal);
            mat[(i, j)] = val;
            mat[(j, i)] = val;
        }
    }
    mat
}

/// Random PSD matrix `AᵗA / n`.
pub fn random_psd<R: Rng + ?Sized>(n: usize, rng: &mut R) -> DMatrix<f64> {
    let a = DMatrix::from_fn(n, n, |_, _| rng.sample::<f64, _>(StandardNormal));
    (a.transpose() * &a) / n as f64
}

/// Distances `|x_i - x_j|` between points on a line.
///
/// The induced kernel `exp(-c * D)` is positive definite for every `c > 0`
/// and distinct points, so these matrices are fixed points of the kernel
/// calibration.
pub fn line_distances(points: &[f64]) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |i, j| (points[i] - points[j]).abs())
}

/// Euclidean distance matrix of `n` random points in `dim` dimensions,
/// perturbed by symmetric Gaussian noise of standard deviation `noise`.
///
/// Entries are clamped at zero and the diagonal is exactly zero, so the
/// result is a valid (usually non-metric) dissimilarity matrix.
pub fn noisy_distance_matrix<R: Rng + ?Sized>(
    n: usize,
    dim: usize,
    noise: f64,
    rng: &mut R,
) -> DMatrix<f64> {
    let points = DMatrix::from_fn(n, dim, |_, _| rng.sample::<f64, _>(StandardNormal));
    let normal = Normal::new(0.0, noise.max(0.0)).expect("noise is non-negative");
    let mut d = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let dist = (points.row(i) - points.row(j)).norm();
            let val = (dist + normal.sample(rng)).max(0.0);
            d[(i, j)] = val;
            d[(j, i)] = val;
        }
    }
    d
}
