//! Input validation performed before any iterative loop starts.

use crate::{
    error::{CalibrationError, Result},
    numerical::stability::max_entry,
    types::{DMatrix, Scalar},
};
use num_traits::Float;

/// Ensure `m` is a non-empty square matrix and return its order.
pub fn validate_square<T: Scalar>(m: &DMatrix<T>) -> Result<usize> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(CalibrationError::dimension_mismatch(
            "square matrix",
            format!("{rows}x{cols} matrix"),
        ));
    }
    if rows == 0 {
        return Err(CalibrationError::dimension_mismatch(
            "non-empty matrix",
            "0x0 matrix",
        ));
    }
    Ok(rows)
}

/// Ensure every entry of `m` is finite.
pub fn validate_finite<T: Scalar>(m: &DMatrix<T>) -> Result<()> {
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            let x = m[(i, j)];
            if !Float::is_finite(x) {
                return Err(CalibrationError::degenerate_input(format!(
                    "non-finite entry {x} at ({i}, {j})"
                )));
            }
        }
    }
    Ok(())
}

/// Ensure two matrices have the same shape.
pub fn validate_same_shape<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(CalibrationError::dimension_mismatch(
            format!("{}x{}", a.nrows(), a.ncols()),
            format!("{}x{}", b.nrows(), b.ncols()),
        ));
    }
    Ok(())
}

/// Validate a pairwise distance matrix and return its largest entry.
///
/// The matrix must be square, finite and nonnegative, with a strictly
/// positive maximum: an all-zero matrix has no kernel scale.
pub fn validate_distance_matrix<T: Scalar>(d: &DMatrix<T>) -> Result<T> {
    validate_square(d)?;
    validate_finite(d)?;
    if let Some(&neg) = d.iter().find(|&&x| x < T::zero()) {
        return Err(CalibrationError::degenerate_input(format!(
            "distance matrix has negative entry {neg}"
        )));
    }
    let max = max_entry(d);
    if max <= T::zero() {
        return Err(CalibrationError::degenerate_input(
            "distance matrix is all zero, kernel scale is undefined",
        ));
    }
    Ok(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_square() {
        assert_eq!(validate_square(&DMatrix::<f64>::zeros(3, 3)).unwrap(), 3);
        assert!(matches!(
            validate_square(&DMatrix::<f64>::zeros(2, 3)),
            Err(CalibrationError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            validate_square(&DMatrix::<f64>::zeros(0, 0)),
            Err(CalibrationError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_finite_reports_position() {
        let mut m = DMatrix::<f64>::zeros(3, 3);
        assert!(validate_finite(&m).is_ok());

        m[(1, 2)] = f64::INFINITY;
        let err = validate_finite(&m).unwrap_err();
        assert!(err.to_string().contains("(1, 2)"));
    }

    #[test]
    fn test_validate_distance_matrix() {
        let d = DMatrix::from_row_slice(3, 3, &[0.0, 1.0, 5.0, 1.0, 0.0, 1.0, 5.0, 1.0, 0.0]);
        assert_eq!(validate_distance_matrix(&d).unwrap(), 5.0);

        let zero = DMatrix::<f64>::zeros(3, 3);
        assert!(matches!(
            validate_distance_matrix(&zero),
            Err(CalibrationError::DegenerateInput { .. })
        ));

        let mut neg = d.clone();
        neg[(0, 1)] = -0.5;
        assert!(matches!(
            validate_distance_matrix(&neg),
            Err(CalibrationError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn test_validate_same_shape() {
        let a = DMatrix::<f64>::zeros(2, 2);
        let b = DMatrix::<f64>::zeros(3, 3);
        assert!(validate_same_shape(&a, &a).is_ok());
        assert!(validate_same_shape(&a, &b).is_err());
    }
}
