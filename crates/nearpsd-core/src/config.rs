//! Configuration for the calibration loop, the kernel-space calibrator and
//! the metric-nearness pipeline.
//!
//! Every structure is immutable for the duration of a call and, together
//! with the input matrix, fully determines the result. They follow the same
//! pattern: `Default` holds the reference parameters, `with_*` methods
//! override single fields and `validate` rejects inconsistent values before
//! any iteration starts.
//!
//! # Example
//!
//! ```
//! use nearpsd_core::config::CalibrationConfig;
//!
//! let config = CalibrationConfig::<f64>::new()
//!     .with_bounds(-1.0, 1.0)
//!     .with_max_iterations(250);
//! assert!(config.validate().is_ok());
//! ```

use crate::{
    error::{CalibrationError, Result},
    types::Scalar,
};
use num_traits::Float;

/// Parameters of one Dykstra calibration run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig<T> {
    /// Lower bound of the box constraint
    pub low: T,
    /// Upper bound of the box constraint
    pub high: T,
    /// Value the diagonal is fixed to
    pub diagonal: T,
    /// Iteration cap for the alternating projections
    pub max_iterations: usize,
    /// Relative infinity-norm change below which the loop stops
    pub convergence_tolerance: T,
    /// Eigenvalues at or below this threshold are discarded by the PSD projection
    pub eigenvalue_tolerance: T,
}

impl<T: Scalar> Default for CalibrationConfig<T> {
    fn default() -> Self {
        Self {
            low: T::zero(),
            high: T::one(),
            diagonal: T::one(),
            max_iterations: 100,
            convergence_tolerance: T::DEFAULT_CONVERGENCE_TOLERANCE,
            eigenvalue_tolerance: T::DEFAULT_EIGENVALUE_TOLERANCE,
        }
    }
}

impl<T: Scalar> CalibrationConfig<T> {
    /// Creates a configuration with the default correlation-matrix constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the box bounds `[low, high]`.
    pub fn with_bounds(mut self, low: T, high: T) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Sets the fixed diagonal value.
    pub fn with_diagonal(mut self, diagonal: T) -> Self {
        self.diagonal = diagonal;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_convergence_tolerance(mut self, tol: T) -> Self {
        self.convergence_tolerance = tol;
        self
    }

    /// Sets the eigenvalue retention threshold.
    pub fn with_eigenvalue_tolerance(mut self, tol: T) -> Self {
        self.eigenvalue_tolerance = tol;
        self
    }

    /// Check that the configuration describes a non-empty constraint set
    /// and a usable stopping rule.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations < 1 {
            return Err(CalibrationError::invalid_configuration(
                "at least one iteration is required",
                "max_iterations",
                self.max_iterations.to_string(),
            ));
        }
        if !Float::is_finite(self.low) || !Float::is_finite(self.high) {
            return Err(CalibrationError::invalid_configuration(
                "bounds must be finite",
                "low/high",
                format!("[{}, {}]", self.low, self.high),
            ));
        }
        if self.low >= self.high {
            return Err(CalibrationError::invalid_configuration(
                "low must be strictly below high",
                "low",
                format!("[{}, {}]", self.low, self.high),
            ));
        }
        if !Float::is_finite(self.diagonal) {
            return Err(CalibrationError::invalid_configuration(
                "diagonal value must be finite",
                "diagonal",
                self.diagonal.to_string(),
            ));
        }
        validate_positive(self.convergence_tolerance, "convergence_tolerance")?;
        if !Float::is_finite(self.eigenvalue_tolerance) {
            return Err(CalibrationError::invalid_configuration(
                "eigenvalue threshold must be finite",
                "eigenvalue_tolerance",
                self.eigenvalue_tolerance.to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters of a kernel-space calibration.
///
/// The box and diagonal of the underlying Dykstra run are derived from `mu`:
/// kernel entries live in `[exp(-mu), 1]` with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConfig<T> {
    /// Kernel sharpness; the largest distance maps to `exp(-mu)`
    pub mu: T,
    /// Iteration cap for the alternating projections
    pub max_iterations: usize,
    /// Relative infinity-norm change below which the loop stops
    pub convergence_tolerance: T,
    /// Eigenvalue retention threshold
    pub eigenvalue_tolerance: T,
}

impl<T: Scalar> Default for KernelConfig<T> {
    fn default() -> Self {
        Self {
            mu: T::one(),
            max_iterations: 100,
            convergence_tolerance: T::DEFAULT_CONVERGENCE_TOLERANCE,
            eigenvalue_tolerance: T::DEFAULT_EIGENVALUE_TOLERANCE,
        }
    }
}

impl<T: Scalar> KernelConfig<T> {
    /// Creates a configuration with `mu = 1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kernel sharpness.
    pub fn with_mu(mut self, mu: T) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_convergence_tolerance(mut self, tol: T) -> Self {
        self.convergence_tolerance = tol;
        self
    }

    /// Sets the eigenvalue retention threshold.
    pub fn with_eigenvalue_tolerance(mut self, tol: T) -> Self {
        self.eigenvalue_tolerance = tol;
        self
    }

    /// Lower clip bound of the kernel entries, `exp(-mu)`.
    pub fn kernel_floor(&self) -> T {
        <T as Float>::exp(-self.mu)
    }

    /// The Dykstra configuration this kernel calibration runs with.
    pub fn calibration_config(&self) -> CalibrationConfig<T> {
        CalibrationConfig {
            low: self.kernel_floor(),
            high: T::one(),
            diagonal: T::one(),
            max_iterations: self.max_iterations,
            convergence_tolerance: self.convergence_tolerance,
            eigenvalue_tolerance: self.eigenvalue_tolerance,
        }
    }

    /// Validate `mu` and the derived Dykstra configuration.
    pub fn validate(&self) -> Result<()> {
        validate_positive(self.mu, "mu")?;
        // exp(-mu) underflowing to zero would send ln(Y) to -inf.
        if self.kernel_floor() <= T::zero() {
            return Err(CalibrationError::invalid_configuration(
                "kernel floor exp(-mu) underflows to zero",
                "mu",
                self.mu.to_string(),
            ));
        }
        self.calibration_config().validate()
    }
}

/// Parameters of the full metric-nearness pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig<T> {
    /// Kernel calibration used as warm start; only a few iterations are needed
    pub kernel: KernelConfig<T>,
    /// Sweeps of the heuristic improvement
    pub n_improve: usize,
    /// Sweeps of the HLWB alternating projection
    pub n_projection: usize,
}

impl<T: Scalar> Default for PipelineConfig<T> {
    fn default() -> Self {
        Self {
            kernel: KernelConfig::default().with_max_iterations(10),
            n_improve: 1,
            n_projection: 100,
        }
    }
}

impl<T: Scalar> PipelineConfig<T> {
    /// Creates the reference pipeline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kernel warm-start configuration.
    pub fn with_kernel(mut self, kernel: KernelConfig<T>) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the number of heuristic improvement sweeps.
    pub fn with_n_improve(mut self, n_improve: usize) -> Self {
        self.n_improve = n_improve;
        self
    }

    /// Sets the number of HLWB projection sweeps.
    pub fn with_n_projection(mut self, n_projection: usize) -> Self {
        self.n_projection = n_projection;
        self
    }

    /// Validate the warm-start configuration.
    pub fn validate(&self) -> Result<()> {
        self.kernel.validate()
    }
}

fn validate_positive<T: Scalar>(value: T, parameter: &str) -> Result<()> {
    if !Float::is_finite(value) || value <= T::zero() {
        return Err(CalibrationError::invalid_configuration(
            "must be positive and finite",
            parameter,
            value.to_string(),
        ));
    }
    Ok(())
}
