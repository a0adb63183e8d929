//! Core types and utilities for PSD calibration and metric nearness.
//!
//! This crate provides the foundational pieces shared by the projection
//! engine and the calibrators built on top of it. It defines the scalar
//! abstraction, the error taxonomy, the per-call configuration structures
//! and the result types that carry convergence diagnostics.
//!
//! # Key Concepts
//!
//! - **PSD cone**: symmetric matrices whose eigenvalues are all non-negative
//! - **Box/diagonal constraints**: entries clipped to `[low, high]` with a fixed diagonal
//! - **Kernel matrices**: similarities derived from distances via `exp(gamma * D)`
//! - **Metric nearness**: closest matrix satisfying the metric axioms
//!
//! # Modules
//!
//! - [`config`]: Calibration, kernel and pipeline configuration
//! - [`error`]: Error types for calibration operations
//! - [`numerical`]: Matrix helpers (symmetrization, norms, clipping) and input validation
//! - [`result`]: Calibration results and termination reasons
//! - [`types`]: Scalar trait, matrix aliases and numerical constants

pub mod config;
pub mod error;
pub mod numerical;
pub mod result;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used items at the crate root
pub use config::{CalibrationConfig, KernelConfig, PipelineConfig};
pub use error::{CalibrationError, Result};
pub use result::{CalibrationResult, TerminationReason};
pub use types::{DMatrix, DVector, Scalar};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use nearpsd_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{CalibrationConfig, KernelConfig, PipelineConfig};
    pub use crate::error::{CalibrationError, Result};
    pub use crate::numerical::{
        clip, fill_diagonal, infinity_norm, is_finite_matrix, is_symmetric, min_eigenvalue,
        symmetrize, validate_distance_matrix, validate_square,
    };
    pub use crate::result::{CalibrationResult, TerminationReason};
    pub use crate::types::{constants, DMatrix, DVector, Scalar};
}
