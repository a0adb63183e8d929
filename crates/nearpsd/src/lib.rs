//! Nearest PSD matrices, kernel calibration and metric nearness.
//!
//! This crate re-exports the workspace crates behind a single dependency:
//!
//! - [`nearpsd_core`]: scalar trait, configuration, errors and results
//! - [`nearpsd_projection`]: PSD-cone projection and the Dykstra loop
//! - [`nearpsd_metric`]: `nearpsd`, `project_to_kernel` and the HLWB pipeline
//!
//! # Quick Start
//!
//! ```rust
//! use nearpsd::prelude::*;
//!
//! // Nearest correlation-like matrix
//! let a = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
//! let x = nearpsd(&a, 100, 0.0, 1.0, 1.0)?;
//! assert_eq!(x[(0, 0)], 1.0);
//!
//! // Metric nearness for a dissimilarity matrix
//! let d = DMatrix::<f64>::from_row_slice(3, 3, &[
//!     0.0, 1.0, 5.0,
//!     1.0, 0.0, 1.0,
//!     5.0, 1.0, 0.0,
//! ]);
//! let metric = hlwb_algorithm(&d, 100)?;
//! assert_eq!(metric, metric.transpose());
//! # Ok::<(), CalibrationError>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon-backed triangle diagnostics
//! - `serde`: serialization of configurations and termination reasons
//! - `full`: all of the above

pub use nearpsd_core;
pub use nearpsd_metric;
pub use nearpsd_projection;

// Re-export nalgebra for convenience
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use nearpsd_core::prelude::*;

    pub use nearpsd_projection::{
        calibrate, BoxDiagonalProjector, ConstraintProjector, DykstraCalibrationLoop,
        DykstraWorkspace, EigenPSDProjector,
    };

    pub use nearpsd_metric::{
        hlwb_algorithm, hlwb_algorithm_with, max_triangle_violation, nearpsd,
        nearpsd_with_config, nmse, project_to_kernel, project_to_kernel_with_config,
        triangle_violations, HlwbRefiner, KernelProjection, MetricRefiner, PipelineOutcome,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
