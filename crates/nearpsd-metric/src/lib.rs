//! Calibrators and the metric-nearness pipeline.
//!
//! This crate builds on the Dykstra engine of `nearpsd-projection`:
//!
//! - [`direct`]: nearest PSD matrix with box and diagonal constraints ([`nearpsd`])
//! - [`kernel`]: distance calibration through the Laplace kernel ([`project_to_kernel`])
//! - [`refiner`]: the [`MetricRefiner`] seam consumed by the pipeline
//! - [`hlwb`]: the reference triangle-inequality refiner
//! - [`diagnostics`]: NMSE and triangle-violation measures
//! - [`pipeline`]: kernel warm start followed by metric refinement ([`hlwb_algorithm`])
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use nearpsd_metric::{hlwb_algorithm, triangle_violations};
//!
//! let d = DMatrix::<f64>::from_row_slice(3, 3, &[
//!     0.0, 1.0, 5.0,
//!     1.0, 0.0, 1.0,
//!     5.0, 1.0, 0.0,
//! ]);
//! let metric = hlwb_algorithm(&d, 50)?;
//! assert_eq!(triangle_violations(&metric, 1e-6), 0);
//! # Ok::<(), nearpsd_core::CalibrationError>(())
//! ```

pub mod diagnostics;
pub mod direct;
pub mod hlwb;
pub mod kernel;
pub mod pipeline;
pub mod refiner;

// Re-export main entry points for convenience
pub use diagnostics::{max_triangle_violation, nmse, triangle_violations};
pub use direct::{nearpsd, nearpsd_with_config};
pub use hlwb::{heuristic_improve, hlwb_projection, HlwbRefiner};
pub use kernel::{project_to_kernel, project_to_kernel_with_config, KernelProjection};
pub use pipeline::{hlwb_algorithm, hlwb_algorithm_with, PipelineOutcome};
pub use refiner::MetricRefiner;
