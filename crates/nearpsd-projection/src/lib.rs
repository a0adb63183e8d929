//! Projection engine for symmetric-matrix calibration.
//!
//! This crate provides the two projections a calibration alternates between
//! and the Dykstra loop that combines them:
//!
//! - [`psd_cone`]: eigenvalue thresholding onto the PSD cone
//! - [`constraints`]: the second convex set (box bounds with a fixed diagonal)
//! - [`dykstra`]: Dykstra's corrected alternating projections

pub mod constraints;
pub mod dykstra;
pub mod psd_cone;

// Re-export main types for convenience
pub use constraints::{BoxDiagonalProjector, ConstraintProjector};
pub use dykstra::{calibrate, DykstraCalibrationLoop, DykstraWorkspace};
pub use psd_cone::{project_psd, EigenPSDProjector};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::constraints::{BoxDiagonalProjector, ConstraintProjector};
    pub use crate::dykstra::{calibrate, DykstraCalibrationLoop, DykstraWorkspace};
    pub use crate::psd_cone::{project_psd, EigenPSDProjector};
}
