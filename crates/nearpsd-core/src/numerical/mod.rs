//! Numerical utilities and input validation.

pub mod stability;
pub mod validation;

// Re-export numerical utilities
pub use stability::*;
pub use validation::*;
