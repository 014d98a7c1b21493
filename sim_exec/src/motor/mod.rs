//! Motor module
//!
//! Provides the motor catalog (the table of per-motor electrical constants)
//! and the effective motor model derived from a catalog entry, a gear ratio
//! and a motor count.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod catalog;
mod model;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use catalog::*;
pub use model::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while building a motor model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MotorError {
    #[error("Unknown motor type: {0}")]
    UnknownMotor(String),

    #[error("Gear ratio must be positive and finite, found {0}")]
    InvalidGearRatio(f64),

    #[error("At least one motor is required, found {0}")]
    InvalidMotorCount(u32),

    #[error("The catalog's default motor ({0}) is not in the catalog")]
    MissingDefault(String),
}
