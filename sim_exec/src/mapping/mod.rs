//! # Parameter mapping
//!
//! Mechanisms are described externally in the units a person would use:
//! degrees, pounds or kilograms, hard limits and starting positions. This
//! module turns such a description into the SI `SimConfig` the simulation
//! runs on, and works out the range and units of the target a user can ask
//! for.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod configure;
mod form;
mod slider;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use configure::*;
pub use form::*;
pub use slider::*;
use crate::motor::MotorError;
use crate::sim::SimError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Kilograms per pound.
pub const LBS_TO_KG: f64 = 0.453592;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors raised while mapping a mechanism description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    #[error("Unknown mechanism type: {0}")]
    UnknownMechanism(String),

    #[error("Could not build the motor model: {0}")]
    MotorError(#[from] MotorError),

    #[error("The mapped configuration is invalid: {0}")]
    InvalidConfig(#[from] SimError),
}
