//! # Simulation
//!
//! A `Simulation` is one closed-loop mechanism: a plant, the motors driving
//! it and the controller commanding them. It is stepped by its owner with
//! `tick` and never changes its configuration, a new configuration means a
//! new `Simulation`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Internal
pub use state::*;
use crate::control::{ControlError, ControlGains, ControlMode, GravityFf};
use crate::motor::EffectiveMotorModel;
use crate::plant::{Plant, PlantError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time step used when none is configured.
///
/// Units: seconds
pub const DEFAULT_DT_S: f64 = 0.02;

/// Number of ticks between debug log records of the simulation state.
pub const DEBUG_LOG_INTERVAL_TICKS: u64 = 50;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Everything needed to build a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    pub kind: MechanismKind,

    pub plant: Plant,

    pub gains: ControlGains,

    pub motor: EffectiveMotorModel,

    /// Control mode the simulation starts in.
    pub mode: ControlMode,

    /// Step used by `tick` until another is supplied.
    ///
    /// Units: seconds
    pub dt_s: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The kinds of mechanism which can be simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MechanismKind {
    /// A single rotating joint, gravity load varies with angle.
    Arm,

    /// A vertical lift, constant gravity load.
    Elevator,

    /// A small fixed-geometry arm without gravity feedforward.
    Pivot,
}

/// Errors raised while building a simulation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("Invalid plant: {0}")]
    InvalidPlant(#[from] PlantError),

    #[error("Invalid control configuration: {0}")]
    InvalidControl(#[from] ControlError),

    #[error("Mechanism kind {0} cannot use an {1} plant")]
    PlantMismatch(MechanismKind, &'static str),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimConfig {
    /// Check the configuration describes a simulation that can be run.
    pub fn validate(&self) -> Result<(), SimError> {
        self.plant.validate()?;
        self.gains.validate()?;

        match (self.kind, &self.plant) {
            (MechanismKind::Elevator, Plant::Arm(_)) => {
                Err(SimError::PlantMismatch(self.kind, "arm"))
            }
            (MechanismKind::Arm, Plant::Elevator(_))
            | (MechanismKind::Pivot, Plant::Elevator(_)) => {
                Err(SimError::PlantMismatch(self.kind, "elevator"))
            }
            _ => Ok(()),
        }
    }
}

impl MechanismKind {
    /// How the gravity gain enters this mechanism's feedforward.
    pub fn gravity_ff(&self) -> GravityFf {
        match self {
            MechanismKind::Arm => GravityFf::Cosine,
            MechanismKind::Elevator | MechanismKind::Pivot => GravityFf::Constant,
        }
    }

    /// True if positions are angles.
    pub fn is_angular(&self) -> bool {
        match self {
            MechanismKind::Arm | MechanismKind::Pivot => true,
            MechanismKind::Elevator => false,
        }
    }
}

impl FromStr for MechanismKind {
    type Err = String;

    /// Parse the kind from its name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arm" => Ok(MechanismKind::Arm),
            "elevator" => Ok(MechanismKind::Elevator),
            "pivot" => Ok(MechanismKind::Pivot),
            _ => Err(s.to_string()),
        }
    }
}

impl fmt::Display for MechanismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MechanismKind::Arm => write!(f, "Arm"),
            MechanismKind::Elevator => write!(f, "Elevator"),
            MechanismKind::Pivot => write!(f, "Pivot"),
        }
    }
}
