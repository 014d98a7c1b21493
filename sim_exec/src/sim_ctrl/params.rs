//! Parameters structure for SimCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::control::ControlMode;
use crate::mapping::MechanismForm;
use crate::sim::DEFAULT_DT_S;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for simulation control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    // ---- STEPPING ----
    /// Simulation step.
    ///
    /// Units: seconds
    #[serde(default = "default_dt_s")]
    pub dt_s: f64,

    /// Control mode the simulation starts in.
    #[serde(default)]
    pub control_mode: ControlMode,

    // ---- MECHANISM ----
    /// Number of motors driving the mechanism.
    #[serde(default = "default_motor_count")]
    pub motor_count: u32,

    /// Motor catalog file, relative to the parameter directory. The built-in
    /// catalog is used if not given.
    #[serde(default)]
    pub motor_catalog: Option<String>,

    pub mechanism: MechanismForm,
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_dt_s() -> f64 {
    DEFAULT_DT_S
}

fn default_motor_count() -> u32 {
    1
}
