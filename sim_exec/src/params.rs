//! # Simulator Executable Parameters
//!
//! This module provides parameters for the simulator executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use util::logger::LoggerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct SimExecParams {
    /// Period of one cycle of the main loop, the simulation is stepped by this much every cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Simulated time to run for.
    ///
    /// Units: seconds
    pub duration_s: f64,

    /// If true each cycle is paced to take `cycle_period_s` of wall time, otherwise the loop runs
    /// as fast as possible.
    #[serde(default)]
    pub realtime: bool,

    /// Directory sessions are created in.
    #[serde(default = "default_sessions_dir")]
    pub sessions_dir: String,

    pub logger: LoggerParams,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_sessions_dir() -> String {
    String::from("sessions")
}
