//! # Mechanism simulator library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the simulator crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Run clock - paces the executable and releases script commands
pub mod clock;

/// Simulation commands - instructions issued to the simulation by scripts
pub mod cmd;

/// Control-loop primitives - gains, control mode, PID and feedforward
pub mod control;

/// Parameter mapping - converts external mechanism configuration into physical simulation
/// configuration
pub mod mapping;

/// Motor models - the motor catalog and the effective (geared, multi-motor) electrical model
pub mod motor;

/// Executable parameters - timing, run length and logging for the simulator executable
pub mod params;

/// Plant models - arm and elevator physics
pub mod plant;

/// Simulation - a single closed-loop mechanism simulation instance
pub mod sim;

/// Simulation control module - owns the live simulation and drives it once per cycle
pub mod sim_ctrl;
