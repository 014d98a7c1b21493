//! Implementations for the simulation state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::{SimConfig, SimError, DEBUG_LOG_INTERVAL_TICKS};
use crate::control::{ControlMode, PidState, MAX_VOLTAGE_V};
use crate::plant::{Motion, TravelLimit};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single closed-loop mechanism simulation.
///
/// Owned exclusively by whatever drives it, there is no internal locking.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,

    state: SimulationState,

    num_ticks: u64,

    /// Travel limit hit during the last tick.
    last_limit: Option<TravelLimit>,

    /// True if the last tick's demand was outside the voltage limits.
    last_saturated: bool,
}

/// The evolving state of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationState {
    /// Simulated time since the simulation was built.
    ///
    /// Units: seconds
    pub time_s: f64,

    pub motion: Motion,

    /// Voltage applied to the motors on the last tick, always within
    /// `[-MAX_VOLTAGE_V, MAX_VOLTAGE_V]` unless NaN.
    ///
    /// Units: volts
    pub voltage_v: f64,

    pub pid: PidState,

    pub mode: ControlMode,

    /// Position target, used in `Position` mode.
    ///
    /// Units: radians or meters
    pub target: f64,

    /// Velocity target, used in `Velocity` mode.
    ///
    /// Units: radians/second or meters/second
    pub target_velocity: f64,
}

/// Flat, read-only view of the simulation after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_s: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub voltage_v: f64,
    pub current_a: f64,
    pub target: f64,
    pub target_velocity: f64,
    pub mode: ControlMode,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Simulation {
    /// Build a new simulation at rest at the plant's starting position, with
    /// the position target equal to the starting position.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let start = config.plant.starting_position();

        let state = SimulationState {
            time_s: 0.0,
            motion: Motion {
                position: start,
                ..Default::default()
            },
            voltage_v: 0.0,
            pid: PidState::default(),
            mode: config.mode,
            target: start,
            target_velocity: 0.0,
        };

        Ok(Self {
            config,
            state,
            num_ticks: 0,
            last_limit: None,
            last_saturated: false,
        })
    }

    pub fn set_target(&mut self, target: f64) {
        self.state.target = target;
    }

    pub fn set_target_velocity(&mut self, target_velocity: f64) {
        self.state.target_velocity = target_velocity;
    }

    /// Change the control mode.
    ///
    /// The PID integral and previous error are kept.
    pub fn set_control_mode(&mut self, mode: ControlMode) {
        self.state.mode = mode;
    }

    /// Advance the simulation by one step.
    ///
    /// If `dt_s` is given it replaces the stored step for this and all later
    /// ticks, otherwise the stored step is used. The step is not checked, a
    /// zero or negative step produces non-finite or meaningless output.
    pub fn tick(&mut self, dt_s: Option<f64>) -> Snapshot {
        if let Some(dt) = dt_s {
            self.config.dt_s = dt;
        }
        let dt = self.config.dt_s;
        let gains = &self.config.gains;
        let state = &mut self.state;

        state.time_s += dt;

        let error = match state.mode {
            ControlMode::Position => state.target - state.motion.position,
            ControlMode::Velocity => state.target_velocity - state.motion.velocity,
        };
        let pid_v = state.pid.update(gains, error, dt);

        // Feedforward uses the motion from the previous tick
        let ff_v = gains.feedforward(
            state.motion.velocity,
            state.motion.acceleration,
            state.motion.position,
            self.config.kind.gravity_ff(),
        );

        let demand_v = pid_v + ff_v;
        self.last_saturated = demand_v.abs() > MAX_VOLTAGE_V;
        state.voltage_v = demand_v.clamp(-MAX_VOLTAGE_V, MAX_VOLTAGE_V);

        self.last_limit = self.config.plant.physics_step(
            &mut state.motion,
            state.voltage_v,
            &self.config.motor,
            dt,
        );

        self.num_ticks += 1;

        if self.num_ticks % DEBUG_LOG_INTERVAL_TICKS == 0 {
            debug!(
                "t = {:.3} s, mode: {}, target: {:.4}, target vel: {:.4}, pos: {:.4}, \
                vel: {:.4}, voltage: {:.3} V (pid {:.3} V, ff {:.3} V), motors: {}",
                state.time_s,
                state.mode,
                state.target,
                state.target_velocity,
                state.motion.position,
                state.motion.velocity,
                state.voltage_v,
                pid_v,
                ff_v,
                self.config.motor.motor_count()
            );
        }

        self.snapshot()
    }

    /// Get a snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let s = &self.state;

        Snapshot {
            time_s: s.time_s,
            position: s.motion.position,
            velocity: s.motion.velocity,
            acceleration: s.motion.acceleration,
            voltage_v: s.voltage_v,
            current_a: s.motion.current_a,
            target: s.target,
            target_velocity: s.target_velocity,
            mode: s.mode,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Step the next `tick(None)` will use.
    ///
    /// Units: seconds
    pub fn dt_s(&self) -> f64 {
        self.config.dt_s
    }

    pub fn num_ticks(&self) -> u64 {
        self.num_ticks
    }

    /// Travel limit the plant was stopped at on the last tick.
    pub fn last_limit(&self) -> Option<TravelLimit> {
        self.last_limit
    }

    /// True if the controller demanded more than the supply voltage on the
    /// last tick.
    pub fn voltage_saturated(&self) -> bool {
        self.last_saturated
    }
}
