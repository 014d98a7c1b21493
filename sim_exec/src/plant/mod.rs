//! Plant models
//!
//! A plant turns the applied motor voltage into motion. Two lumped,
//! single-degree-of-freedom topologies are modelled:
//!
//! - `Arm`: a single rotating joint loaded by gravity acting on the link's
//!   centre of mass. Position is an angle in radians, zero is the
//!   low-energy rest position where gravity exerts no torque.
//! - `Elevator`: a carriage lifted by a cable wound on a drum. Position is a
//!   height in meters.
//!
//! Both integrate with semi-implicit Euler and stop inelastically at their
//! travel limits.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod arm;
mod elevator;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
pub use arm::*;
pub use elevator::*;
use crate::motor::EffectiveMotorModel;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Gravitational acceleration.
///
/// Units: meters/second^2
pub const GRAVITY_MS2: f64 = 9.81;

/// Conversion factor applied to `velocity / kv` to get the back-EMF.
const BACK_EMF_FACTOR: f64 = std::f64::consts::TAU / 60.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The mechanical state of a plant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Motion {
    /// Units: radians (arm) or meters (elevator)
    pub position: f64,

    /// Units: radians/second (arm) or meters/second (elevator)
    pub velocity: f64,

    /// Units: radians/second^2 (arm) or meters/second^2 (elevator)
    pub acceleration: f64,

    /// Current drawn by the motors.
    ///
    /// Units: amps
    pub current_a: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A configured plant.
///
/// Parameters are immutable once built, reconfiguring means building a new
/// plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Plant {
    Arm(ArmParams),
    Elevator(ElevatorParams),
}

/// Which travel limit stopped the plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TravelLimit {
    Min,
    Max,
}

/// Possible errors in plant parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlantError {
    #[error("Plant parameter {0} must be positive and finite, found {1}")]
    NonPositive(&'static str, f64),

    #[error("Travel limits are invalid, minimum {0} is not below maximum {1}")]
    InvalidLimits(f64, f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Plant {
    /// Check the parameters describe a physical plant.
    pub fn validate(&self) -> Result<(), PlantError> {
        match self {
            Plant::Arm(p) => p.validate(),
            Plant::Elevator(p) => p.validate(),
        }
    }

    /// Position the plant starts in.
    pub fn starting_position(&self) -> f64 {
        match self {
            Plant::Arm(p) => p.starting_angle_rad,
            Plant::Elevator(p) => p.starting_height_m,
        }
    }

    /// The `(min, max)` interval the position is clamped to.
    pub fn travel_limits(&self) -> (f64, f64) {
        match self {
            Plant::Arm(p) => (p.min_angle_rad, p.max_angle_rad),
            Plant::Elevator(p) => (p.min_height_m, p.max_height_m),
        }
    }

    /// Advance the plant by `dt_s` seconds with `voltage_v` applied to the
    /// motors.
    ///
    /// Updates acceleration, velocity, position and current in `motion`.
    /// Returns the travel limit the plant was stopped at, if any.
    pub fn physics_step(
        &self,
        motion: &mut Motion,
        voltage_v: f64,
        motor: &EffectiveMotorModel,
        dt_s: f64,
    ) -> Option<TravelLimit> {
        match self {
            Plant::Arm(p) => p.physics_step(motion, voltage_v, motor, dt_s),
            Plant::Elevator(p) => p.physics_step(motion, voltage_v, motor, dt_s),
        }
    }

    /// Gravity gain `kG` that holds the plant against gravity at stall.
    ///
    /// For the arm this is the voltage needed with the link horizontal.
    pub fn gravity_ff_gain(&self, motor: &EffectiveMotorModel) -> f64 {
        let torque_nm = match self {
            Plant::Arm(p) => p.mass_kg * GRAVITY_MS2 * p.length_m / 2.0,
            Plant::Elevator(p) => p.mass_kg * GRAVITY_MS2 * p.drum_radius_m,
        };

        motor.stall_voltage_for_torque(torque_nm)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Motor current for the applied voltage at the given output shaft rate.
fn motor_current(voltage_v: f64, shaft_rate: f64, motor: &EffectiveMotorModel) -> f64 {
    let back_emf_v = shaft_rate * (1.0 / motor.kv()) * BACK_EMF_FACTOR;

    (voltage_v - back_emf_v) / motor.resistance_ohm()
}

/// Integrate `motion` over `dt_s` using its acceleration, then apply the
/// travel limits.
///
/// Semi-implicit Euler: the new velocity is used to advance the position.
fn integrate(motion: &mut Motion, dt_s: f64, min: f64, max: f64) -> Option<TravelLimit> {
    motion.velocity += motion.acceleration * dt_s;
    motion.position += motion.velocity * dt_s;

    clamp_to_travel(motion, min, max)
}

/// Clamp the position to `[min, max]`.
///
/// On a stop the velocity is zeroed only if it would carry the plant further
/// past the limit, motion back into the range is kept.
fn clamp_to_travel(motion: &mut Motion, min: f64, max: f64) -> Option<TravelLimit> {
    let mut limit = None;

    if motion.position < min {
        motion.position = min;
        motion.velocity = motion.velocity.max(0.0);
        limit = Some(TravelLimit::Min);
    }
    if motion.position > max {
        motion.position = max;
        motion.velocity = motion.velocity.min(0.0);
        limit = Some(TravelLimit::Max);
    }

    limit
}

fn check_positive(name: &'static str, value: f64) -> Result<(), PlantError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    }
    else {
        Err(PlantError::NonPositive(name, value))
    }
}

fn check_limits(min: f64, max: f64) -> Result<(), PlantError> {
    // Negated to also reject NaN
    if !(min <= max) {
        return Err(PlantError::InvalidLimits(min, max));
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp_min() {
        let mut m = Motion {
            position: -0.1,
            velocity: -2.0,
            ..Default::default()
        };
        assert_eq!(clamp_to_travel(&mut m, 0.0, 1.0), Some(TravelLimit::Min));
        assert_eq!(m.position, 0.0);
        assert_eq!(m.velocity, 0.0);
    }

    #[test]
    fn test_clamp_keeps_recovering_velocity() {
        // Past the upper limit but already moving back down
        let mut m = Motion {
            position: 1.2,
            velocity: -0.5,
            ..Default::default()
        };
        assert_eq!(clamp_to_travel(&mut m, 0.0, 1.0), Some(TravelLimit::Max));
        assert_eq!(m.position, 1.0);
        assert_eq!(m.velocity, -0.5);
    }

    #[test]
    fn test_clamp_in_range() {
        let mut m = Motion {
            position: 0.5,
            velocity: 3.0,
            ..Default::default()
        };
        assert_eq!(clamp_to_travel(&mut m, 0.0, 1.0), None);
        assert_eq!(m.position, 0.5);
        assert_eq!(m.velocity, 3.0);
    }

    #[test]
    fn test_integrate_semi_implicit() {
        let mut m = Motion {
            position: 0.0,
            velocity: 1.0,
            acceleration: 10.0,
            ..Default::default()
        };
        assert_eq!(integrate(&mut m, 0.1, -10.0, 10.0), None);
        assert!((m.velocity - 2.0).abs() < 1e-12);
        // Uses the updated velocity
        assert!((m.position - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_checks() {
        assert!(check_positive("mass_kg", 1.0).is_ok());
        assert_eq!(check_positive("mass_kg", 0.0), Err(PlantError::NonPositive("mass_kg", 0.0)));
        assert!(check_positive("mass_kg", f64::INFINITY).is_err());
        assert!(check_limits(0.0, 0.0).is_ok());
        assert!(check_limits(1.0, 0.0).is_err());
        assert!(check_limits(f64::NAN, 0.0).is_err());
    }
}
