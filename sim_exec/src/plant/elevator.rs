//! Elevator plant
//!
//! A carriage hung from a cable wound on a drum on the gearbox output shaft.
//! The linear motion is mapped onto the drum's rotation so the same motor
//! model drives both plants.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::*;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters of an elevator plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevatorParams {
    /// Mass of the carriage and its load.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Radius of the cable drum.
    ///
    /// Units: meters
    pub drum_radius_m: f64,

    /// Lower travel limit.
    ///
    /// Units: meters
    pub min_height_m: f64,

    /// Upper travel limit.
    ///
    /// Units: meters
    pub max_height_m: f64,

    /// Units: meters
    pub starting_height_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ElevatorParams {
    pub(crate) fn validate(&self) -> Result<(), PlantError> {
        check_positive("mass_kg", self.mass_kg)?;
        check_positive("drum_radius_m", self.drum_radius_m)?;
        check_limits(self.min_height_m, self.max_height_m)
    }

    /// Gravity torque on the drum. Independent of height.
    ///
    /// Units: newton meters
    pub fn gravity_torque_nm(&self) -> f64 {
        self.mass_kg * GRAVITY_MS2 * self.drum_radius_m
    }

    /// Inertia of the carriage reflected onto the drum.
    ///
    /// Units: kilogram meters^2
    pub fn drum_inertia_kgm2(&self) -> f64 {
        self.mass_kg * self.drum_radius_m * self.drum_radius_m
    }

    pub(crate) fn physics_step(
        &self,
        motion: &mut Motion,
        voltage_v: f64,
        motor: &EffectiveMotorModel,
        dt_s: f64,
    ) -> Option<TravelLimit> {
        let drum_rate_rads = motion.velocity / self.drum_radius_m;

        motion.current_a = motor_current(voltage_v, drum_rate_rads, motor);
        let motor_torque_nm = motion.current_a * motor.kt();

        let net_torque_nm = motor_torque_nm - self.gravity_torque_nm();
        let drum_acc_rads2 = net_torque_nm / self.drum_inertia_kgm2();
        motion.acceleration = drum_acc_rads2 * self.drum_radius_m;

        integrate(motion, dt_s, self.min_height_m, self.max_height_m)
    }
}
