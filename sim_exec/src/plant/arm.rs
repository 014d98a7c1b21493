//! Arm plant
//!
//! A link of length `L` pivoting at one end, driven at the pivot. Gravity
//! acts on the centre of the link.

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

/// Parameters of an arm plant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArmParams {
    /// Length of the link.
    ///
    /// Units: meters
    pub length_m: f64,

    /// Lumped mass of the link and anything it carries.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Moment of inertia about the pivot.
    ///
    /// Units: kilogram meters^2
    pub moi_kgm2: f64,

    /// Lower travel limit.
    ///
    /// Units: radians
    pub min_angle_rad: f64,

    /// Upper travel limit.
    ///
    /// Units: radians
    pub max_angle_rad: f64,

    /// Units: radians
    pub starting_angle_rad: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmParams {
    /// Create arm parameters, modelling the link as a uniform rod pivoting at
    /// one end (`J = m * L^2 / 3`).
    pub fn new(
        length_m: f64,
        mass_kg: f64,
        min_angle_rad: f64,
        max_angle_rad: f64,
        starting_angle_rad: f64,
    ) -> Self {
        Self {
            length_m,
            mass_kg,
            moi_kgm2: mass_kg * length_m * length_m / 3.0,
            min_angle_rad,
            max_angle_rad,
            starting_angle_rad,
        }
    }

    /// Replace the default moment of inertia.
    pub fn with_moi(mut self, moi_kgm2: f64) -> Self {
        self.moi_kgm2 = moi_kgm2;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PlantError> {
        check_positive("length_m", self.length_m)?;
        check_positive("mass_kg", self.mass_kg)?;
        check_positive("moi_kgm2", self.moi_kgm2)?;
        check_limits(self.min_angle_rad, self.max_angle_rad)
    }

    /// Gravity torque about the pivot at `angle_rad`.
    ///
    /// Units: newton meters
    pub fn gravity_torque_nm(&self, angle_rad: f64) -> f64 {
        self.mass_kg * GRAVITY_MS2 * (self.length_m / 2.0) * angle_rad.sin()
    }

    pub(crate) fn physics_step(
        &self,
        motion: &mut Motion,
        voltage_v: f64,
        motor: &EffectiveMotorModel,
        dt_s: f64,
    ) -> Option<TravelLimit> {
        motion.current_a = motor_current(voltage_v, motion.velocity, motor);
        let motor_torque_nm = motion.current_a * motor.kt();

        let net_torque_nm = motor_torque_nm - self.gravity_torque_nm(motion.position);
        motion.acceleration = net_torque_nm / self.moi_kgm2;

        integrate(motion, dt_s, self.min_angle_rad, self.max_angle_rad)
    }
}
