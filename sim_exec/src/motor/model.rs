//! Effective motor model
//!
//! The effective model folds the gearbox and the number of motors into a
//! single equivalent motor as seen from the mechanism's output shaft.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::{MotorCatalogEntry, MotorError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Electrical model of the motors driving a mechanism, including gearing.
///
/// Fields are private so that a model can only exist in a validated state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveMotorModel {
    /// Speed constant at the output shaft.
    ///
    /// Units: RPM/volt
    kv: f64,

    /// Torque constant at the output shaft, summed over all motors.
    ///
    /// Units: newton meters/amp
    kt: f64,

    /// Winding resistance of all motors in parallel.
    ///
    /// Units: ohms
    resistance_ohm: f64,

    /// Total mass of all motors.
    ///
    /// Units: kilograms
    mass_kg: f64,

    /// Reduction between the motor shaft and the output shaft.
    gear_ratio: f64,

    /// Number of motors driving the mechanism.
    motor_count: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl EffectiveMotorModel {
    /// Build the effective model for `motor_count` motors of the given type
    /// driving through a `gear_ratio`:1 reduction.
    pub fn from_entry(
        entry: &MotorCatalogEntry,
        gear_ratio: f64,
        motor_count: u32,
    ) -> Result<Self, MotorError> {
        if !(gear_ratio.is_finite() && gear_ratio > 0.0) {
            return Err(MotorError::InvalidGearRatio(gear_ratio));
        }
        if motor_count == 0 {
            return Err(MotorError::InvalidMotorCount(motor_count));
        }

        let count = motor_count as f64;

        Ok(Self {
            kv: entry.kv / gear_ratio,
            kt: entry.kt * gear_ratio * count,
            // Windings are in parallel
            resistance_ohm: entry.resistance_ohm / count,
            mass_kg: entry.mass_kg * count,
            gear_ratio,
            motor_count,
        })
    }

    /// Speed constant at the output shaft (RPM/volt).
    pub fn kv(&self) -> f64 {
        self.kv
    }

    /// Torque constant at the output shaft (newton meters/amp).
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Equivalent winding resistance (ohms).
    pub fn resistance_ohm(&self) -> f64 {
        self.resistance_ohm
    }

    /// Total motor mass (kilograms).
    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn gear_ratio(&self) -> f64 {
        self.gear_ratio
    }

    pub fn motor_count(&self) -> u32 {
        self.motor_count
    }

    /// Voltage needed at stall to produce `torque_nm` at the output shaft.
    pub fn stall_voltage_for_torque(&self, torque_nm: f64) -> f64 {
        torque_nm * self.resistance_ohm / self.kt
    }
}
