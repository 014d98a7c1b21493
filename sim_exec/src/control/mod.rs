//! Control-loop primitives
//!
//! Gains, the control mode state machine, PID accumulation and feedforward.
//! The controller is naive: there is no integral clamping (anti-windup) and
//! the time step is not guarded.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod feedforward;
mod pid;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Internal
pub use feedforward::*;
pub use pid::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Nominal battery voltage, the saturation limit of the applied voltage.
///
/// Units: volts
pub const MAX_VOLTAGE_V: f64 = 12.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// PID and feedforward gains for a mechanism.
///
/// Output of every term is in volts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlGains {
    // ---- PID ----
    /// Proportional gain, must be non-negative.
    #[serde(default)]
    pub k_p: f64,

    /// Integral gain, must be non-negative.
    #[serde(default)]
    pub k_i: f64,

    /// Derivative gain, must be non-negative.
    #[serde(default)]
    pub k_d: f64,

    // ---- FEEDFORWARD ----
    /// Static friction gain, applied in the direction of motion.
    #[serde(default)]
    pub k_s: f64,

    /// Velocity gain.
    #[serde(default)]
    pub k_v: f64,

    /// Acceleration gain.
    #[serde(default)]
    pub k_a: f64,

    /// Gravity gain.
    #[serde(default)]
    pub k_g: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which quantity the PID loop tracks.
///
/// Switching mode keeps the PID integral and previous error, so the first
/// tick after a switch sees a derivative kick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    Position,
    Velocity,
}

/// Possible errors in the control configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    #[error("Gain {0} must be non-negative, found {1}")]
    NegativeGain(&'static str, f64),

    #[error("Unknown control mode: {0}")]
    UnknownMode(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlGains {
    /// Check the PID gains are non-negative.
    pub fn validate(&self) -> Result<(), ControlError> {
        for &(name, k) in &[("kP", self.k_p), ("kI", self.k_i), ("kD", self.k_d)] {
            // NaN is rejected too
            if !(k >= 0.0) {
                return Err(ControlError::NegativeGain(name, k));
            }
        }

        Ok(())
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        ControlMode::Position
    }
}

impl FromStr for ControlMode {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "position" => Ok(ControlMode::Position),
            "velocity" => Ok(ControlMode::Velocity),
            _ => Err(ControlError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlMode::Position => write!(f, "position"),
            ControlMode::Velocity => write!(f, "velocity"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert_eq!(ControlGains::default().validate(), Ok(()));

        let gains = ControlGains {
            k_s: -1.0,
            k_g: -0.5,
            ..Default::default()
        };
        assert_eq!(gains.validate(), Ok(()));

        let gains = ControlGains {
            k_i: -0.1,
            ..Default::default()
        };
        assert_eq!(gains.validate(), Err(ControlError::NegativeGain("kI", -0.1)));

        let gains = ControlGains {
            k_d: f64::NAN,
            ..Default::default()
        };
        assert!(gains.validate().is_err());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("Position".parse::<ControlMode>(), Ok(ControlMode::Position));
        assert_eq!("velocity".parse::<ControlMode>(), Ok(ControlMode::Velocity));
        assert!("torque".parse::<ControlMode>().is_err());
        assert_eq!(ControlMode::Velocity.to_string(), "velocity");
    }
}
