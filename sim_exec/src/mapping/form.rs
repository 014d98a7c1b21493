//! External mechanism description

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use super::LBS_TO_KG;
use crate::sim::MechanismKind;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A mechanism as described by the user.
///
/// Angles are in degrees. Fields left out take the defaults documented on
/// each item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismForm {
    /// One of `Arm`, `Elevator` or `Pivot`. Kept as free text so that an
    /// unknown type is reported when the form is mapped rather than when it
    /// is loaded.
    pub mechanism_type: String,

    /// Name of the motor in the catalog.
    pub motor_type: String,

    /// Reduction between the motor and the mechanism.
    pub gear_ratio: f64,

    pub pid_values: PidValues,

    /// Feedforward gains, all zero if left out.
    #[serde(default)]
    pub feedforward: Option<FeedforwardValues>,

    #[serde(default)]
    pub arm_params: Option<ArmForm>,

    #[serde(default)]
    pub elevator_params: Option<ElevatorForm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidValues {
    pub k_p: f64,
    pub k_i: f64,
    pub k_d: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedforwardValues {
    #[serde(default)]
    pub k_s: f64,
    #[serde(default)]
    pub k_v: f64,
    #[serde(default)]
    pub k_a: f64,
    #[serde(default)]
    pub k_g: f64,
}

/// Arm description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmForm {
    /// Units: meters, default 1.0
    #[serde(default)]
    pub length: Option<f64>,

    /// Units: `mass_unit`, default 5.0 kg
    #[serde(default)]
    pub mass: Option<f64>,

    #[serde(default)]
    pub mass_unit: MassUnit,

    /// Units: degrees, default -90
    #[serde(default)]
    pub hard_limit_min: Option<f64>,

    /// Units: degrees, default 90
    #[serde(default)]
    pub hard_limit_max: Option<f64>,

    /// Units: degrees, default 0
    #[serde(default)]
    pub starting_position: Option<f64>,
}

/// Elevator description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevatorForm {
    /// Units: `mass_unit`, default 5.0 kg
    #[serde(default)]
    pub mass: Option<f64>,

    #[serde(default)]
    pub mass_unit: MassUnit,

    /// Units: meters, default 0.0254
    #[serde(default)]
    pub drum_radius: Option<f64>,

    /// Units: meters, default 0
    #[serde(default)]
    pub hard_limit_min: Option<f64>,

    /// Units: meters, default 1.0
    #[serde(default)]
    pub hard_limit_max: Option<f64>,

    /// Units: meters, default 0
    #[serde(default)]
    pub starting_height: Option<f64>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    Kg,
    Lbs,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MechanismForm {
    /// The mechanism kind, or `None` if the type is not recognised.
    pub fn kind(&self) -> Option<MechanismKind> {
        self.mechanism_type.parse().ok()
    }
}

impl Default for MassUnit {
    fn default() -> Self {
        MassUnit::Kg
    }
}

impl MassUnit {
    /// Convert a mass in this unit to kilograms.
    pub fn to_kg(&self, mass: f64) -> f64 {
        match self {
            MassUnit::Kg => mass,
            MassUnit::Lbs => mass * LBS_TO_KG,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_form() {
        let form: MechanismForm = util::params::from_str(
            r#"
            mechanism_type = "Arm"
            motor_type = "NEO"
            gear_ratio = 15.0

            [pid_values]
            k_p = 1.0
            k_i = 0.0
            k_d = 0.1

            [arm_params]
            length = 0.8
            mass = 10.0
            mass_unit = "lbs"
            hard_limit_max = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(form.kind(), Some(MechanismKind::Arm));
        assert_eq!(form.feedforward, None);
        assert_eq!(form.elevator_params, None);

        let arm = form.arm_params.unwrap();
        assert_eq!(arm.mass_unit, MassUnit::Lbs);
        assert_eq!(arm.hard_limit_min, None);
        assert_eq!(arm.hard_limit_max, Some(120.0));
    }

    #[test]
    fn test_mass_unit() {
        assert_eq!(MassUnit::Kg.to_kg(5.0), 5.0);
        assert!((MassUnit::Lbs.to_kg(10.0) - 4.53592).abs() < 1e-12);
    }
}
