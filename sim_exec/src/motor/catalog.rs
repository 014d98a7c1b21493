//! Motor catalog
//!
//! The catalog is an immutable table of motor electrical constants keyed by
//! motor name. It is passed to whatever needs to build a motor model rather
//! than being held globally, so tests and executables can supply their own
//! tables (for example loaded from `motors.toml`).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;

// Internal
use super::{EffectiveMotorModel, MotorError};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Motor used when a requested motor is not in the catalog.
pub const DEFAULT_MOTOR: &str = "NEO";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Electrical constants of a single motor, as given by its datasheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorCatalogEntry {
    /// Speed constant.
    ///
    /// Units: RPM/volt
    pub kv: f64,

    /// Torque constant.
    ///
    /// Units: newton meters/amp
    pub kt: f64,

    /// Winding resistance of one motor.
    ///
    /// Units: ohms
    pub resistance_ohm: f64,

    /// Mass of one motor.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// A table of motors with a designated fallback entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogParams")]
pub struct MotorCatalog {
    default_motor: String,
    motors: BTreeMap<String, MotorCatalogEntry>,
}

/// Unvalidated catalog, as it appears in a parameter file.
#[derive(Deserialize)]
struct CatalogParams {
    #[serde(default = "default_motor_name")]
    default_motor: String,
    motors: BTreeMap<String, MotorCatalogEntry>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl MotorCatalog {
    /// Create a catalog from a table of motors.
    ///
    /// The default motor must be one of the entries.
    pub fn new(
        motors: BTreeMap<String, MotorCatalogEntry>,
        default_motor: &str,
    ) -> Result<Self, MotorError> {
        if !motors.contains_key(default_motor) {
            return Err(MotorError::MissingDefault(default_motor.to_string()));
        }

        Ok(Self {
            default_motor: default_motor.to_string(),
            motors,
        })
    }

    /// The catalog of all supported motors.
    pub fn builtin() -> Self {
        let mut motors = BTreeMap::new();

        for &(name, display_name, kv, kt, resistance_ohm, mass_kg, description) in BUILTIN_MOTORS {
            motors.insert(
                name.to_string(),
                MotorCatalogEntry {
                    kv,
                    kt,
                    resistance_ohm,
                    mass_kg,
                    display_name: Some(display_name.to_string()),
                    description: Some(description.to_string()),
                },
            );
        }

        Self {
            default_motor: DEFAULT_MOTOR.to_string(),
            motors,
        }
    }

    /// Look up a motor by name.
    ///
    /// An exact match is preferred, otherwise the name is matched ignoring
    /// ASCII case (so `KrakenX60` finds `Krakenx60`).
    pub fn get(&self, name: &str) -> Result<&MotorCatalogEntry, MotorError> {
        if let Some(entry) = self.motors.get(name) {
            return Ok(entry);
        }

        self.motors
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, e)| e)
            .ok_or_else(|| MotorError::UnknownMotor(name.to_string()))
    }

    /// Name of the fallback motor.
    pub fn default_motor(&self) -> &str {
        &self.default_motor
    }

    /// Names of all motors in the catalog, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|k| k.as_str())
    }

    /// Build the effective motor model for the named motor.
    pub fn build(
        &self,
        name: &str,
        gear_ratio: f64,
        motor_count: u32,
    ) -> Result<EffectiveMotorModel, MotorError> {
        let entry = self.get(name)?;

        let model = EffectiveMotorModel::from_entry(entry, gear_ratio, motor_count)?;

        info!(
            "Configured {} {} motor(s) with gearing {}:1 (kt: {:.4} Nm/A, R: {:.4} Ohm, mass: {:.3} kg)",
            motor_count,
            name,
            gear_ratio,
            model.kt(),
            model.resistance_ohm(),
            model.mass_kg()
        );

        Ok(model)
    }

    /// Build the effective motor model for the named motor, using the
    /// catalog's default motor if the name is unknown.
    ///
    /// Invalid gearing or motor counts are still errors.
    pub fn build_or_default(
        &self,
        name: &str,
        gear_ratio: f64,
        motor_count: u32,
    ) -> Result<EffectiveMotorModel, MotorError> {
        match self.build(name, gear_ratio, motor_count) {
            Err(MotorError::UnknownMotor(_)) => {
                warn!(
                    "Motor type {} not found in the catalog, using {} as fallback",
                    name, self.default_motor
                );
                self.build(&self.default_motor, gear_ratio, motor_count)
            }
            r => r,
        }
    }
}

impl Default for MotorCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<CatalogParams> for MotorCatalog {
    type Error = MotorError;

    fn try_from(params: CatalogParams) -> Result<Self, Self::Error> {
        Self::new(params.motors, &params.default_motor)
    }
}

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// (name, display name, kv, kt, resistance, mass, description)
static BUILTIN_MOTORS: &[(&str, &str, f64, f64, f64, f64, &str)] = &[
    ("NEO", "NEO", 493.5, 0.0181, 0.066, 0.53977492, "REV Robotics NEO Brushless Motor"),
    ("NEO550", "NEO 550", 985.6, 0.0097, 0.108, 0.2540117, "REV Robotics NEO 550 Brushless Motor"),
    ("Minion", "Minion", 627.6, 0.0155, 0.060, 0.4399846, "REV Robotics Minion Brushless Motor"),
    ("Vortex", "NEO Vortex", 575.1, 0.0171, 0.057, 0.5805982, "REV Robotics NEO Vortex Brushless Motor"),
    ("Cu60", "Redux Cu60", 567.6, 0.0166, 0.027, 0.635029, "Redux Robotics Cu60 Brushless Motor"),
    ("Krakenx44", "Kraken X44", 630.7, 0.0147, 0.044, 0.3401943, "CTRE Kraken X44 Brushless Motor"),
    ("Krakenx60", "Kraken X60", 484.8, 0.0194, 0.025, 0.544311, "CTRE Kraken X60 Brushless Motor"),
];

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_motor_name() -> String {
    DEFAULT_MOTOR.to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builtin() {
        let cat = MotorCatalog::builtin();

        assert_eq!(cat.names().count(), 7);
        assert_eq!(cat.default_motor(), "NEO");

        let neo = cat.get("NEO").unwrap();
        assert_eq!(neo.kv, 493.5);
        assert_eq!(neo.kt, 0.0181);
        assert_eq!(neo.resistance_ohm, 0.066);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let cat = MotorCatalog::builtin();

        assert_eq!(cat.get("KrakenX60").unwrap().kv, 484.8);
        assert_eq!(cat.get("neo550").unwrap().kv, 985.6);
        assert_eq!(
            cat.get("Falcon500"),
            Err(MotorError::UnknownMotor(String::from("Falcon500")))
        );
    }

    #[test]
    fn test_build() {
        let cat = MotorCatalog::builtin();

        let m = cat.build("Cu60", 10.0, 2).unwrap();
        assert!((m.kt() - 0.0166 * 10.0 * 2.0).abs() < 1e-12);

        assert_eq!(
            cat.build("Falcon500", 10.0, 1),
            Err(MotorError::UnknownMotor(String::from("Falcon500")))
        );
        assert_eq!(cat.build("NEO", 0.0, 1), Err(MotorError::InvalidGearRatio(0.0)));
    }

    #[test]
    fn test_build_or_default() {
        let cat = MotorCatalog::builtin();

        let fallback = cat.build_or_default("Falcon500", 15.0, 1).unwrap();
        assert_eq!(fallback, cat.build("NEO", 15.0, 1).unwrap());

        // Only unknown motors fall back
        assert_eq!(
            cat.build_or_default("Falcon500", 15.0, 0),
            Err(MotorError::InvalidMotorCount(0))
        );
    }

    #[test]
    fn test_from_params() {
        let cat: MotorCatalog = util::params::from_str(
            "default_motor = \"Test\"\n\
             [motors.Test]\n\
             kv = 100.0\n\
             kt = 0.1\n\
             resistance_ohm = 0.1\n\
             mass_kg = 1.0\n",
        )
        .unwrap();
        assert_eq!(cat.get("Test").unwrap().kv, 100.0);
        assert_eq!(cat.default_motor(), "Test");

        let e = util::params::from_str::<MotorCatalog>(
            "default_motor = \"Missing\"\n\
             [motors.Test]\n\
             kv = 100.0\n\
             kt = 0.1\n\
             resistance_ohm = 0.1\n\
             mass_kg = 1.0\n",
        );
        assert!(e.is_err());
    }
}
