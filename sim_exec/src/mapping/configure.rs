//! Mapping a mechanism description to a simulation configuration

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{ArmForm, ElevatorForm, MappingError, MechanismForm};
use crate::control::{ControlGains, ControlMode};
use crate::motor::MotorCatalog;
use crate::plant::{ArmParams, ElevatorParams, Plant};
use crate::sim::{MechanismKind, SimConfig, DEFAULT_DT_S};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

const DEFAULT_ARM_LENGTH_M: f64 = 1.0;
const DEFAULT_MASS_KG: f64 = 5.0;
const DEFAULT_ARM_LIMIT_DEG: f64 = 90.0;

/// One inch.
const DEFAULT_DRUM_RADIUS_M: f64 = 0.0254;
const DEFAULT_MAX_HEIGHT_M: f64 = 1.0;

const PIVOT_LENGTH_M: f64 = 0.3;
const PIVOT_MASS_KG: f64 = 2.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Build the simulation configuration for a mechanism driven by
/// `motor_count` motors.
///
/// Masses are converted to kilograms and angles to radians. An unknown motor
/// falls back to the catalog's default motor, an unknown mechanism type is an
/// error. The configuration starts in position mode with the default step.
pub fn configure(
    form: &MechanismForm,
    motor_count: u32,
    catalog: &MotorCatalog,
) -> Result<SimConfig, MappingError> {
    let kind = form
        .kind()
        .ok_or_else(|| MappingError::UnknownMechanism(form.mechanism_type.clone()))?;

    let motor = catalog.build_or_default(&form.motor_type, form.gear_ratio, motor_count)?;

    let ff = form.feedforward.unwrap_or_default();
    let mut gains = ControlGains {
        k_p: form.pid_values.k_p,
        k_i: form.pid_values.k_i,
        k_d: form.pid_values.k_d,
        k_s: ff.k_s,
        k_v: ff.k_v,
        k_a: ff.k_a,
        k_g: ff.k_g,
    };

    let plant = match kind {
        MechanismKind::Arm => Plant::Arm(arm_params(&form.arm_params.unwrap_or_default())),
        MechanismKind::Elevator => {
            Plant::Elevator(elevator_params(&form.elevator_params.unwrap_or_default()))
        }
        MechanismKind::Pivot => {
            // Fixed geometry, no gravity compensation
            gains.k_g = 0.0;
            Plant::Arm(ArmParams::new(
                PIVOT_LENGTH_M,
                PIVOT_MASS_KG,
                -DEFAULT_ARM_LIMIT_DEG.to_radians(),
                DEFAULT_ARM_LIMIT_DEG.to_radians(),
                0.0,
            ))
        }
    };

    let config = SimConfig {
        kind,
        plant,
        gains,
        motor,
        mode: ControlMode::Position,
        dt_s: DEFAULT_DT_S,
    };
    config.validate()?;

    debug!("Mapped {} configuration: {:?}", kind, config);

    Ok(config)
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn arm_params(arm: &ArmForm) -> ArmParams {
    ArmParams::new(
        arm.length.unwrap_or(DEFAULT_ARM_LENGTH_M),
        arm.mass_unit.to_kg(arm.mass.unwrap_or(DEFAULT_MASS_KG)),
        arm.hard_limit_min.unwrap_or(-DEFAULT_ARM_LIMIT_DEG).to_radians(),
        arm.hard_limit_max.unwrap_or(DEFAULT_ARM_LIMIT_DEG).to_radians(),
        arm.starting_position.unwrap_or(0.0).to_radians(),
    )
}

fn elevator_params(elevator: &ElevatorForm) -> ElevatorParams {
    ElevatorParams {
        mass_kg: elevator.mass_unit.to_kg(elevator.mass.unwrap_or(DEFAULT_MASS_KG)),
        drum_radius_m: elevator.drum_radius.unwrap_or(DEFAULT_DRUM_RADIUS_M),
        min_height_m: elevator.hard_limit_min.unwrap_or(0.0),
        max_height_m: elevator.hard_limit_max.unwrap_or(DEFAULT_MAX_HEIGHT_M),
        starting_height_m: elevator.starting_height.unwrap_or(0.0),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mapping::{FeedforwardValues, MassUnit, PidValues};
    use crate::motor::MotorError;
    use crate::sim::SimError;
    use std::f64::consts::FRAC_PI_2;

    fn form(mechanism_type: &str) -> MechanismForm {
        MechanismForm {
            mechanism_type: mechanism_type.into(),
            motor_type: "NEO".into(),
            gear_ratio: 15.0,
            pid_values: PidValues {
                k_p: 1.0,
                k_i: 0.0,
                k_d: 0.0,
            },
            feedforward: None,
            arm_params: None,
            elevator_params: None,
        }
    }

    #[test]
    fn test_arm_defaults() {
        let cfg = configure(&form("Arm"), 1, &MotorCatalog::builtin()).unwrap();

        assert_eq!(cfg.kind, MechanismKind::Arm);
        assert_eq!(cfg.gains.k_p, 1.0);
        assert_eq!(cfg.gains.k_g, 0.0);
        assert_eq!(cfg.dt_s, DEFAULT_DT_S);
        assert_eq!(cfg.mode, ControlMode::Position);

        match cfg.plant {
            Plant::Arm(p) => {
                assert_eq!(p.length_m, 1.0);
                assert_eq!(p.mass_kg, 5.0);
                assert!((p.moi_kgm2 - 5.0 / 3.0).abs() < 1e-12);
                assert!((p.min_angle_rad + FRAC_PI_2).abs() < 1e-12);
                assert!((p.max_angle_rad - FRAC_PI_2).abs() < 1e-12);
                assert_eq!(p.starting_angle_rad, 0.0);
            }
            p => panic!("Expected an arm plant, found {:?}", p),
        }
    }

    #[test]
    fn test_arm_conversions() {
        let mut f = form("Arm");
        f.arm_params = Some(ArmForm {
            length: Some(0.5),
            mass: Some(10.0),
            mass_unit: MassUnit::Lbs,
            hard_limit_min: Some(-45.0),
            hard_limit_max: Some(180.0),
            starting_position: Some(30.0),
        });
        f.feedforward = Some(FeedforwardValues {
            k_g: 0.4,
            k_s: 0.1,
            ..Default::default()
        });

        let cfg = configure(&f, 2, &MotorCatalog::builtin()).unwrap();

        assert_eq!(cfg.gains.k_g, 0.4);
        assert_eq!(cfg.gains.k_s, 0.1);
        assert_eq!(cfg.motor.motor_count(), 2);

        match cfg.plant {
            Plant::Arm(p) => {
                assert!((p.mass_kg - 4.53592).abs() < 1e-12);
                assert!((p.min_angle_rad + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
                assert!((p.max_angle_rad - std::f64::consts::PI).abs() < 1e-12);
                assert!((p.starting_angle_rad - 30f64.to_radians()).abs() < 1e-12);
            }
            p => panic!("Expected an arm plant, found {:?}", p),
        }
    }

    #[test]
    fn test_elevator() {
        let cfg = configure(&form("Elevator"), 1, &MotorCatalog::builtin()).unwrap();
        assert_eq!(
            cfg.plant,
            Plant::Elevator(ElevatorParams {
                mass_kg: 5.0,
                drum_radius_m: 0.0254,
                min_height_m: 0.0,
                max_height_m: 1.0,
                starting_height_m: 0.0,
            })
        );

        let mut f = form("Elevator");
        f.elevator_params = Some(ElevatorForm {
            mass: Some(20.0),
            mass_unit: MassUnit::Lbs,
            drum_radius: Some(0.02),
            hard_limit_max: Some(1.5),
            starting_height: Some(0.2),
            ..Default::default()
        });
        let cfg = configure(&f, 1, &MotorCatalog::builtin()).unwrap();
        match cfg.plant {
            Plant::Elevator(p) => {
                assert!((p.mass_kg - 9.07184).abs() < 1e-12);
                assert_eq!(p.drum_radius_m, 0.02);
                assert_eq!(p.max_height_m, 1.5);
                assert_eq!(p.starting_height_m, 0.2);
            }
            p => panic!("Expected an elevator plant, found {:?}", p),
        }
    }

    #[test]
    fn test_pivot() {
        let mut f = form("Pivot");
        f.feedforward = Some(FeedforwardValues {
            k_g: 1.5,
            k_v: 0.2,
            ..Default::default()
        });
        // Ignored for a pivot
        f.arm_params = Some(ArmForm {
            length: Some(2.0),
            ..Default::default()
        });

        let cfg = configure(&f, 1, &MotorCatalog::builtin()).unwrap();

        assert_eq!(cfg.kind, MechanismKind::Pivot);
        assert_eq!(cfg.gains.k_g, 0.0);
        assert_eq!(cfg.gains.k_v, 0.2);
        match cfg.plant {
            Plant::Arm(p) => {
                assert_eq!(p.length_m, 0.3);
                assert_eq!(p.mass_kg, 2.0);
                assert_eq!(p.starting_angle_rad, 0.0);
            }
            p => panic!("Expected an arm plant, found {:?}", p),
        }
    }

    #[test]
    fn test_unknown_mechanism() {
        assert_eq!(
            configure(&form("Turret"), 1, &MotorCatalog::builtin()),
            Err(MappingError::UnknownMechanism("Turret".into()))
        );
    }

    #[test]
    fn test_unknown_motor_falls_back() {
        let mut f = form("Arm");
        f.motor_type = "KrakenX60".into();
        let kraken = configure(&f, 1, &MotorCatalog::builtin()).unwrap();
        let expected = MotorCatalog::builtin().build("Krakenx60", 15.0, 1).unwrap();
        assert_eq!(kraken.motor, expected);

        f.motor_type = "Falcon".into();
        let fallback = configure(&f, 1, &MotorCatalog::builtin()).unwrap();
        let neo = MotorCatalog::builtin().build("NEO", 15.0, 1).unwrap();
        assert_eq!(fallback.motor, neo);
    }

    #[test]
    fn test_invalid() {
        let mut f = form("Arm");
        f.gear_ratio = 0.0;
        assert_eq!(
            configure(&f, 1, &MotorCatalog::builtin()),
            Err(MappingError::MotorError(MotorError::InvalidGearRatio(0.0)))
        );

        assert_eq!(
            configure(&form("Arm"), 0, &MotorCatalog::builtin()),
            Err(MappingError::MotorError(MotorError::InvalidMotorCount(0)))
        );

        let mut f = form("Elevator");
        f.pid_values.k_d = -1.0;
        assert!(matches!(
            configure(&f, 1, &MotorCatalog::builtin()),
            Err(MappingError::InvalidConfig(SimError::InvalidControl(_)))
        ));

        let mut f = form("Elevator");
        f.elevator_params = Some(ElevatorForm {
            mass: Some(0.0),
            ..Default::default()
        });
        assert!(matches!(
            configure(&f, 1, &MotorCatalog::builtin()),
            Err(MappingError::InvalidConfig(SimError::InvalidPlant(_)))
        ));
    }
}
