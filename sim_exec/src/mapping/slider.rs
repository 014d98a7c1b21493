//! Target ranges and unit conversion
//!
//! Targets are entered in display units (degrees for angular mechanisms) and
//! converted before being handed to the simulation.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::MechanismForm;
use crate::control::ControlMode;
use crate::sim::MechanismKind;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Range of targets that can be requested for a mechanism, in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: &'static str,
    pub initial_value: f64,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the target range for the mechanism in the given control mode.
///
/// Unknown mechanism types get a generic unitless range.
pub fn slider_range(form: &MechanismForm, mode: ControlMode) -> SliderRange {
    let kind = match form.kind() {
        Some(k) => k,
        None => return SliderRange::generic(),
    };

    match (mode, kind) {
        (ControlMode::Position, MechanismKind::Arm) => {
            let arm = form.arm_params.unwrap_or_default();
            SliderRange {
                min: arm.hard_limit_min.unwrap_or(-90.0),
                max: arm.hard_limit_max.unwrap_or(90.0),
                step: 1.0,
                unit: "°",
                initial_value: arm.starting_position.unwrap_or(0.0),
            }
        }
        (ControlMode::Position, MechanismKind::Elevator) => {
            let elevator = form.elevator_params.unwrap_or_default();
            SliderRange {
                min: elevator.hard_limit_min.unwrap_or(0.0),
                max: elevator.hard_limit_max.unwrap_or(1.0),
                step: 0.01,
                unit: "m",
                initial_value: elevator.starting_height.unwrap_or(0.0),
            }
        }
        (ControlMode::Position, MechanismKind::Pivot) => SliderRange {
            min: -90.0,
            max: 90.0,
            step: 1.0,
            unit: "°",
            initial_value: 0.0,
        },
        (ControlMode::Velocity, MechanismKind::Arm)
        | (ControlMode::Velocity, MechanismKind::Pivot) => SliderRange {
            min: -90.0,
            max: 90.0,
            step: 1.0,
            unit: "°/s",
            initial_value: 0.0,
        },
        (ControlMode::Velocity, MechanismKind::Elevator) => SliderRange {
            min: -1.0,
            max: 1.0,
            step: 0.01,
            unit: "m/s",
            initial_value: 0.0,
        },
    }
}

/// Convert a target in display units into simulation units.
///
/// Position and velocity targets share a scale factor: degrees (or
/// degrees/second) become radians (or radians/second) for angular
/// mechanisms, elevator targets are already in meters.
pub fn convert_target(value: f64, kind: MechanismKind) -> f64 {
    match kind {
        MechanismKind::Arm | MechanismKind::Pivot => value.to_radians(),
        MechanismKind::Elevator => value,
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SliderRange {
    fn generic() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            step: 0.1,
            unit: "",
            initial_value: 0.0,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mapping::{ArmForm, ElevatorForm, PidValues};

    fn form(mechanism_type: &str) -> MechanismForm {
        MechanismForm {
            mechanism_type: mechanism_type.into(),
            motor_type: "NEO".into(),
            gear_ratio: 10.0,
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
    fn test_arm_position() {
        let r = slider_range(&form("Arm"), ControlMode::Position);
        assert_eq!(
            r,
            SliderRange {
                min: -90.0,
                max: 90.0,
                step: 1.0,
                unit: "°",
                initial_value: 0.0
            }
        );

        let mut f = form("Arm");
        f.arm_params = Some(ArmForm {
            hard_limit_min: Some(-30.0),
            hard_limit_max: Some(150.0),
            starting_position: Some(10.0),
            ..Default::default()
        });
        let r = slider_range(&f, ControlMode::Position);
        assert_eq!((r.min, r.max, r.initial_value), (-30.0, 150.0, 10.0));
    }

    #[test]
    fn test_elevator_position() {
        let mut f = form("Elevator");
        f.elevator_params = Some(ElevatorForm {
            hard_limit_max: Some(1.8),
            starting_height: Some(0.3),
            ..Default::default()
        });
        let r = slider_range(&f, ControlMode::Position);

        assert_eq!(r.min, 0.0);
        assert_eq!(r.max, 1.8);
        assert_eq!(r.step, 0.01);
        assert_eq!(r.unit, "m");
        assert_eq!(r.initial_value, 0.3);
    }

    #[test]
    fn test_velocity() {
        let arm = slider_range(&form("Arm"), ControlMode::Velocity);
        let pivot = slider_range(&form("Pivot"), ControlMode::Velocity);
        assert_eq!(arm, pivot);
        assert_eq!(arm.unit, "°/s");
        assert_eq!(arm.max, 90.0);

        let elevator = slider_range(&form("Elevator"), ControlMode::Velocity);
        assert_eq!((elevator.min, elevator.max, elevator.unit), (-1.0, 1.0, "m/s"));
    }

    #[test]
    fn test_unknown() {
        for &mode in &[ControlMode::Position, ControlMode::Velocity] {
            assert_eq!(slider_range(&form("Turret"), mode), SliderRange::generic());
        }
    }

    #[test]
    fn test_convert_target() {
        let rad = convert_target(45.0, MechanismKind::Arm);
        assert!((rad - std::f64::consts::FRAC_PI_4).abs() < 1e-12);

        let rads = convert_target(-90.0, MechanismKind::Pivot);
        assert!((rads + std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        assert_eq!(convert_target(0.5, MechanismKind::Elevator), 0.5);
        assert_eq!(convert_target(-0.2, MechanismKind::Elevator), -0.2);

        // Scale agrees with the angular slider units
        for kind in [MechanismKind::Arm, MechanismKind::Pivot].iter() {
            assert!(kind.is_angular());
            let r = convert_target(180.0, *kind);
            assert!((r - std::f64::consts::PI).abs() < 1e-12);
        }
    }
}
