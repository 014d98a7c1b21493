//! # Simulation commands
//!
//! Commands change what the simulation is asked to do. They are issued by
//! scripts, one JSON object per entry, for example:
//!
//! ```text
//! 0.0: {"type": "SetControlMode", "mode": "position"};
//! 0.5: {"type": "SetTarget", "value": 45.0};
//! ```

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};

// Internal
use crate::control::ControlMode;
use crate::mapping::MechanismForm;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A command to the simulation control module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCmd {
    /// Set the position target.
    ///
    /// Units: degrees for angular mechanisms, meters for the elevator
    SetTarget { value: f64 },

    /// Set the velocity target.
    ///
    /// Units: degrees/second for angular mechanisms, meters/second for the
    /// elevator
    SetTargetVelocity { value: f64 },

    SetControlMode { mode: ControlMode },

    /// Replace the simulation with one built from a new mechanism
    /// description.
    Reconfigure {
        form: Box<MechanismForm>,

        /// Keeps the current motor count if not given.
        #[serde(default)]
        motor_count: Option<u32>,
    },

    /// Rebuild the simulation from its current configuration, back at its
    /// starting position.
    Reset,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let cmd: SimCmd = serde_json::from_str(r#"{"type": "SetTarget", "value": 45.0}"#).unwrap();
        assert_eq!(cmd, SimCmd::SetTarget { value: 45.0 });

        let cmd: SimCmd =
            serde_json::from_str(r#"{"type": "SetControlMode", "mode": "velocity"}"#).unwrap();
        assert_eq!(
            cmd,
            SimCmd::SetControlMode {
                mode: ControlMode::Velocity
            }
        );

        let cmd: SimCmd = serde_json::from_str(r#"{"type": "Reset"}"#).unwrap();
        assert_eq!(cmd, SimCmd::Reset);

        let cmd: SimCmd = serde_json::from_str(
            r#"{
                "type": "Reconfigure",
                "form": {
                    "mechanism_type": "Elevator",
                    "motor_type": "Krakenx60",
                    "gear_ratio": 8.0,
                    "pid_values": {"k_p": 20.0, "k_i": 0.0, "k_d": 0.5}
                }
            }"#,
        )
        .unwrap();
        match cmd {
            SimCmd::Reconfigure { form, motor_count } => {
                assert_eq!(form.mechanism_type, "Elevator");
                assert_eq!(motor_count, None);
            }
            c => panic!("Expected Reconfigure, found {:?}", c),
        }

        assert!(serde_json::from_str::<SimCmd>(r#"{"type": "Explode"}"#).is_err());
    }

    #[test]
    fn test_example_script() {
        use util::script_interpreter::{PendingCmds, ScriptInterpreter};

        let mut si: ScriptInterpreter<SimCmd> = ScriptInterpreter::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../scripts/arm_step.sps"
        ))
        .unwrap();

        assert_eq!(si.get_num_cmds(), 7);
        assert_eq!(si.get_duration(), 9.0);

        assert_eq!(
            si.get_pending(0.0),
            PendingCmds::Some(vec![SimCmd::SetTarget { value: 45.0 }])
        );
        assert_eq!(si.get_pending(3.9), PendingCmds::None);
        match si.get_pending(6.0) {
            PendingCmds::Some(cmds) => assert_eq!(cmds.len(), 5),
            p => panic!("Expected commands, found {:?}", p),
        }
    }
}
