//! Implementations for the SimCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, warn};
use serde::Serialize;

// Internal
use super::{Params, SimCtrlError};
use crate::cmd::SimCmd;
use crate::mapping::{self, MechanismForm};
use crate::motor::MotorCatalog;
use crate::plant::TravelLimit;
use crate::sim::{SimConfig, Simulation, Snapshot};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulation control module state
#[derive(Default)]
pub struct SimCtrl {
    catalog: MotorCatalog,

    /// Description the live simulation was built from.
    form: Option<MechanismForm>,
    motor_count: u32,

    sim: Option<Simulation>,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<Snapshot>,
    arch_output: Archiver,
}

/// Input data to SimCtrl.
#[derive(Debug, Default, Clone)]
pub struct InputData {
    /// Commands to apply before stepping, in order.
    pub cmds: Vec<SimCmd>,

    /// Step to use for this and later cycles, `None` keeps the current step.
    ///
    /// Units: seconds
    pub dt_s: Option<f64>,
}

/// Status report for SimCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The controller asked for more than the supply voltage.
    pub voltage_saturated: bool,

    /// Travel limit the mechanism was stopped at.
    pub limit_hit: Option<TravelLimit>,

    /// A reconfiguration was rejected and the previous simulation kept.
    pub reconfigure_rejected: bool,

    pub num_cmds_applied: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for SimCtrl {
    type InitData = &'static str;
    type InitError = SimCtrlError;

    type InputData = InputData;
    type OutputData = Snapshot;
    type StatusReport = StatusReport;
    type ProcError = SimCtrlError;

    /// Initialise the SimCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)
            .map_err(SimCtrlError::ParamLoadError)?;

        let catalog = match params.motor_catalog {
            Some(ref path) => params::load(path)
                .map_err(SimCtrlError::CatalogLoadError)?,
            None => MotorCatalog::builtin(),
        };

        *self = Self::from_params(params, catalog)?;

        self.arch_report = Archiver::from_path(session, "sim_ctrl/status_report.csv")?;
        self.arch_output = Archiver::from_path(session, "sim_ctrl/snapshot.csv")?;

        Ok(())
    }

    /// Perform cyclic processing of SimCtrl.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();

        for cmd in input_data.cmds.iter() {
            self.apply(cmd)?;
            self.report.num_cmds_applied += 1;
        }

        let sim = self.sim.as_mut().ok_or(SimCtrlError::NotInitialised)?;

        let output = sim.tick(input_data.dt_s);
        self.report.voltage_saturated = sim.voltage_saturated();
        self.report.limit_hit = sim.last_limit();

        self.output = Some(output);

        Ok((output, self.report))
    }
}

impl Archived for SimCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)?;
        if let Some(output) = self.output {
            self.arch_output.serialise(output)?;
        }

        Ok(())
    }
}

impl SimCtrl {
    /// Build the module directly from its parameters, without archiving.
    pub fn from_params(params: Params, catalog: MotorCatalog) -> Result<Self, SimCtrlError> {
        let mut config = mapping::configure(&params.mechanism, params.motor_count, &catalog)?;
        config.mode = params.control_mode;
        config.dt_s = params.dt_s;

        let sim = Simulation::new(config)?;

        info!(
            "SimCtrl simulating a {} in {} mode with a {} s step",
            sim.config().kind,
            params.control_mode,
            params.dt_s
        );

        Ok(Self {
            catalog,
            form: Some(params.mechanism),
            motor_count: params.motor_count,
            sim: Some(sim),
            ..Default::default()
        })
    }

    /// The live simulation.
    pub fn sim(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }

    /// The description the live simulation was built from.
    pub fn form(&self) -> Option<&MechanismForm> {
        self.form.as_ref()
    }

    /// Apply a single command to the live simulation.
    fn apply(&mut self, cmd: &SimCmd) -> Result<(), SimCtrlError> {
        let sim = self.sim.as_mut().ok_or(SimCtrlError::NotInitialised)?;
        let kind = sim.config().kind;

        match cmd {
            SimCmd::SetTarget { value } => {
                sim.set_target(mapping::convert_target(*value, kind))
            }
            SimCmd::SetTargetVelocity { value } => {
                sim.set_target_velocity(mapping::convert_target(*value, kind))
            }
            SimCmd::SetControlMode { mode } => {
                info!("Switching to {} control", mode);
                sim.set_control_mode(*mode)
            }
            SimCmd::Reconfigure { form, motor_count } => {
                let motor_count = motor_count.unwrap_or(self.motor_count);
                self.reconfigure(form, motor_count);
            }
            SimCmd::Reset => self.reset()?,
        }

        Ok(())
    }

    /// Replace the simulation with one built from `form`.
    ///
    /// The control mode and step carry over, the targets are reset to the
    /// new mechanism's starting position. If the new simulation cannot be
    /// built the current one is kept and the rejection is reported.
    fn reconfigure(&mut self, form: &MechanismForm, motor_count: u32) {
        let (mode, dt_s) = match self.sim {
            Some(ref s) => (s.state().mode, s.dt_s()),
            None => return,
        };

        let result = mapping::configure(form, motor_count, &self.catalog)
            .map_err(SimCtrlError::from)
            .and_then(|config| {
                Simulation::new(SimConfig {
                    mode,
                    dt_s,
                    ..config
                })
                .map_err(SimCtrlError::from)
            });

        match result {
            Ok(sim) => {
                info!("Reconfigured to a {} with {} motor(s)", sim.config().kind, motor_count);
                self.sim = Some(sim);
                self.form = Some(form.clone());
                self.motor_count = motor_count;
            }
            Err(e) => {
                warn!("Reconfiguration rejected, keeping the current simulation: {}", e);
                self.report.reconfigure_rejected = true;
            }
        }
    }

    /// Rebuild the simulation from its current configuration.
    ///
    /// The mechanism returns to its starting position at rest with the PID
    /// state and clock cleared. Control mode, targets and step are kept.
    fn reset(&mut self) -> Result<(), SimCtrlError> {
        let old = self.sim.as_ref().ok_or(SimCtrlError::NotInitialised)?;
        let state = *old.state();

        let mut sim = Simulation::new(old.config().clone())?;
        sim.set_control_mode(state.mode);
        sim.set_target(state.target);
        sim.set_target_velocity(state.target_velocity);

        info!("Simulation reset");
        self.sim = Some(sim);

        Ok(())
    }
}
