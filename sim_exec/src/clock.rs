//! Run clock for the simulator executable.
//!
//! Counts executable cycles and releases script commands against the run's
//! own time. The live simulation keeps a separate clock which restarts
//! whenever it is rebuilt, so it can't be used to pace the run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use crate::{cmd::SimCmd, sim_ctrl::InputData};
use util::script_interpreter::{PendingCmds, ScriptInterpreter};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Monotonic clock of a simulator run.
pub struct RunClock {
    /// Units: seconds
    cycle_period_s: f64,

    /// Units: seconds
    duration_s: f64,

    num_cycles: u64,

    script: Option<ScriptInterpreter<SimCmd>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RunClock {
    pub fn new(
        cycle_period_s: f64,
        duration_s: f64,
        script: Option<ScriptInterpreter<SimCmd>>,
    ) -> Self {
        Self {
            cycle_period_s,
            duration_s,
            num_cycles: 0,
            script,
        }
    }

    /// Time at the start of the current cycle.
    ///
    /// Derived from the cycle count so that no rounding error builds up.
    ///
    /// Units: seconds
    pub fn time_s(&self) -> f64 {
        self.num_cycles as f64 * self.cycle_period_s
    }

    /// Number of cycles completed so far.
    pub fn num_cycles(&self) -> u64 {
        self.num_cycles
    }

    /// True while the run duration hasn't elapsed.
    pub fn is_running(&self) -> bool {
        self.time_s() < self.duration_s
    }

    /// Build the SimCtrl input for the current cycle.
    ///
    /// Releases every script command due at or before the current time and
    /// asks for a step of one cycle period.
    pub fn cycle_input(&mut self) -> InputData {
        let time_s = self.time_s();
        let mut input = InputData {
            cmds: vec![],
            dt_s: Some(self.cycle_period_s),
        };

        if let Some(ref mut si) = self.script {
            match si.get_pending(time_s) {
                PendingCmds::None => (),
                PendingCmds::Some(cmds) => input.cmds = cmds,
                PendingCmds::EndOfScript => {
                    info!("End of script reached at {:.02} s", time_s);
                    self.script = None;
                }
            }
        }

        input
    }

    /// Move on to the next cycle.
    pub fn advance(&mut self) {
        self.num_cycles += 1;
    }
}
