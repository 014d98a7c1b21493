//! Main simulator executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and SimCtrl
//!     - Main loop:
//!         - Release any script commands due at the current run time
//!         - SimCtrl processing (apply commands, step the simulation)
//!         - Archive the snapshot and status report
//!         - Pace the cycle if running in realtime
//!     - Save the run summary
//!
//! # Usage
//!
//! ```text
//! sim_exec [script]
//! ```
//!
//! Parameters are read from `sim_exec.toml` and `sim_ctrl.toml` in the parameter directory.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use sim_lib::{
    clock::RunClock,
    cmd::SimCmd,
    params::SimExecParams,
    sim::Snapshot,
    sim_ctrl::SimCtrl,
};
use util::{
    archive::Archived,
    logger::logger_init,
    module::State,
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line arguments.
#[derive(Debug, StructOpt)]
#[structopt(name = "sim_exec", about = "Mechanism control-loop simulator")]
struct Args {
    /// Command script to execute.
    #[structopt(parse(from_os_str))]
    script: Option<PathBuf>,

    /// Override the run duration from the parameters.
    ///
    /// Units: seconds
    #[structopt(short, long)]
    duration_s: Option<f64>,
}

/// Summary of a run, saved into the session at exit.
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    num_cycles: u64,
    num_overruns: u64,
    num_saturated_cycles: u64,
    num_limited_cycles: u64,
    num_rejected_reconfigs: u64,
    num_proc_errors: u64,

    /// Gravity gain which would hold the mechanism at stall.
    ///
    /// Units: volts
    suggested_k_g: f64,

    final_snapshot: Option<Snapshot>,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let args = Args::from_args();

    // ---- LOAD PARAMETERS ----

    let exec_params: SimExecParams = util::params::load("sim_exec.toml")
        .wrap_err("Could not load exec params")?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("sim_exec", &exec_params.sessions_dir)
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(&exec_params.logger, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Mechanism Simulator Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI arguments: {:?}", args);

    let duration_s = args.duration_s.unwrap_or(exec_params.duration_s);

    // ---- INITIALISE SCRIPT ----

    let script: Option<ScriptInterpreter<SimCmd>> = match args.script {
        Some(ref path) => {
            info!("Loading script from {:?}", path);

            let si = ScriptInterpreter::new(path).wrap_err("Failed to load script")?;

            info!(
                "Loaded script lasts {:.02} s and contains {} commands\n",
                si.get_duration(),
                si.get_num_cmds()
            );

            Some(si)
        }
        None => {
            info!("No script provided, the simulation will hold its initial target\n");
            None
        }
    };

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut sim_ctrl = SimCtrl::default();
    sim_ctrl
        .init("sim_ctrl.toml", &session)
        .wrap_err("Failed to initialise SimCtrl")?;
    info!("SimCtrl init complete");

    let mut summary = RunSummary::default();

    if let Some(sim) = sim_ctrl.sim() {
        let config = sim.config();
        summary.suggested_k_g = config.plant.gravity_ff_gain(&config.motor);
        info!(
            "Gravity gain to hold the {} at stall: kG = {:.4} V (configured {:.4} V)",
            config.kind, summary.suggested_k_g, config.gains.k_g
        );
    }

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!(
        "Beginning main loop, running for {:.02} s with a {} s cycle{}\n",
        duration_s,
        exec_params.cycle_period_s,
        if exec_params.realtime { " in realtime" } else { "" }
    );

    let cycle_period = Duration::from_secs_f64(exec_params.cycle_period_s);
    let mut clock = RunClock::new(exec_params.cycle_period_s, duration_s, script);

    while clock.is_running() {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- COMMAND PROCESSING ----

        let input = clock.cycle_input();

        // ---- SIMULATION PROCESSING ----

        match sim_ctrl.proc_or_warn("SimCtrl", &input) {
            Some((snapshot, report)) => {
                summary.num_saturated_cycles += report.voltage_saturated as u64;
                summary.num_limited_cycles += report.limit_hit.is_some() as u64;
                summary.num_rejected_reconfigs += report.reconfigure_rejected as u64;
                summary.final_snapshot = Some(snapshot);
            }
            None => summary.num_proc_errors += 1,
        }

        // ---- WRITE ARCHIVES ----

        if let Err(e) = sim_ctrl.write() {
            warn!("Could not write SimCtrl archives: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        clock.advance();

        if exec_params.realtime {
            let cycle_dur = Instant::now() - cycle_start_instant;

            match cycle_period.checked_sub(cycle_dur) {
                Some(d) => thread::sleep(d),
                None => {
                    warn!(
                        "Cycle overran by {:.06} s",
                        cycle_dur.as_secs_f64() - cycle_period.as_secs_f64()
                    );
                    summary.num_overruns += 1;
                }
            }
        }
    }

    // ---- SHUTDOWN ----

    summary.num_cycles = clock.num_cycles();

    if let Some(ref s) = summary.final_snapshot {
        info!(
            "Final state at {:.02} s (simulation time {:.02} s): position {:.4}, velocity {:.4}, \
            voltage {:.3} V",
            clock.time_s(), s.time_s, s.position, s.velocity, s.voltage_v
        );
    }
    info!(
        "{} cycles run, {} saturated, {} at a travel limit",
        summary.num_cycles, summary.num_saturated_cycles, summary.num_limited_cycles
    );

    session.save("summary.json", summary);
    session.exit();

    info!("End of execution");

    Ok(())
}
