//! Logger initialisation for simulator executables
//!
//! Log records are written to the session log file and, optionally, to
//! stdout. Every record is stamped with the wall-clock seconds elapsed since
//! the session epoch.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use serde::Deserialize;
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Log target of the per-tick simulation output.
pub const TICK_LOG_TARGET: &str = "sim_lib::sim";

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Logger settings, usually loaded as part of an executable's parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerParams {
    /// Minimum level of records to keep.
    pub min_level: LevelFilter,

    /// Level applied to the high-rate tick output, which can otherwise flood
    /// the log at `Debug`.
    #[serde(default = "default_tick_level")]
    pub tick_level: LevelFilter,

    /// Also write records to stdout.
    #[serde(default = "default_stdout")]
    pub stdout: bool
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level of at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for LoggerParams {
    fn default() -> Self {
        Self {
            min_level: LevelFilter::Debug,
            tick_level: default_tick_level(),
            stdout: default_stdout()
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
/// 
/// # Notes
/// 
/// - `params.min_level` must be `Info` or more verbose so the session
///   information is always recorded.
/// 
/// # Safety
/// 
/// - This function must only be called once to prevent corrupting logs.
pub fn logger_init(
    params: &LoggerParams, 
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if params.min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(params.min_level))
    }

    let log_file = match fern::log_file(session.log_file_path.clone()) {
        Ok(f) => f,
        Err(e) => return Err(LoggerInitError::LogFileInitError(e))
    };

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            // Targets are only useful when debugging
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            }
            else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    session::get_elapsed_seconds(),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(params.min_level)
        .level_for(TICK_LOG_TARGET, params.tick_level.min(params.min_level))
        .chain(log_file);

    if params.stdout {
        dispatch = dispatch.chain(std::io::stdout());
    }

    if let Err(e) = dispatch.apply() {
        return Err(LoggerInitError::FernInitError(e))
    }
    
    info!("Logging initialised");
    info!("    Session epoch: {}", session::get_epoch());
    info!("    Log level: {:?} (tick output: {:?})", params.min_level, params.tick_level);
    info!("    Log file path: {:?}", session.log_file_path);

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn default_tick_level() -> LevelFilter {
    LevelFilter::Info
}

fn default_stdout() -> bool {
    true
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let p: LoggerParams = crate::params::from_str("min_level = \"TRACE\"").unwrap();
        assert_eq!(p.min_level, LevelFilter::Trace);
        assert_eq!(p.tick_level, LevelFilter::Info);
        assert!(p.stdout);
    }
}
