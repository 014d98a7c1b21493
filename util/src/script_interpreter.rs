//! # Command script interpreter module
//!
//! This module provides an interpreter for timed command scripts. A script is
//! a list of entries of the form
//!
//! ```text
//! <time_s>: <json command>;
//! ```
//!
//! where the JSON payload deserialises into the command type the caller asks
//! for. Anything outside an entry (for example `#` comment lines) is ignored.
//! Release times are compared against a caller-supplied clock, which lets a
//! simulation replay a script deterministically against simulated time.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct Entry<C> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The command to run
    cmd: C
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use `.get_pending` to
/// acquire a list of commands that need executing.
pub struct ScriptInterpreter<C> {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Entry<C>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidCmd(f64, serde_json::Error),

    #[error("Script entries must be in time order, but {1} s follows {0} s")]
    OutOfOrder(f64, f64)
}

/// Commands released by the interpreter.
#[derive(Debug, PartialEq)]
pub enum PendingCmds<C> {
    None,
    Some(Vec<C>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C> ScriptInterpreter<C>
where
    C: DeserializeOwned
{
    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());
        
        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_script(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        // Empty queue of commands
        let mut cmd_queue: VecDeque<Entry<C>> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(-?\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("script regex is valid");

        for cap in re.captures_iter(script) {
            // Group 1 and 3 are not optional so are always present in a match
            let time_str = &cap[1];
            let payload = &cap[3];

            // Parse the exec time
            let exec_time_s: f64 = time_str.parse()
                .map_err(|_| ScriptError::InvalidTimestamp(time_str.to_string()))?;
            if exec_time_s < 0.0 {
                return Err(ScriptError::InvalidTimestamp(time_str.to_string()))
            }

            if let Some(prev) = cmd_queue.back() {
                if exec_time_s < prev.exec_time_s {
                    return Err(ScriptError::OutOfOrder(prev.exec_time_s, exec_time_s))
                }
            }

            // The scripts contain JSON only.
            let cmd = serde_json::from_str(payload)
                .map_err(|e| ScriptError::InvalidCmd(exec_time_s, e))?;

            cmd_queue.push_back(Entry {
                exec_time_s,
                cmd
            });
        }

        if cmd_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: cmd_queue
        })
    }
}

impl<C> ScriptInterpreter<C> {
    /// Return the commands due at or before `current_time_s`.
    pub fn get_pending(&mut self, current_time_s: f64) -> PendingCmds<C> {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingCmds::EndOfScript
        }

        let mut cmd_vec: Vec<C> = vec![];

        // Pop entries from the head of the queue until the exec times are
        // later than the current time.
        while let Some(entry) = self.cmds.front() {
            if entry.exec_time_s > current_time_s {
                break;
            }
            if let Some(entry) = self.cmds.pop_front() {
                cmd_vec.push(entry.cmd);
            }
        }

        if cmd_vec.is_empty() {
            PendingCmds::None
        }
        else {
            PendingCmds::Some(cmd_vec)
        }
    }

    /// Get the number of commands remaining in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }

    /// Path the script was loaded from, if it came from a file.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(tag = "type")]
    enum TestCmd {
        Go { value: f64 },
        Stop
    }

    #[test]
    fn test_pending() {
        let script = "\
            # comments are skipped\n\
            0.0: {\"type\": \"Go\", \"value\": 1.5};\n\
            0.5: {\"type\": \"Go\", \"value\": -2};\n\
            0.5: {\"type\": \"Stop\"};\n";

        let mut si: ScriptInterpreter<TestCmd> = ScriptInterpreter::from_script(script).unwrap();
        assert_eq!(si.get_num_cmds(), 3);
        assert_eq!(si.get_duration(), 0.5);
        assert!(si.script_path().is_none());

        assert_eq!(si.get_pending(0.0), PendingCmds::Some(vec![TestCmd::Go { value: 1.5 }]));
        assert_eq!(si.get_pending(0.25), PendingCmds::None);
        assert_eq!(
            si.get_pending(0.52),
            PendingCmds::Some(vec![TestCmd::Go { value: -2.0 }, TestCmd::Stop])
        );
        assert_eq!(si.get_pending(1.0), PendingCmds::EndOfScript);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::from_script("# nothing here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::from_script("1.0: {\"type\": \"Jump\"};"),
            Err(ScriptError::InvalidCmd(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::from_script(
                "1.0: {\"type\": \"Stop\"};\n0.5: {\"type\": \"Stop\"};"
            ),
            Err(ScriptError::OutOfOrder(_, _))
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::new("no/such/script.sps"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
