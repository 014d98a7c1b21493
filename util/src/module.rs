//! Cyclic module interface
//!
//! Executables are built from modules which are set up once and then
//! processed once per cycle of the main loop. Implementing `State` gives every
//! module the same lifecycle, so a main loop can drive any of them alike.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use std::fmt::Display;

// Internal
use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A module driven by an executable's main loop.
pub trait State {
    /// What the module needs to start, usually its parameter file.
    type InitData;
    type InitError: Display;

    /// Everything the module consumes in one cycle.
    type InputData;
    /// Everything the module produces in one cycle.
    type OutputData;
    /// Flags raised while processing a cycle, cleared at the start of the
    /// next one.
    type StatusReport;
    type ProcError: Display;

    /// Set up the module, loading parameters and opening its archives inside
    /// `session`.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Process one cycle.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;

    /// Process one cycle, logging a processing error as a warning instead of
    /// returning it.
    ///
    /// For main loops which keep running when a single cycle fails.
    fn proc_or_warn(&mut self, name: &str, input_data: &Self::InputData)
        -> Option<(Self::OutputData, Self::StatusReport)>
    {
        match self.proc(input_data) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("Error during {} processing: {}", name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Counts cycles, fails on odd inputs.
    #[derive(Default)]
    struct Counter {
        cycles: u32,
    }

    impl State for Counter {
        type InitData = u32;
        type InitError = String;
        type InputData = u32;
        type OutputData = u32;
        type StatusReport = ();
        type ProcError = String;

        fn init(&mut self, init_data: u32, _session: &Session) -> Result<(), String> {
            self.cycles = init_data;
            Ok(())
        }

        fn proc(&mut self, input_data: &u32) -> Result<(u32, ()), String> {
            if input_data % 2 == 1 {
                return Err(format!("odd input {}", input_data));
            }
            self.cycles += 1;
            Ok((self.cycles, ()))
        }
    }

    #[test]
    fn test_proc_or_warn() {
        let mut c = Counter::default();

        assert_eq!(c.proc_or_warn("Counter", &2), Some((1, ())));
        assert_eq!(c.proc_or_warn("Counter", &3), None);
        assert_eq!(c.proc_or_warn("Counter", &4), Some((2, ())));
    }
}
