//! Simulation control module
//!
//! Owns the live simulation, applies incoming commands to it and steps it
//! once per cycle. Reconfiguration replaces the simulation wholesale, and a
//! configuration which cannot be built leaves the current simulation
//! running.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use params::*;
pub use state::*;
use crate::mapping::MappingError;
use crate::sim::SimError;
use util::{archive::ArchiveError, params::LoadError};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during SimCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum SimCtrlError {
    #[error("Could not load the SimCtrl parameters: {0}")]
    ParamLoadError(LoadError),

    #[error("Could not load the motor catalog: {0}")]
    CatalogLoadError(LoadError),

    #[error("Could not map the mechanism: {0}")]
    MappingError(#[from] MappingError),

    #[error("Could not build the simulation: {0}")]
    SimError(#[from] SimError),

    #[error("Archive error: {0}")]
    ArchiveError(#[from] ArchiveError),

    #[error("SimCtrl has not been initialised")]
    NotInitialised,
}
