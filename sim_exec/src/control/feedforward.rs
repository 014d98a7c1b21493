//! # Feedforward

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::ControlGains;
use util::maths::sign;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How the gravity gain `kG` enters the feedforward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GravityFf {
    /// `kG * cos(position)`, for arms whose gravity load depends on angle.
    Cosine,

    /// `kG` as a flat offset, for mechanisms that always fight the same load
    /// (an elevator lifts against gravity regardless of height).
    Constant,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ControlGains {
    /// Feedforward voltage for the current motion state.
    ///
    /// `kS * sign(v) + kV * v + kA * a + gravity`, with `sign(0) = 0`.
    pub fn feedforward(
        &self,
        velocity: f64,
        acceleration: f64,
        position: f64,
        gravity: GravityFf,
    ) -> f64 {
        let gravity_v = match gravity {
            GravityFf::Cosine => self.k_g * position.cos(),
            GravityFf::Constant => self.k_g,
        };

        self.k_s * sign(velocity) + self.k_v * velocity + self.k_a * acceleration + gravity_v
    }
}
