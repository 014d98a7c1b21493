//! # PID accumulation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::ControlGains;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Accumulated state of a PID loop.
///
/// The gains live in `ControlGains` so that they can be replaced wholesale
/// without touching the accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PidState {
    /// The integral accumulation
    pub integral: f64,

    /// Error passed in on the previous update, zero before the first.
    pub prev_error: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidState {
    /// Get the PID output for the given error over a step of `dt_s` seconds.
    ///
    /// The integral is never clamped and `dt_s` is not checked, a zero step
    /// produces an infinite or NaN derivative.
    pub fn update(&mut self, gains: &ControlGains, error: f64, dt_s: f64) -> f64 {
        self.integral += error * dt_s;
        let deriv = (error - self.prev_error) / dt_s;
        self.prev_error = error;

        gains.k_p * error + gains.k_i * self.integral + gains.k_d * deriv
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_update() {
        let gains = ControlGains {
            k_p: 2.0,
            k_i: 1.0,
            k_d: 0.5,
            ..Default::default()
        };
        let mut pid = PidState::default();

        // First update sees the full error as a derivative step
        let out = pid.update(&gains, 1.0, 0.5);
        assert_eq!(pid.integral, 0.5);
        assert_eq!(pid.prev_error, 1.0);
        assert_eq!(out, 2.0 + 0.5 + 0.5 * 2.0);

        let out = pid.update(&gains, 0.5, 0.5);
        assert_eq!(pid.integral, 0.75);
        assert_eq!(out, 1.0 + 0.75 + 0.5 * -1.0);
    }

    #[test]
    fn test_integral_unbounded() {
        let gains = ControlGains {
            k_i: 1.0,
            ..Default::default()
        };
        let mut pid = PidState::default();

        for _ in 0..1000 {
            pid.update(&gains, 100.0, 0.02);
        }

        assert!((pid.integral - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt() {
        let gains = ControlGains {
            k_d: 1.0,
            ..Default::default()
        };

        let mut pid = PidState::default();
        assert!(pid.update(&gains, 1.0, 0.0).is_infinite());

        let mut pid = PidState::default();
        assert!(pid.update(&gains, 0.0, 0.0).is_nan());
    }
}
