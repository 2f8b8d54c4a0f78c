//! Shared fixtures for integration tests.

#![allow(dead_code)]

use phasor_calc::loads::{LoadCandidate, TopologyPolicy};
use phasor_calc::session::Session;

/// Absolute tolerance for currents and powers.
pub const TOL: f64 = 1e-9;

/// Absolute tolerance for angles in degrees.
pub const ANGLE_TOL: f64 = 1e-6;

/// Empty strict session at 380 V.
pub fn session_380() -> Session {
    Session::new("380", TopologyPolicy::Strict)
}

/// Resistive single-phase load on `phase` and neutral.
pub fn single_phase(name: &str, power: &str, phase: &str) -> LoadCandidate {
    LoadCandidate::new(name, power).phases([phase, "N"])
}

/// Balanced three-phase load.
pub fn three_phase(name: &str, power: &str, pf: &str) -> LoadCandidate {
    LoadCandidate::new(name, power)
        .power_factor(pf)
        .phases(["A", "B", "C"])
}

/// Difference between two angles in degrees, accounting for wrap-around.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
