//! Phasor aggregation: per-load derivation, accumulation, and result snapshots.

pub mod accumulator;
pub mod contribution;
/// Recompute loop and the retained result snapshot.
pub mod engine;
/// Polar/complex conversion and angle normalization.
pub mod phasor;
pub mod snapshot;

pub use contribution::LoadContribution;
pub use engine::{Engine, parse_line_voltage};
pub use phasor::{Phasor, from_polar, normalize_angle_deg, to_polar};
pub use snapshot::ResultSnapshot;
