//! Three-phase load phasor calculator: load registry and phasor aggregation.

/// Phasor aggregation engine, result snapshots, polar conversion.
pub mod calc;
pub mod config;
pub mod error;
pub mod io;
/// Load model, candidate validation, and the ordered registry.
pub mod loads;
pub mod session;

pub use calc::{Engine, Phasor, ResultSnapshot};
pub use error::{IndexError, RegistryError, TopologyError, ValidationError};
pub use loads::{LoadCandidate, LoadRegistry};
pub use session::Session;
