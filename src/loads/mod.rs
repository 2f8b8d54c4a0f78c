//! Load data model, the candidate validation boundary, and the registry.

/// String-typed load candidate and its validation.
pub mod candidate;
/// Ordered load registry with add/remove/replace by position.
pub mod registry;
pub mod types;

pub use candidate::LoadCandidate;
pub use registry::LoadRegistry;
pub use types::{Conductor, ConductorSet, LinePair, Load, Phase, PfType, Topology, TopologyPolicy};
