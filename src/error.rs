//! Error taxonomy for the load registry boundary.
//!
//! Every error here is raised synchronously before the registry is mutated,
//! so a rejected call always leaves the load list exactly as it was.

use thiserror::Error;

use crate::loads::Phase;

/// Malformed or out-of-range field values in a load candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Load name is empty after trimming.
    #[error("load name must not be empty")]
    EmptyName,

    /// A required numeric field was left blank.
    #[error("field `{0}` is required")]
    MissingField(&'static str),

    /// A numeric field could not be parsed as a finite number.
    #[error("field `{field}` is not a valid number: \"{value}\"")]
    InvalidNumber { field: &'static str, value: String },

    /// Power factor outside the closed interval [0, 1].
    #[error("power factor must be between 0 and 1, got {0}")]
    PowerFactorOutOfRange(f64),

    /// Zero power factor is only meaningful for a zero-power load.
    #[error("power factor cannot be zero when power is non-zero ({power} W)")]
    ZeroPowerFactorWithPower { power: f64 },

    /// Line voltage must be strictly positive.
    #[error("line voltage must be positive, got {0} V")]
    NonPositiveVoltage(f64),

    /// The conductor set is empty.
    #[error("at least one conductor must be selected")]
    NoPhaseSelected,

    /// A conductor token that is not A, B, C or N (or an alias).
    #[error("unknown conductor \"{0}\"")]
    UnknownConductor(String),

    /// A power factor type token that is neither inductive nor capacitive.
    #[error("unknown power factor type \"{0}\"")]
    UnknownPfType(String),
}

/// A conductor combination that is not one of the three supported connections.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    #[error("phase {0} needs a neutral or a second phase conductor")]
    SinglePhaseWithoutNeutral(Phase),

    #[error("two phases together with neutral are not a supported connection")]
    TwoPhasesWithNeutral,

    #[error("three phases together with neutral are not a supported connection")]
    ThreePhasesWithNeutral,

    #[error("no phase conductor selected")]
    NoPhaseConductor,
}

/// List position outside the registry bounds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("load index {index} out of bounds (registry holds {len} loads)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Any rejection reported by the load registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Convenience alias for registry results.
pub type RegistryResult<T> = Result<T, RegistryError>;
