//! Typed load model: conductors, connection topology, and the stored `Load`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TopologyError, ValidationError};

/// One of the three phase conductors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// All phases in ABC rotation order.
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    /// Voltage reference angle of the phase in degrees (ABC rotation).
    pub fn reference_angle_deg(self) -> f64 {
        match self {
            Phase::A => 0.0,
            Phase::B => -120.0,
            Phase::C => 120.0,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::A => "A",
            Phase::B => "B",
            Phase::C => "C",
        };
        f.write_str(s)
    }
}

/// A selectable conductor: a phase or the neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conductor {
    Phase(Phase),
    Neutral,
}

impl FromStr for Conductor {
    type Err = ValidationError;

    /// Accepts `A`/`B`/`C`/`N` in any case, `NEUTRAL`, and the `R`/`S`/`T`
    /// phase labels of the first program version.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "R" => Ok(Conductor::Phase(Phase::A)),
            "B" | "S" => Ok(Conductor::Phase(Phase::B)),
            "C" | "T" => Ok(Conductor::Phase(Phase::C)),
            "N" | "NEUTRAL" | "NEUTRO" => Ok(Conductor::Neutral),
            _ => Err(ValidationError::UnknownConductor(s.trim().to_string())),
        }
    }
}

/// Set of conductors a load is wired to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConductorSet {
    a: bool,
    b: bool,
    c: bool,
    n: bool,
}

impl ConductorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a conductor. Adding one twice is a no-op.
    pub fn insert(&mut self, conductor: Conductor) {
        match conductor {
            Conductor::Phase(Phase::A) => self.a = true,
            Conductor::Phase(Phase::B) => self.b = true,
            Conductor::Phase(Phase::C) => self.c = true,
            Conductor::Neutral => self.n = true,
        }
    }

    /// Builder-style variant of [`ConductorSet::insert`].
    pub fn with(mut self, conductor: Conductor) -> Self {
        self.insert(conductor);
        self
    }

    pub fn contains(&self, conductor: Conductor) -> bool {
        match conductor {
            Conductor::Phase(Phase::A) => self.a,
            Conductor::Phase(Phase::B) => self.b,
            Conductor::Phase(Phase::C) => self.c,
            Conductor::Neutral => self.n,
        }
    }

    pub fn has_neutral(&self) -> bool {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        !(self.a || self.b || self.c || self.n)
    }

    /// Selected phase conductors in ABC order.
    pub fn phases(&self) -> Vec<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|p| self.contains(Conductor::Phase(*p)))
            .collect()
    }

    /// Tokens in display order (`A`, `B`, `C`, then `N`).
    pub fn tokens(&self) -> Vec<&'static str> {
        let mut out = Vec::with_capacity(4);
        if self.a {
            out.push("A");
        }
        if self.b {
            out.push("B");
        }
        if self.c {
            out.push("C");
        }
        if self.n {
            out.push("N");
        }
        out
    }

    /// Classifies the set into one of the supported connections.
    ///
    /// With [`TopologyPolicy::LenientSinglePhase`], a lone phase without
    /// neutral is accepted as a phase-to-neutral connection.
    pub fn topology(&self, policy: TopologyPolicy) -> Result<Topology, TopologyError> {
        let phases = self.phases();
        match (phases.as_slice(), self.n) {
            ([p], true) => Ok(Topology::PhaseToNeutral(*p)),
            ([p], false) => match policy {
                TopologyPolicy::LenientSinglePhase => {
                    log::warn!("phase {p} selected without neutral, treating it as {p}-N");
                    Ok(Topology::PhaseToNeutral(*p))
                }
                TopologyPolicy::Strict => Err(TopologyError::SinglePhaseWithoutNeutral(*p)),
            },
            ([x, y], false) => Ok(Topology::PhaseToPhase(LinePair::from_phases(*x, *y))),
            ([_, _], true) => Err(TopologyError::TwoPhasesWithNeutral),
            ([_, _, _], false) => Ok(Topology::ThreePhase),
            ([_, _, _], true) => Err(TopologyError::ThreePhasesWithNeutral),
            _ => Err(TopologyError::NoPhaseConductor),
        }
    }
}

impl FromIterator<Conductor> for ConductorSet {
    fn from_iter<I: IntoIterator<Item = Conductor>>(iter: I) -> Self {
        let mut set = ConductorSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Display for ConductorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens().join(", "))
    }
}

/// How a lone phase selected without neutral is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopologyPolicy {
    /// Reject it with [`TopologyError::SinglePhaseWithoutNeutral`].
    #[default]
    Strict,
    /// Accept it as phase-to-neutral and log a warning.
    LenientSinglePhase,
}

/// Ordered phase pair for a phase-to-phase load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinePair {
    AB,
    BC,
    CA,
}

impl LinePair {
    fn from_phases(x: Phase, y: Phase) -> Self {
        match (x, y) {
            (Phase::A, Phase::B) | (Phase::B, Phase::A) => LinePair::AB,
            (Phase::B, Phase::C) | (Phase::C, Phase::B) => LinePair::BC,
            _ => LinePair::CA,
        }
    }

    /// Angle of the line-to-line voltage across the pair, in degrees.
    pub fn reference_angle_deg(self) -> f64 {
        match self {
            LinePair::AB => 30.0,
            LinePair::BC => -90.0,
            LinePair::CA => 150.0,
        }
    }

    /// Phase the current leaves through.
    pub fn first(self) -> Phase {
        match self {
            LinePair::AB => Phase::A,
            LinePair::BC => Phase::B,
            LinePair::CA => Phase::C,
        }
    }

    /// Phase the current returns through.
    pub fn second(self) -> Phase {
        match self {
            LinePair::AB => Phase::B,
            LinePair::BC => Phase::C,
            LinePair::CA => Phase::A,
        }
    }
}

/// The three supported electrical connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// One phase to neutral, fed at phase voltage.
    PhaseToNeutral(Phase),
    /// Between two phases, fed at line voltage.
    PhaseToPhase(LinePair),
    /// Balanced across A, B and C.
    ThreePhase,
}

/// Reactive character of a load's power factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PfType {
    #[default]
    #[serde(alias = "indutivo")]
    Inductive,
    #[serde(alias = "capacitivo")]
    Capacitive,
}

impl FromStr for PfType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inductive" | "indutivo" | "ind" => Ok(PfType::Inductive),
            "capacitive" | "capacitivo" | "cap" => Ok(PfType::Capacitive),
            _ => Err(ValidationError::UnknownPfType(s.trim().to_string())),
        }
    }
}

impl fmt::Display for PfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PfType::Inductive => f.write_str("Inductive"),
            PfType::Capacitive => f.write_str("Capacitive"),
        }
    }
}

/// A validated load as stored in the registry.
///
/// All fields are fixed at validation time except `current`, which the
/// engine rewrites on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Load {
    name: String,
    power: f64,
    power_factor: f64,
    pf_type: PfType,
    phases: ConductorSet,
    topology: Topology,
    line_voltage: f64,
    current: f64,
}

impl Load {
    /// Assembles a load from already-validated parts. `current` starts at 0.
    pub(crate) fn new(
        name: String,
        power: f64,
        power_factor: f64,
        pf_type: PfType,
        phases: ConductorSet,
        topology: Topology,
        line_voltage: f64,
    ) -> Self {
        Self {
            name,
            power,
            power_factor,
            pf_type,
            phases,
            topology,
            line_voltage,
            current: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Real power in watts. Negative for generators.
    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn power_factor(&self) -> f64 {
        self.power_factor
    }

    pub fn pf_type(&self) -> PfType {
        self.pf_type
    }

    /// Conductors as selected by the user.
    pub fn phases(&self) -> ConductorSet {
        self.phases
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Line voltage in effect when the load was entered.
    pub fn line_voltage(&self) -> f64 {
        self.line_voltage
    }

    /// Signed current magnitude (A) from the last recompute; negative for generators.
    pub fn current(&self) -> f64 {
        self.current
    }

    pub(crate) fn set_current(&mut self, current: f64) {
        self.current = current;
    }
}
