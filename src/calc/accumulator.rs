//! Working phasor accumulators for the line conductors.

use num_complex::Complex64;

use crate::loads::{Phase, Topology};

use super::contribution::LoadContribution;
use super::phasor::from_polar;

/// Complex current sums per conductor while loads are being injected.
///
/// Neutral current is handled in two steps. Phase-to-neutral loads inject
/// their return current into `neutral_injected`, which is kept only as a
/// per-load model artifact. The reported neutral is the KCL resultant
/// `-(Ia + Ib + Ic)` from [`PhaseAccumulators::neutral_resultant`].
#[derive(Debug, Clone, Default)]
pub struct PhaseAccumulators {
    ia: Complex64,
    ib: Complex64,
    ic: Complex64,
    neutral_injected: Complex64,
}

impl PhaseAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all sums to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds a phasor given in polar form to one phase.
    pub fn add_to_phase(&mut self, phase: Phase, magnitude: f64, angle_deg: f64) {
        let z = from_polar(magnitude, angle_deg);
        match phase {
            Phase::A => self.ia += z,
            Phase::B => self.ib += z,
            Phase::C => self.ic += z,
        }
    }

    fn add_to_neutral(&mut self, magnitude: f64, angle_deg: f64) {
        self.neutral_injected += from_polar(magnitude, angle_deg);
    }

    /// Injects one load's current into the conductors of its connection.
    ///
    /// Generators arrive with a 180° shifted angle, so their phasors
    /// subtract from the consumer sums.
    pub fn inject(&mut self, topology: Topology, contribution: &LoadContribution) {
        let m = contribution.magnitude;
        let theta = contribution.angle_deg;
        match topology {
            Topology::PhaseToNeutral(p) => {
                let reference = p.reference_angle_deg();
                self.add_to_phase(p, m, reference + theta);
                self.add_to_neutral(m, reference + 180.0 + theta);
            }
            Topology::PhaseToPhase(pair) => {
                let reference = pair.reference_angle_deg();
                self.add_to_phase(pair.first(), m, reference + theta);
                self.add_to_phase(pair.second(), m, reference + 180.0 + theta);
            }
            Topology::ThreePhase => {
                for p in Phase::ALL {
                    self.add_to_phase(p, m, p.reference_angle_deg() + theta);
                }
            }
        }
    }

    pub fn phase(&self, phase: Phase) -> Complex64 {
        match phase {
            Phase::A => self.ia,
            Phase::B => self.ib,
            Phase::C => self.ic,
        }
    }

    /// Sum of the per-load neutral injections. Not the reported neutral.
    pub fn neutral_injected(&self) -> Complex64 {
        self.neutral_injected
    }

    /// Neutral current from Kirchhoff's current law at the neutral node.
    pub fn neutral_resultant(&self) -> Complex64 {
        -(self.ia + self.ib + self.ic)
    }
}
