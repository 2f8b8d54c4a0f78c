//! Phasor aggregation engine.

use crate::loads::{Load, Phase};

use super::accumulator::PhaseAccumulators;
use super::contribution::LoadContribution;
use super::phasor::Phasor;
use super::snapshot::ResultSnapshot;

/// Recomputes the result snapshot from the full load list.
///
/// The engine performs no validation of loads; it relies on the registry
/// having accepted them. It keeps the last snapshot so that a recompute
/// skipped for an unusable voltage leaves the previous result visible.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    accumulators: PhaseAccumulators,
    snapshot: ResultSnapshot,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed snapshot (all zeros before the first recompute).
    pub fn snapshot(&self) -> &ResultSnapshot {
        &self.snapshot
    }

    /// Sum of the per-load neutral injections from the last recompute.
    ///
    /// Diagnostic only; the reported neutral is the KCL resultant.
    pub fn neutral_injected(&self) -> Phasor {
        Phasor::from_complex(self.accumulators.neutral_injected())
    }

    /// Recomputes from `loads` at `line_voltage`, rewriting every load's
    /// signed current.
    ///
    /// Returns `false` and keeps the previous snapshot when the voltage is
    /// not a positive finite number.
    pub fn recompute(&mut self, loads: &mut [Load], line_voltage: f64) -> bool {
        if !(line_voltage.is_finite() && line_voltage > 0.0) {
            log::warn!("skipping recompute: line voltage {line_voltage} is not positive");
            return false;
        }

        self.accumulators.reset();
        let mut p_total = 0.0;
        let mut q_total = 0.0;

        for load in loads.iter_mut() {
            let c = LoadContribution::of(load, line_voltage);
            log::trace!(
                "load \"{}\": {:.4} A at {:.2}°, P={:.2} W, Q={:.2} VAR",
                load.name(),
                c.signed_current,
                c.angle_deg,
                c.real_power,
                c.reactive_power
            );
            load.set_current(c.signed_current);
            p_total += c.real_power;
            q_total += c.reactive_power;
            self.accumulators.inject(load.topology(), &c);
        }

        let acc = &self.accumulators;
        self.snapshot = ResultSnapshot::with_totals(
            Phasor::from_complex(acc.phase(Phase::A)),
            Phasor::from_complex(acc.phase(Phase::B)),
            Phasor::from_complex(acc.phase(Phase::C)),
            Phasor::from_complex(acc.neutral_resultant()),
            p_total,
            q_total,
        );
        log::debug!(
            "recomputed {} loads at {line_voltage} V: P={:.2} W Q={:.2} VAR PF={:.3}",
            loads.len(),
            self.snapshot.p_total,
            self.snapshot.q_total,
            self.snapshot.pf_total
        );
        true
    }

    /// Like [`Engine::recompute`], but takes the voltage as typed text.
    ///
    /// A blank, partial or non-positive entry is a soft no-op: the previous
    /// snapshot stays in place and `false` is returned.
    pub fn recompute_from_input(&mut self, loads: &mut [Load], raw_voltage: &str) -> bool {
        match parse_line_voltage(raw_voltage) {
            Some(v) => self.recompute(loads, v),
            None => {
                log::debug!("skipping recompute: unusable line voltage \"{raw_voltage}\"");
                false
            }
        }
    }
}

/// Parses a line voltage entry, returning `None` unless it is a positive finite number.
pub fn parse_line_voltage(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
