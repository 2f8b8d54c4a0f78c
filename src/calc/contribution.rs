//! Per-load current and power derivation.

use crate::loads::{Load, PfType, Topology};

/// What one load contributes to the network at a given line voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadContribution {
    /// Current magnitude in amperes, always >= 0.
    pub magnitude: f64,
    /// Signed current: negative for generators, as shown in the load table.
    pub signed_current: f64,
    /// Current angle relative to the connection's voltage reference, degrees.
    pub angle_deg: f64,
    /// Real power (W), signed.
    pub real_power: f64,
    /// Reactive power (VAR), signed.
    pub reactive_power: f64,
}

/// Apparent power magnitude `|P| / pf`, or 0 for a zero power factor.
pub fn apparent_power(power: f64, pf: f64) -> f64 {
    if pf > 0.0 { power.abs() / pf } else { 0.0 }
}

/// Current magnitude for the given connection.
///
/// Phase-to-neutral loads see `V_line / √3`, phase-to-phase loads see
/// `V_line`, balanced three-phase loads draw `S / (√3 · V_line)` per phase.
pub fn current_magnitude(apparent: f64, topology: Topology, line_voltage: f64) -> f64 {
    let sqrt3 = 3.0_f64.sqrt();
    match topology {
        Topology::PhaseToNeutral(_) => apparent / (line_voltage / sqrt3),
        Topology::PhaseToPhase(_) => apparent / line_voltage,
        Topology::ThreePhase => apparent / (sqrt3 * line_voltage),
    }
}

/// Signed reactive power for a load.
///
/// Inductive consumers absorb VARs, capacitive consumers supply them; the
/// relationship inverts for generators (negative `power`). Unity and zero
/// power factors contribute nothing.
pub fn reactive_power(power: f64, pf: f64, pf_type: PfType) -> f64 {
    if pf <= 0.0 || pf >= 1.0 {
        return 0.0;
    }
    let q = power * pf.acos().tan();
    match (power >= 0.0, pf_type) {
        (true, PfType::Inductive) | (false, PfType::Capacitive) => q,
        (true, PfType::Capacitive) | (false, PfType::Inductive) => -q,
    }
}

/// Current angle relative to the voltage reference, in degrees.
///
/// Consumers lag when inductive and lead when capacitive. Generators take
/// the mirrored shift plus 180° for the reversed current direction.
pub fn current_angle_deg(power: f64, pf: f64, pf_type: PfType) -> f64 {
    let shift = pf.acos().to_degrees();
    if power >= 0.0 {
        match pf_type {
            PfType::Inductive => -shift,
            PfType::Capacitive => shift,
        }
    } else {
        let mirrored = match pf_type {
            PfType::Inductive => shift,
            PfType::Capacitive => -shift,
        };
        mirrored + 180.0
    }
}

impl LoadContribution {
    /// Derives the contribution of `load` at the network's `line_voltage`.
    pub fn of(load: &Load, line_voltage: f64) -> Self {
        let power = load.power();
        let pf = load.power_factor();
        let pf_type = load.pf_type();

        let apparent = apparent_power(power, pf);
        let magnitude = current_magnitude(apparent, load.topology(), line_voltage);
        let signed_current = if power >= 0.0 { magnitude } else { -magnitude };

        Self {
            magnitude,
            signed_current,
            angle_deg: current_angle_deg(power, pf, pf_type),
            real_power: power,
            reactive_power: reactive_power(power, pf, pf_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{LinePair, Phase};

    const TOL: f64 = 1e-9;

    #[test]
    fn apparent_power_uses_absolute_power() {
        assert!((apparent_power(-800.0, 0.8) - 1000.0).abs() < TOL);
        assert_eq!(apparent_power(0.0, 0.0), 0.0);
    }

    #[test]
    fn current_by_topology() {
        let s = 1000.0;
        let v = 380.0;
        let pn = current_magnitude(s, Topology::PhaseToNeutral(Phase::A), v);
        let pp = current_magnitude(s, Topology::PhaseToPhase(LinePair::AB), v);
        let three = current_magnitude(s, Topology::ThreePhase, v);
        assert!((pn - 4.558_028_441).abs() < 1e-6);
        assert!((pp - 1000.0 / 380.0).abs() < TOL);
        assert!((three - 1000.0 / (3.0_f64.sqrt() * 380.0)).abs() < TOL);
    }

    #[test]
    fn reactive_power_signs() {
        let q = 750.0;
        assert!((reactive_power(1000.0, 0.8, PfType::Inductive) - q).abs() < 1e-9);
        assert!((reactive_power(1000.0, 0.8, PfType::Capacitive) + q).abs() < 1e-9);
        // Generators: power * tan is already negative, inductive flips it back.
        assert!((reactive_power(-1000.0, 0.8, PfType::Inductive) - q).abs() < 1e-9);
        assert!((reactive_power(-1000.0, 0.8, PfType::Capacitive) + q).abs() < 1e-9);
    }

    #[test]
    fn reactive_power_is_zero_at_unity_and_zero_pf() {
        assert_eq!(reactive_power(1000.0, 1.0, PfType::Inductive), 0.0);
        assert_eq!(reactive_power(0.0, 0.0, PfType::Capacitive), 0.0);
    }

    #[test]
    fn current_angle_for_consumers() {
        let shift = 0.8_f64.acos().to_degrees();
        assert!((current_angle_deg(10.0, 0.8, PfType::Inductive) + shift).abs() < TOL);
        assert!((current_angle_deg(10.0, 0.8, PfType::Capacitive) - shift).abs() < TOL);
        assert_eq!(current_angle_deg(10.0, 1.0, PfType::Inductive), 0.0);
    }

    #[test]
    fn current_angle_for_generators() {
        let shift = 0.8_f64.acos().to_degrees();
        assert!((current_angle_deg(-10.0, 0.8, PfType::Inductive) - (shift + 180.0)).abs() < TOL);
        assert!((current_angle_deg(-10.0, 0.8, PfType::Capacitive) - (180.0 - shift)).abs() < TOL);
        assert_eq!(current_angle_deg(-10.0, 1.0, PfType::Inductive), 180.0);
    }
}
