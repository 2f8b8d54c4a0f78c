//! Result snapshot produced by each recompute.

use std::fmt;

use serde::Serialize;

use super::phasor::Phasor;

/// Phasors below this magnitude (A) are left out of diagrams.
pub const PLOT_THRESHOLD_A: f64 = 1e-4;

/// Total line currents, resultant neutral current and the power balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResultSnapshot {
    pub ia: Phasor,
    pub ib: Phasor,
    pub ic: Phasor,
    /// Neutral current from KCL, `-(Ia + Ib + Ic)`.
    pub i_n: Phasor,
    /// Total real power (W).
    pub p_total: f64,
    /// Total reactive power (VAR).
    pub q_total: f64,
    /// Total apparent power (VA).
    pub s_total: f64,
    /// Overall power factor, 0 when `s_total` is 0.
    pub pf_total: f64,
}

impl ResultSnapshot {
    /// Builds the power totals from the summed P and Q.
    pub fn with_totals(ia: Phasor, ib: Phasor, ic: Phasor, i_n: Phasor, p: f64, q: f64) -> Self {
        let s = (p * p + q * q).sqrt();
        let pf = if s != 0.0 { p / s } else { 0.0 };
        Self {
            ia,
            ib,
            ic,
            i_n,
            p_total: p,
            q_total: q,
            s_total: s,
            pf_total: pf,
        }
    }

    /// The four current phasors with their labels, in `Ia, Ib, Ic, In` order.
    pub fn phasors(&self) -> [(&'static str, Phasor); 4] {
        [
            ("Ia", self.ia),
            ("Ib", self.ib),
            ("Ic", self.ic),
            ("In", self.i_n),
        ]
    }

    /// Phasors large enough to draw in a diagram.
    pub fn visible_phasors(&self) -> Vec<(&'static str, Phasor)> {
        self.phasors()
            .into_iter()
            .filter(|(_, p)| p.magnitude > PLOT_THRESHOLD_A)
            .collect()
    }
}

impl fmt::Display for ResultSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Total Power Balance ---")?;
        writeln!(f, "Real power (P):      {:.2} W", self.p_total)?;
        writeln!(f, "Reactive power (Q):  {:.2} VAR", self.q_total)?;
        writeln!(f, "Apparent power (S):  {:.2} VA", self.s_total)?;
        writeln!(f, "Power factor (PF):   {:.3}", self.pf_total)?;
        writeln!(f, "--- Total Phasor Currents ---")?;
        for (label, p) in self.phasors() {
            writeln!(f, "{label}: {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_apparent_power_gives_zero_pf() {
        let z = Phasor::default();
        let snap = ResultSnapshot::with_totals(z, z, z, z, 0.0, 0.0);
        assert_eq!(snap.s_total, 0.0);
        assert_eq!(snap.pf_total, 0.0);
    }

    #[test]
    fn totals_follow_power_triangle() {
        let z = Phasor::default();
        let snap = ResultSnapshot::with_totals(z, z, z, z, 300.0, -400.0);
        assert!((snap.s_total - 500.0).abs() < 1e-12);
        assert!((snap.pf_total - 0.6).abs() < 1e-12);
    }

    #[test]
    fn tiny_phasors_are_not_visible() {
        let z = Phasor::default();
        let ia = Phasor::new(1.0, 0.0);
        let ic = Phasor::new(5e-5, 0.0);
        let snap = ResultSnapshot::with_totals(ia, z, ic, z, 0.0, 0.0);
        let labels: Vec<&str> = snap.visible_phasors().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Ia"]);
    }

    #[test]
    fn report_lists_all_sections() {
        let snap = ResultSnapshot::default();
        let text = snap.to_string();
        assert!(text.contains("Power factor (PF):   0.000"));
        assert!(text.contains("In: 0.0000 A ∠ 0.00°"));
        assert_eq!(text.lines().count(), 10);
    }
}
