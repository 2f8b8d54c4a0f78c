//! End-to-end checks of the phasor aggregation through a session.

mod common;

use common::{ANGLE_TOL, TOL, angle_diff, session_380, single_phase, three_phase};
use phasor_calc::calc::{from_polar, normalize_angle_deg, to_polar};
use phasor_calc::loads::LoadCandidate;
use phasor_calc::{RegistryError, TopologyError};
use rand::{Rng, SeedableRng, rngs::StdRng};

#[test]
fn polar_round_trip_over_random_phasors() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let m: f64 = rng.random_range(1e-3..1e4);
        let a: f64 = rng.random_range(-720.0..720.0);
        let (m2, a2) = to_polar(from_polar(m, a));
        assert!((m2 - m).abs() < 1e-9 * m.max(1.0), "magnitude {m} -> {m2}");
        assert!(
            angle_diff(a2, normalize_angle_deg(a)) < ANGLE_TOL,
            "angle {a} -> {a2}"
        );
        assert!(a2 > -180.0 && a2 <= 180.0);
    }
}

#[test]
fn angle_normalization_boundaries() {
    assert!((normalize_angle_deg(181.0) - -179.0).abs() < ANGLE_TOL);
    assert_eq!(normalize_angle_deg(180.0), 180.0);
    assert_eq!(normalize_angle_deg(-180.0), 180.0);
    assert!((normalize_angle_deg(-181.0) - 179.0).abs() < ANGLE_TOL);
}

#[test]
fn three_equal_balanced_loads_cancel_in_neutral() {
    let mut s = session_380();
    for name in ["M1", "M2", "M3"] {
        assert!(s.add(&three_phase(name, "5000", "1")).is_ok());
    }
    let snap = s.snapshot();
    let sum = snap.ia.to_complex() + snap.ib.to_complex() + snap.ic.to_complex();
    assert!(sum.norm() < 1e-9);
    assert!(snap.i_n.magnitude < 1e-9);
    assert!((snap.ia.magnitude - snap.ib.magnitude).abs() < 1e-9);
}

#[test]
fn single_phase_reference_values() {
    let mut s = session_380();
    assert!(s.add(&single_phase("Heater", "1000", "A")).is_ok());
    let snap = s.snapshot();

    let v_phase = 380.0 / 3.0_f64.sqrt();
    assert!((v_phase - 219.393).abs() < 1e-3);
    let expected = 1000.0 / v_phase;
    assert!((expected - 4.558).abs() < 1e-3);

    assert!((snap.ia.magnitude - expected).abs() < TOL);
    assert!(angle_diff(snap.ia.angle_deg, 0.0) < ANGLE_TOL);
    assert!((snap.i_n.magnitude - expected).abs() < TOL);
    assert!(angle_diff(snap.i_n.angle_deg, 180.0) < ANGLE_TOL);
    assert_eq!(snap.ib.magnitude, 0.0);
    assert_eq!(snap.ic.magnitude, 0.0);
}

#[test]
fn partial_three_phase_with_neutral_is_rejected() {
    let mut s = session_380();
    assert!(s.add(&single_phase("Heater", "1000", "A")).is_ok());
    let bad = LoadCandidate::new("Odd", "1000").phases(["A", "N", "B"]);
    assert_eq!(
        s.add(&bad).err(),
        Some(RegistryError::Topology(TopologyError::TwoPhasesWithNeutral))
    );
    assert_eq!(s.loads().len(), 1);
}

#[test]
fn zero_power_factor_rules() {
    let mut s = session_380();
    let bad = single_phase("Idle", "100", "A").power_factor("0");
    assert!(matches!(s.add(&bad), Err(RegistryError::Validation(_))));
    let ok = single_phase("Idle", "0", "A").power_factor("0");
    assert!(s.add(&ok).is_ok());
    assert_eq!(s.snapshot().ia.magnitude, 0.0);
}

#[test]
fn single_load_power_factor_passes_through() {
    let mut s = session_380();
    assert!(
        s.add(&single_phase("Motor", "1000", "B").power_factor("0.8"))
            .is_ok()
    );
    let snap = s.snapshot();
    assert!((snap.pf_total - 0.8).abs() < 1e-12);
    assert!((snap.q_total - 750.0).abs() < 1e-9);
    assert!((snap.s_total - 1250.0).abs() < 1e-9);
}

#[test]
fn deleting_only_load_zeroes_everything() {
    let mut s = session_380();
    assert!(s.add(&three_phase("M", "5000", "0.9")).is_ok());
    assert!(s.remove_at(0).is_ok());
    let snap = s.snapshot();
    for (_, p) in snap.phasors() {
        assert_eq!(p.magnitude, 0.0);
    }
    assert_eq!(snap.pf_total, 0.0);
    assert_eq!(snap.p_total, 0.0);
}

#[test]
fn phase_to_phase_load_leaves_neutral_empty() {
    let mut s = session_380();
    assert!(
        s.add(&LoadCandidate::new("Welder", "3800").phases(["A", "B"]))
            .is_ok()
    );
    let snap = s.snapshot();
    assert!((snap.ia.magnitude - 10.0).abs() < TOL);
    assert!((snap.ib.magnitude - 10.0).abs() < TOL);
    assert!(angle_diff(snap.ia.angle_deg, 30.0) < ANGLE_TOL);
    assert!(angle_diff(snap.ib.angle_deg, -150.0) < ANGLE_TOL);
    assert!(snap.i_n.magnitude < 1e-9);
}

#[test]
fn capacitive_load_leads_inductive_lags() {
    let mut s = session_380();
    assert!(
        s.add(&single_phase("Motor", "1000", "A").power_factor("0.5"))
            .is_ok()
    );
    assert!(angle_diff(s.snapshot().ia.angle_deg, -60.0) < ANGLE_TOL);

    let bank = single_phase("Bank", "1000", "A")
        .power_factor("0.5")
        .pf_type("capacitive");
    assert!(s.replace_at(0, &bank).is_ok());
    assert!(angle_diff(s.snapshot().ia.angle_deg, 60.0) < ANGLE_TOL);
    assert!(s.snapshot().q_total < 0.0);
}

#[test]
fn generator_reduces_phase_current_and_real_power() {
    let mut s = session_380();
    assert!(s.add(&single_phase("House", "3000", "A")).is_ok());
    assert!(s.add(&single_phase("PV", "-1000", "A")).is_ok());
    let snap = s.snapshot();
    let expected = 2000.0 / (380.0 / 3.0_f64.sqrt());
    assert!((snap.ia.magnitude - expected).abs() < 1e-9);
    assert!((snap.p_total - 2000.0).abs() < TOL);
    assert!(s.loads()[1].current() < 0.0);
}
