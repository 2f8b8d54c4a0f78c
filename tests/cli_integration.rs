use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use phasor_calc::io::export::RESULTS_HEADER;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_phasor-calc"))
        .args(args)
        .output()
        .expect("phasor-calc process should run")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be valid UTF-8")
}

fn parse_value(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.starts_with(label))
        .unwrap_or_else(|| panic!("missing line `{label}` in output: {stdout}"));
    line[label.len()..]
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("invalid value in line `{line}`"))
}

#[test]
fn industrial_preset_writes_results_csv() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let results = dir.path().join("results.csv");
    let results_arg = results.to_str().expect("temp path should be UTF-8");

    let output = run(&["--preset", "industrial", "--results-out", results_arg]);
    assert!(
        output.status.success(),
        "industrial run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("--- Loads ---"));
    assert!(stdout.contains("Induction furnace"));
    assert!(!stdout.contains("rejected"));
    let p = parse_value(&stdout, "Real power (P):");
    assert!((p - 38500.0).abs() < 0.01, "unexpected P total {p}");

    let csv = fs::read_to_string(&results).expect("results CSV should exist");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], RESULTS_HEADER);
    assert!(lines[5].starts_with("P_total,38500.0000,"));
}

#[test]
fn rejected_scenario_entries_are_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let scenario = dir.path().join("plant.toml");
    fs::write(
        &scenario,
        r#"
[network]
line_voltage = 380.0

[[loads]]
name = "Heater"
power = 1000.0
phases = ["A", "N"]

[[loads]]
name = "Miswired"
power = 500.0
phases = ["A", "B", "N"]
"#,
    )
    .expect("scenario should be written");

    let output = run(&["--scenario", path_arg(&scenario)]);
    assert!(
        output.status.success(),
        "scenario run failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = stdout_of(&output);
    assert!(stdout.contains("1 load(s) rejected"));
    assert!(stdout.contains("Heater"));
    assert!(!stdout.contains("Miswired"));
    let p = parse_value(&stdout, "Real power (P):");
    assert!((p - 1000.0).abs() < 0.01);
}

#[test]
fn non_positive_line_voltage_fails_the_run() {
    let output = run(&["--preset", "residential", "--line-voltage=0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid field"));
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}
