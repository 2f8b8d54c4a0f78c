//! Phasor calculator entry point: scenario loading, session wiring, and reports.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{error, info, warn};

use phasor_calc::config::ScenarioConfig;
use phasor_calc::io::export::{export_loads_csv, export_results_csv};
use phasor_calc::loads::{Load, TopologyPolicy};
use phasor_calc::session::Session;

use cli::CliOptions;

fn main() -> Result<()> {
    env_logger::init();
    let opts = CliOptions::parse();

    let mut scenario = match &opts.scenario {
        Some(path) => {
            info!("Loading scenario from {}", path.display());
            ScenarioConfig::from_toml_file(path)?
        }
        None => {
            info!("Using preset \"{}\"", opts.preset_name());
            ScenarioConfig::from_preset(opts.preset_name())?
        }
    };
    if let Some(v) = opts.line_voltage {
        scenario.network.line_voltage = v;
    }
    if opts.lenient {
        scenario.network.allow_single_phase_without_neutral = true;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        bail!("scenario has {} invalid field(s)", errors.len());
    }

    let policy: TopologyPolicy = scenario.network.topology_policy();
    let mut session = Session::new(scenario.network.line_voltage.to_string(), policy);

    let mut rejected = 0usize;
    for (i, candidate) in scenario.candidates().iter().enumerate() {
        if let Err(e) = session.add(candidate) {
            warn!("Skipping load #{i} \"{}\": {e}", candidate.name);
            rejected += 1;
        }
    }

    print_load_table(session.loads());
    println!();
    print!("{}", session.snapshot());
    if rejected > 0 {
        println!("\n{rejected} load(s) rejected, run with RUST_LOG=warn for details");
    }

    if let Some(path) = &opts.loads_out {
        export_loads_csv(session.loads(), path)
            .with_context(|| format!("writing load table to {}", path.display()))?;
        info!("Load table written to {}", path.display());
    }
    if let Some(path) = &opts.results_out {
        export_results_csv(session.snapshot(), path)
            .with_context(|| format!("writing results to {}", path.display()))?;
        info!("Results written to {}", path.display());
    }

    Ok(())
}

fn print_load_table(loads: &[Load]) {
    println!("--- Loads ---");
    println!(
        "{:<20} {:>12} {:>6} {:<11} {:<10} {:>12}",
        "Name", "Power (W)", "PF", "PF type", "Phases", "Current (A)"
    );
    for load in loads {
        println!(
            "{:<20} {:>12.2} {:>6.3} {:<11} {:<10} {:>12.2}",
            load.name(),
            load.power(),
            load.power_factor(),
            load.pf_type().to_string(),
            load.phases().to_string(),
            load.current()
        );
    }
}
