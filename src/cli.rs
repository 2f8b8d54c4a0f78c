use std::path::PathBuf;

use clap::Parser;

/// Command-line options.
#[derive(Parser, Debug)]
#[command(
    name = "phasor-calc",
    about = "Per-phase current phasors and power balance for three-phase loads"
)]
pub struct CliOptions {
    /// Load scenario from a TOML file
    #[arg(long, conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (empty, residential, industrial)
    #[arg(long)]
    pub preset: Option<String>,

    /// Override the network line-to-line voltage (V)
    #[arg(long)]
    pub line_voltage: Option<f64>,

    /// Treat a single phase without neutral as phase-to-neutral
    #[arg(long)]
    pub lenient: bool,

    /// Export the load table to CSV
    #[arg(long)]
    pub loads_out: Option<PathBuf>,

    /// Export the result snapshot to CSV
    #[arg(long)]
    pub results_out: Option<PathBuf>,
}

impl CliOptions {
    /// Preset to use when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("residential")
    }
}
