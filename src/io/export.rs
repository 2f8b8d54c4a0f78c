//! CSV export for the load table and the result snapshot.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::ResultSnapshot;
use crate::loads::Load;

/// Column header for the load table export.
pub const LOADS_HEADER: &str = "name,power_w,power_factor,pf_type,phases,current_a";

/// Column header for the result snapshot export.
pub const RESULTS_HEADER: &str = "quantity,magnitude,angle_deg,unit";

/// Exports the load table to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_loads_csv(loads: &[Load], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_loads_csv(loads, io::BufWriter::new(file))
}

/// Writes the load table as CSV to any writer.
///
/// One row per load in list order. Phases are space separated; the
/// current is the signed value from the last recompute.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_loads_csv(loads: &[Load], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LOADS_HEADER.split(','))?;

    for load in loads {
        wtr.write_record(&[
            load.name().to_string(),
            format!("{:.2}", load.power()),
            format!("{:.3}", load.power_factor()),
            load.pf_type().to_string(),
            load.phases().tokens().join(" "),
            format!("{:.4}", load.current()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a result snapshot to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_results_csv(snapshot: &ResultSnapshot, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_results_csv(snapshot, io::BufWriter::new(file))
}

/// Writes a result snapshot as CSV to any writer.
///
/// Phasor rows carry magnitude and angle; power totals leave the angle
/// column empty.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_results_csv(snapshot: &ResultSnapshot, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(RESULTS_HEADER.split(','))?;

    for (label, p) in snapshot.phasors() {
        let magnitude = format!("{:.4}", p.magnitude);
        let angle = format!("{:.2}", p.angle_deg);
        wtr.write_record([label, magnitude.as_str(), angle.as_str(), "A"])?;
    }

    let totals = [
        ("P_total", snapshot.p_total, "W"),
        ("Q_total", snapshot.q_total, "VAR"),
        ("S_total", snapshot.s_total, "VA"),
        ("PF_total", snapshot.pf_total, ""),
    ];
    for (label, value, unit) in totals {
        let value = format!("{value:.4}");
        wtr.write_record([label, value.as_str(), "", unit])?;
    }

    wtr.flush()?;
    Ok(())
}
